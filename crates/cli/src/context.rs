//! Shared per-invocation context.

use fitform::ApiClient;

use crate::error::Result;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Resolved global settings every command receives.
#[derive(Clone, Debug)]
pub struct CommandContext {
	base_url: String,
}

impl CommandContext {
	/// Resolves the backend base URL: the `--base-url` flag wins, then the
	/// `FITFORM_BASE_URL` environment variable, then the local default.
	pub fn new(base_url: Option<String>) -> Self {
		let base_url = base_url
			.or_else(|| std::env::var("FITFORM_BASE_URL").ok())
			.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
		Self { base_url }
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	pub fn api(&self) -> Result<ApiClient> {
		Ok(ApiClient::new(&self.base_url)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn flag_wins_over_default() {
		let ctx = CommandContext::new(Some("http://coach.example:9000".to_string()));
		assert_eq!(ctx.base_url(), "http://coach.example:9000");
	}

	#[test]
	fn default_base_url_is_local() {
		// Only meaningful when FITFORM_BASE_URL is unset, as in CI.
		if std::env::var("FITFORM_BASE_URL").is_err() {
			assert_eq!(CommandContext::new(None).base_url(), DEFAULT_BASE_URL);
		}
	}
}
