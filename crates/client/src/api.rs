//! Typed HTTP plumbing for the backend endpoints.
//!
//! One [`ApiClient`] wraps a shared `reqwest::Client` and the backend base
//! URL. Methods map 1:1 onto endpoints; none of them hold client-side
//! state. Lifecycle sequencing lives in [`crate::SessionController`].

use fitform_protocol::{
	AdviceResponse, EndSessionRequest, EndSessionResponse, EndSetResponse, JournalEntry, JournalEntryCreate,
	LogSessionRequest, SessionRecord, SetFeedback, StartSessionRequest, StatusResponse,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::{ClientError, Result};

/// Client for the capture backend (`/cv/*`) and the persistence API
/// (`/api/*`). Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
	http: reqwest::Client,
	base: Url,
}

impl ApiClient {
	pub fn new(base_url: &str) -> Result<Self> {
		Ok(Self {
			http: reqwest::Client::new(),
			base: Url::parse(base_url)?,
		})
	}

	/// Base URL this client talks to.
	pub fn base(&self) -> &Url {
		&self.base
	}

	/// URL of the MJPEG video feed. The stream itself is opaque to this
	/// client; callers hand the URL to an external viewer.
	pub fn video_feed_url(&self) -> Result<Url> {
		self.endpoint("/cv/video_feed")
	}

	/// URL of the server-sent-event metrics stream.
	pub(crate) fn metrics_url(&self) -> Result<Url> {
		self.endpoint("/cv/metrics")
	}

	pub(crate) fn http(&self) -> &reqwest::Client {
		&self.http
	}

	// ---- capture-session control ----

	pub async fn start_session(&self, request: &StartSessionRequest) -> Result<StatusResponse> {
		self.post_json("/cv/start_session", request, "start session").await
	}

	pub async fn start_set(&self) -> Result<StatusResponse> {
		self.post_json("/cv/start_set", &json!({}), "start set").await
	}

	pub async fn end_set(&self) -> Result<EndSetResponse> {
		self.post_json("/cv/end_set", &json!({}), "end set").await
	}

	pub async fn submit_set_feedback(&self, feedback: &SetFeedback) -> Result<StatusResponse> {
		self.post_json("/cv/submit_set_feedback", feedback, "submit feedback").await
	}

	pub async fn update_session_notes(&self, notes: &str) -> Result<StatusResponse> {
		self.post_json("/cv/update_session_notes", &json!({ "notes": notes }), "update notes").await
	}

	pub async fn end_session(&self, request: &EndSessionRequest) -> Result<EndSessionResponse> {
		self.post_json("/cv/end_session", request, "end session").await
	}

	/// Force-closes whatever session a previous run may have left behind
	/// on the server. Best-effort by contract: the backend answers 400
	/// when nothing is active, and an unreachable backend will be
	/// reported by the `start_session` call that follows.
	pub async fn clear_stale_session(&self) {
		let Ok(url) = self.endpoint("/cv/end_session") else {
			return;
		};
		match self.http.post(url).json(&json!({})).send().await {
			Ok(response) => {
				debug!(target = "fitform.api", status = %response.status(), "cleared stale session")
			}
			Err(err) => {
				debug!(target = "fitform.api", error = %err, "stale session clear failed; ignoring")
			}
		}
	}

	/// Fetches a saved session file named by a successful `end_session`.
	pub async fn download_session(&self, filename: &str) -> Result<Vec<u8>> {
		let mut url = self.endpoint("/cv/download_session/")?;
		push_segment(&mut url, filename)?;
		let response = self.http.get(url).send().await?;
		if !response.status().is_success() {
			return Err(ClientError::Backend {
				action: "download session",
				message: format!("HTTP {}", response.status()),
			});
		}
		Ok(response.bytes().await?.to_vec())
	}

	// ---- persistence API ----

	/// Persists a manually logged workout session. The whole structure is
	/// posted atomically; there is no partial save.
	pub async fn log_session(&self, request: &LogSessionRequest) -> Result<()> {
		let url = self.endpoint("/api/sessions")?;
		let response = self.http.post(url).json(request).send().await?;
		decode::<serde_json::Value>(response, "save workout log").await?;
		Ok(())
	}

	pub async fn advice(&self, user_id: &str, limit: u32) -> Result<String> {
		let mut url = self.endpoint("/api/advice/")?;
		push_segment(&mut url, user_id)?;
		url.query_pairs_mut().append_pair("limit", &limit.to_string());
		let response = self.http.get(url).send().await?;
		let advice: AdviceResponse = decode(response, "fetch advice").await?;
		Ok(advice.advice)
	}

	pub async fn sessions(&self, limit: u32) -> Result<Vec<SessionRecord>> {
		let mut url = self.endpoint("/api/sessions")?;
		url.query_pairs_mut().append_pair("limit", &limit.to_string());
		let response = self.http.get(url).send().await?;
		decode(response, "list sessions").await
	}

	pub async fn create_journal_entry(&self, entry: &JournalEntryCreate) -> Result<JournalEntry> {
		let url = self.endpoint("/api/entries")?;
		let response = self.http.post(url).json(entry).send().await?;
		decode(response, "create journal entry").await
	}

	pub async fn journal_entries(&self, limit: u32) -> Result<Vec<JournalEntry>> {
		let mut url = self.endpoint("/api/entries")?;
		url.query_pairs_mut().append_pair("limit", &limit.to_string());
		let response = self.http.get(url).send().await?;
		decode(response, "list journal entries").await
	}

	// ---- helpers ----

	fn endpoint(&self, path: &str) -> Result<Url> {
		Ok(self.base.join(path)?)
	}

	async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B, action: &'static str) -> Result<T> {
		let url = self.endpoint(path)?;
		debug!(target = "fitform.api", %url, action, "post");
		let response = self.http.post(url).json(body).send().await?;
		decode(response, action).await
	}
}

/// Appends one percent-encoded path segment.
fn push_segment(url: &mut Url, segment: &str) -> Result<()> {
	url.path_segments_mut()
		.map_err(|()| ClientError::Validation("base url cannot carry path segments".to_string()))?
		.pop_if_empty()
		.push(segment);
	Ok(())
}

/// Decodes a response body, turning non-2xx answers into
/// [`ClientError::Backend`] with the backend's own message when the body
/// carries one.
async fn decode<T: DeserializeOwned>(response: reqwest::Response, action: &'static str) -> Result<T> {
	let status = response.status();
	let body = response.text().await?;
	if !status.is_success() {
		let message = serde_json::from_str::<StatusResponse>(&body)
			.ok()
			.and_then(|ack| ack.message)
			.unwrap_or_else(|| format!("HTTP {status}"));
		debug!(target = "fitform.api", %status, action, %message, "backend rejected request");
		return Err(ClientError::Backend { action, message });
	}
	Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn advice_url_percent_encodes_user_id() {
		let client = ApiClient::new("http://localhost:8000").unwrap();
		let mut url = client.endpoint("/api/advice/").unwrap();
		push_segment(&mut url, "user one/two").unwrap();
		assert_eq!(url.path(), "/api/advice/user%20one%2Ftwo");
	}

	#[test]
	fn invalid_base_url_rejected_up_front() {
		assert!(ApiClient::new("not a url").is_err());
	}
}
