use colored::Colorize;

use crate::context::CommandContext;
use crate::error::{CliError, Result};

pub async fn execute(user: &str, limit: u32, ctx: &CommandContext) -> Result<()> {
	let user = user.trim();
	if user.is_empty() {
		return Err(CliError::Usage("a user id is required".to_string()));
	}

	// The backend accepts 1-20 considered sessions.
	let advice = ctx.api()?.advice(user, limit.clamp(1, 20)).await?;

	println!("{}", "AI Advice".bold());
	println!("{advice}");
	Ok(())
}
