use colored::Colorize;
use fitform_protocol::JournalEntryCreate;

use crate::context::CommandContext;
use crate::error::{CliError, Result};

pub async fn add(content: &str, user: Option<String>, ctx: &CommandContext) -> Result<()> {
	let content = content.trim();
	if content.is_empty() {
		return Err(CliError::Usage("journal entry text is required".to_string()));
	}

	let entry = ctx
		.api()?
		.create_journal_entry(&JournalEntryCreate {
			content: content.to_string(),
			user_id: user,
		})
		.await?;

	println!("{} Entry {} saved.", "✓".green(), entry.id.dimmed());
	Ok(())
}

pub async fn list(limit: u32, ctx: &CommandContext) -> Result<()> {
	let entries = ctx.api()?.journal_entries(limit).await?;
	if entries.is_empty() {
		println!("No journal entries yet.");
		return Ok(());
	}
	for entry in &entries {
		let when = entry.created_at.as_deref().unwrap_or("-");
		let who = entry.user_id.as_deref().unwrap_or("anonymous");
		println!("{} {} ({when})", who.bold(), entry.id.dimmed());
		println!("  {}", entry.content);
	}
	Ok(())
}
