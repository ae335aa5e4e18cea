use colored::Colorize;
use fitform_protocol::SessionRecord;

use crate::cli::OutputFormat;
use crate::context::CommandContext;
use crate::error::Result;

pub async fn execute(limit: u32, user: Option<&str>, format: OutputFormat, ctx: &CommandContext) -> Result<()> {
	let mut records = ctx.api()?.sessions(limit).await?;
	// The endpoint has no user filter; narrow client-side.
	if let Some(user) = user {
		records.retain(|record| record.user_id == user);
	}

	match format {
		OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
		OutputFormat::Text => {
			if records.is_empty() {
				println!("No sessions found.");
				return Ok(());
			}
			for record in &records {
				print_record(record);
			}
		}
	}
	Ok(())
}

fn print_record(record: &SessionRecord) {
	let finished = record.finished_at.as_deref().unwrap_or("-");
	println!("{} {} ({finished})", record.user_id.bold(), record.id.dimmed());
	for workout in &record.workouts {
		let sets = workout
			.sets
			.iter()
			.map(|set| format!("{}x{}", set.reps, set.weight))
			.collect::<Vec<_>>()
			.join(", ");
		println!("  {}: {sets}", workout.name);
	}
}
