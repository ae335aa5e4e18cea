//! Manual workout logging: parse the exercise specs, post the whole
//! session atomically.

use colored::Colorize;
use fitform::protocol::{LogSessionRequest, Workout, WorkoutSet};
use tracing::info;

use crate::context::CommandContext;
use crate::error::{CliError, Result};

pub async fn execute(user: &str, specs: &[String], ctx: &CommandContext) -> Result<()> {
	let user = user.trim();
	if user.is_empty() {
		return Err(CliError::Usage("a user id is required".to_string()));
	}

	let workouts = specs.iter().map(|spec| parse_exercise(spec)).collect::<Result<Vec<_>>>()?;

	let request = LogSessionRequest {
		user_id: user.to_string(),
		workouts,
	};
	ctx.api()?.log_session(&request).await?;

	info!(target = "fitform", user_id = user, exercises = request.workouts.len(), "workout log saved");
	println!("{}", "Session saved.".green().bold());
	Ok(())
}

/// Parses one `--exercise` value: `NAME:REPSxWEIGHT[,REPSxWEIGHT...]`.
fn parse_exercise(spec: &str) -> Result<Workout> {
	let (name, sets) = spec
		.split_once(':')
		.ok_or_else(|| CliError::Usage(format!("expected NAME:REPSxWEIGHT[,REPSxWEIGHT...], got {spec:?}")))?;

	let name = name.trim();
	if name.is_empty() {
		return Err(CliError::Usage(format!("exercise name missing in {spec:?}")));
	}

	let sets = sets.split(',').map(|set| parse_set(set, spec)).collect::<Result<Vec<_>>>()?;
	Ok(Workout {
		name: name.to_string(),
		sets,
	})
}

fn parse_set(set: &str, spec: &str) -> Result<WorkoutSet> {
	let (reps, weight) = set
		.trim()
		.split_once(['x', 'X'])
		.ok_or_else(|| CliError::Usage(format!("expected REPSxWEIGHT in {spec:?}, got {set:?}")))?;
	let reps = reps
		.trim()
		.parse::<u32>()
		.map_err(|_| CliError::Usage(format!("reps must be a whole number in {set:?}")))?;
	let weight = weight
		.trim()
		.parse::<f64>()
		.map_err(|_| CliError::Usage(format!("weight must be a number in {set:?}")))?;
	if !weight.is_finite() || weight < 0.0 {
		return Err(CliError::Usage(format!("weight must be non-negative in {set:?}")));
	}
	Ok(WorkoutSet { reps, weight })
}
