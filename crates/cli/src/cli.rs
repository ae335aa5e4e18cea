use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "fitform")]
#[command(about = "FitForm CLI - workout logging and live posture coaching from the command line")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Backend base URL (also FITFORM_BASE_URL)
	#[arg(long, global = true, value_name = "URL")]
	pub base_url: Option<String>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Run a live posture-coaching session against the camera backend
	#[command(alias = "pose")]
	Posture {
		/// User the session is recorded for
		#[arg(short, long)]
		user: String,

		/// Dumbbell weight in lbs
		#[arg(short, long)]
		weight: Option<f64>,

		/// Training goal stored with the session
		#[arg(long)]
		goal: Option<String>,

		/// Experience level stored with the session
		#[arg(long)]
		experience: Option<String>,

		/// Directory the saved session file is downloaded into
		#[arg(long, default_value = ".")]
		output_dir: PathBuf,
	},

	/// Log a finished workout session manually
	Log {
		/// User the session belongs to
		#[arg(short, long)]
		user: String,

		/// Exercise spec NAME:REPSxWEIGHT[,REPSxWEIGHT...]; repeatable
		#[arg(short, long = "exercise", value_name = "SPEC", required = true)]
		exercises: Vec<String>,
	},

	/// Fetch AI-generated advice based on past sessions
	Advice {
		user: String,

		/// How many past sessions to consider (1-20)
		#[arg(short, long, default_value = "5")]
		limit: u32,
	},

	/// List recent workout sessions
	Sessions {
		#[arg(short, long, default_value = "50")]
		limit: u32,

		/// Only show sessions for this user
		#[arg(short, long)]
		user: Option<String>,

		/// Output format
		#[arg(short, long, value_enum, default_value = "text")]
		format: OutputFormat,
	},

	/// Training journal
	Journal {
		#[command(subcommand)]
		action: JournalAction,
	},
}

#[derive(Subcommand, Debug)]
pub enum JournalAction {
	/// Add a journal entry
	Add {
		content: String,

		/// User the entry belongs to
		#[arg(short, long)]
		user: Option<String>,
	},

	/// List recent entries
	List {
		#[arg(short, long, default_value = "20")]
		limit: u32,
	},
}

/// Output format for listing commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text
	#[default]
	Text,
	/// Raw JSON
	Json,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_posture_command() {
		let args = vec!["fitform", "posture", "--user", "user_1", "--weight", "20"];
		let cli = Cli::try_parse_from(args).unwrap();

		match cli.command {
			Commands::Posture { user, weight, goal, .. } => {
				assert_eq!(user, "user_1");
				assert_eq!(weight, Some(20.0));
				assert!(goal.is_none());
			}
			_ => panic!("Expected Posture command"),
		}
	}

	#[test]
	fn posture_alias_pose() {
		let args = vec!["fitform", "pose", "--user", "user_1"];
		let cli = Cli::try_parse_from(args).unwrap();
		assert!(matches!(cli.command, Commands::Posture { .. }));
	}

	#[test]
	fn parse_log_with_repeated_exercises() {
		let args = vec![
			"fitform",
			"log",
			"--user",
			"user_1",
			"--exercise",
			"Bench Press:8x185,6x195",
			"--exercise",
			"Squat:5x225",
		];
		let cli = Cli::try_parse_from(args).unwrap();

		match cli.command {
			Commands::Log { user, exercises } => {
				assert_eq!(user, "user_1");
				assert_eq!(exercises.len(), 2);
			}
			_ => panic!("Expected Log command"),
		}
	}

	#[test]
	fn log_requires_at_least_one_exercise() {
		let args = vec!["fitform", "log", "--user", "user_1"];
		assert!(Cli::try_parse_from(args).is_err());
	}

	#[test]
	fn parse_advice_defaults() {
		let args = vec!["fitform", "advice", "user_1"];
		let cli = Cli::try_parse_from(args).unwrap();

		match cli.command {
			Commands::Advice { user, limit } => {
				assert_eq!(user, "user_1");
				assert_eq!(limit, 5);
			}
			_ => panic!("Expected Advice command"),
		}
	}

	#[test]
	fn parse_sessions_format() {
		let args = vec!["fitform", "sessions", "--format", "json", "--user", "user_1"];
		let cli = Cli::try_parse_from(args).unwrap();

		match cli.command {
			Commands::Sessions { format, user, limit } => {
				assert_eq!(format, OutputFormat::Json);
				assert_eq!(user.as_deref(), Some("user_1"));
				assert_eq!(limit, 50);
			}
			_ => panic!("Expected Sessions command"),
		}
	}

	#[test]
	fn global_base_url_flag() {
		let args = vec!["fitform", "--base-url", "http://coach:9000", "advice", "user_1"];
		let cli = Cli::try_parse_from(args).unwrap();
		assert_eq!(cli.base_url.as_deref(), Some("http://coach:9000"));
	}
}
