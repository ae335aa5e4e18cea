//! Interactive live posture-coaching session.
//!
//! Drives the remote session lifecycle from a prompt loop: the
//! `SessionController` owns all mutable state, this module only reads it
//! (phase, set counter, metrics receiver) and translates typed commands
//! into lifecycle actions. A refused or failed action prints an alert and
//! leaves the loop running in the prior state.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use colored::Colorize;
use fitform::protocol::{EndSessionRequest, EndSetResponse, MetricsSnapshot, SetFeedback};
use fitform::{Phase, SessionController};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;

use crate::context::CommandContext;
use crate::error::{CliError, Result};

type StdinLines = Lines<BufReader<Stdin>>;

pub struct PostureOptions {
	pub user: String,
	pub weight: Option<f64>,
	pub goal: Option<String>,
	pub experience: Option<String>,
	pub output_dir: PathBuf,
}

pub async fn execute(options: PostureOptions, ctx: &CommandContext) -> Result<()> {
	let api = ctx.api()?;
	let mut controller = SessionController::new(api);
	controller
		.start_session(&options.user, options.weight, options.goal.clone(), options.experience.clone())
		.await?;

	println!("{}", "Session started.".green().bold());
	if let Ok(feed) = controller.api().video_feed_url() {
		println!("Video feed (open in a browser): {}", feed.to_string().underline());
	}
	print_help();

	let mut lines = BufReader::new(tokio::io::stdin()).lines();
	loop {
		prompt(&controller)?;
		let Some(line) = lines.next_line().await? else {
			println!();
			info!(target = "fitform", "stdin closed; leaving session view");
			break;
		};
		let line = line.trim();
		let (command, rest) = match line.split_once(' ') {
			Some((command, rest)) => (command, rest.trim()),
			None => (line, ""),
		};

		match command {
			"" => {}
			"set" | "s" => match controller.start_set().await {
				Ok(()) => println!("{} Set {} running - curl away.", "●".green(), controller.current_set()),
				Err(err) => alert(&err.into()),
			},
			"done" | "d" => match controller.end_set().await {
				Ok(response) => {
					print_set_summary(&response);
					if let Err(err) = collect_and_submit_feedback(&mut controller, &mut lines).await {
						alert(&err);
						println!("{}", "Type 'feedback' to try again.".dimmed());
					}
				}
				Err(err) => alert(&err.into()),
			},
			"feedback" | "f" => {
				if let Err(err) = collect_and_submit_feedback(&mut controller, &mut lines).await {
					alert(&err);
				}
			}
			"status" => print_status(&controller),
			"watch" | "w" => watch(&controller, &mut lines).await?,
			"note" => {
				if rest.is_empty() {
					alert(&CliError::Usage("usage: note <text>".to_string()));
				} else {
					match controller.update_notes(rest).await {
						Ok(()) => println!("Noted."),
						Err(err) => alert(&err.into()),
					}
				}
			}
			"end" | "e" => match end_session(&mut controller, &mut lines, &options.output_dir).await {
				Ok(()) => break,
				Err(err) => alert(&err),
			},
			"quit" | "q" => {
				// Abandons the local view; the next start force-clears the
				// remote side. Dropping the controller closes the stream.
				println!("{}", "Leaving without ending the session on the server.".yellow());
				break;
			}
			"help" | "h" | "?" => print_help(),
			other => alert(&CliError::Usage(format!("unknown command: {other} (try 'help')"))),
		}
	}

	Ok(())
}

fn print_help() {
	println!(
		"\nCommands:\n  {}    start the next set\n  {}   end the set and record feedback\n  {}  retry feedback for the last set\n  {} print the latest metrics\n  {}  live metrics until Enter\n  {}  attach a note to the session\n  {}    finish and save the session\n  {}   leave without ending the session\n",
		"set".bold(),
		"done".bold(),
		"feedback".bold(),
		"status".bold(),
		"watch".bold(),
		"note <text>".bold(),
		"end".bold(),
		"quit".bold(),
	);
}

fn prompt(controller: &SessionController) -> Result<()> {
	print!("[set {} · {}] > ", controller.current_set(), controller.phase());
	std::io::stdout().flush()?;
	Ok(())
}

fn alert(err: &CliError) {
	println!("{} {err}", "✗".red().bold());
}

async fn ask(lines: &mut StdinLines, label: &str) -> Result<String> {
	print!("  {label}");
	std::io::stdout().flush()?;
	lines
		.next_line()
		.await?
		.map(|line| line.trim().to_string())
		.ok_or_else(|| CliError::Usage("input closed".to_string()))
}

async fn ask_number(lines: &mut StdinLines, label: &str) -> Result<f64> {
	let raw = ask(lines, label).await?;
	raw.parse::<f64>()
		.map_err(|_| CliError::Usage(format!("expected a number, got {raw:?}")))
}

/// Collects the subjective feedback for the set that just ended and
/// submits it. Parse and validation failures happen before any request,
/// so the set stays in feedback-pending and can be retried.
async fn collect_and_submit_feedback(controller: &mut SessionController, lines: &mut StdinLines) -> Result<()> {
	println!("{}", "How did that set feel?".bold());
	let rpe = ask_number(lines, "RPE, effort 1-10: ").await?;
	let rir = ask_number(lines, "RIR, reps left in the tank 0-10: ").await?;
	let fatigue_reason = ask(lines, "Why did the set end (target/failure/form/pain/other): ")
		.await?
		.parse()
		.map_err(CliError::Usage)?;
	let muscle_focus = ask(lines, "Felt mostly in (biceps/forearms/shoulders/back/other): ")
		.await?
		.parse()
		.map_err(CliError::Usage)?;
	let pain = ask(lines, "Any pain? (y/N): ").await?;
	let pain_flag = matches!(pain.to_lowercase().as_str(), "y" | "yes");
	let pain_location = if pain_flag {
		Some(ask(lines, "Where? ").await?)
	} else {
		None
	};
	let notes = ask(lines, "Notes (optional): ").await?;

	let feedback = SetFeedback {
		rpe,
		rir,
		fatigue_reason,
		muscle_focus,
		pain_flag,
		pain_location,
		notes: if notes.is_empty() { None } else { Some(notes) },
	};
	controller.submit_feedback(&feedback).await?;
	println!("{} Feedback recorded. Next up: set {}.", "✓".green(), controller.current_set());
	Ok(())
}

async fn end_session(controller: &mut SessionController, lines: &mut StdinLines, output_dir: &Path) -> Result<()> {
	// Authorization is re-checked by the controller; asking the summary
	// questions first would be wasted typing when feedback is pending.
	controller.controls().can_end_session.then_some(()).ok_or_else(|| {
		CliError::Usage(match controller.phase() {
			Phase::FeedbackPending => "set feedback is still pending; submit it first".to_string(),
			phase => format!("cannot end the session while {phase}"),
		})
	})?;

	let overall = ask(lines, "Overall feeling (optional): ").await?;
	let notes = ask(lines, "Session notes (optional): ").await?;
	let response = controller
		.end_session(EndSessionRequest {
			overall_feeling: if overall.is_empty() { None } else { Some(overall) },
			notes: if notes.is_empty() { None } else { Some(notes) },
			total_sets: None,
		})
		.await?;

	println!("{}", "Session ended.".green().bold());
	if let Some(filename) = response.filename.as_deref() {
		match download(controller, filename, output_dir).await {
			Ok(path) => println!("Session data saved to {}", path.display()),
			Err(err) => alert(&err),
		}
	}
	Ok(())
}

async fn download(controller: &SessionController, filename: &str, output_dir: &Path) -> Result<PathBuf> {
	let bytes = controller.api().download_session(filename).await?;
	// The server names the file; keep only the terminal component so a
	// hostile name cannot escape the output directory.
	let name = Path::new(filename)
		.file_name()
		.ok_or_else(|| CliError::Usage(format!("backend returned an unusable filename: {filename:?}")))?;
	let path = output_dir.join(name);
	std::fs::write(&path, bytes)?;
	Ok(path)
}

fn print_set_summary(response: &EndSetResponse) {
	println!("{}", "Set complete.".bold());
	if let Some(reps) = response.total_reps {
		println!("  Reps counted: {reps}");
	}
	if let Some(metrics) = &response.metrics {
		if let Ok(pretty) = serde_json::to_string_pretty(metrics) {
			println!("  Set metrics: {pretty}");
		}
	}
}

fn print_status(controller: &SessionController) {
	let snapshot = controller.latest_metrics();
	println!("Phase: {} · set {}", controller.phase(), controller.current_set());
	if let Some(session) = controller.session() {
		println!("User: {} · weight {} lbs", session.user_id, session.weight);
	}
	println!("Reps: {} · angle {:.0}°", snapshot.reps, snapshot.angle);
	if !snapshot.feedback.is_empty() {
		println!("Coach: {}", snapshot.feedback);
	}
	let form = snapshot.form_metrics;
	println!(
		"Form: shoulder {:.2} · elbow flare {:.2}° · torso lean {:.2}° · ROM {:.1}%",
		form.shoulder_elevation, form.elbow_flare, form.torso_lean, form.rom_percentage
	);
}

/// Streams metric updates as a single-line ticker until the user presses
/// Enter. Messages keep arriving while not watching too; this only
/// changes what gets rendered.
async fn watch(controller: &SessionController, lines: &mut StdinLines) -> Result<()> {
	let Some(mut rx) = controller.metrics() else {
		alert(&CliError::Usage("no live metrics while idle".to_string()));
		return Ok(());
	};
	println!("{}", "Live metrics - press Enter to stop.".dimmed());
	loop {
		tokio::select! {
			changed = rx.changed() => {
				if changed.is_err() {
					println!("\n{}", "Metrics stream closed.".dimmed());
					return Ok(());
				}
				let snapshot = rx.borrow_and_update().clone();
				print!("\r{:<70}", ticker(&snapshot));
				std::io::stdout().flush()?;
			}
			line = lines.next_line() => {
				println!();
				if line?.is_none() {
					return Err(CliError::Usage("input closed".to_string()));
				}
				return Ok(());
			}
		}
	}
}

fn ticker(snapshot: &MetricsSnapshot) -> String {
	format!(
		"reps {:>3} · angle {:>4.0}° · ROM {:>5.1}% · {}",
		snapshot.reps, snapshot.angle, snapshot.form_metrics.rom_percentage, snapshot.feedback
	)
}
