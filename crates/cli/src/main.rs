use clap::Parser;
use fitform_cli::{cli::Cli, commands, context::CommandContext, logging};
use tracing::error;

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	let ctx = CommandContext::new(cli.base_url);
	if let Err(err) = commands::dispatch(cli.command, &ctx).await {
		error!(target = "fitform", error = %err, "command failed");
		std::process::exit(1);
	}
}
