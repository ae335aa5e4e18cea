//! Tracing setup for the binary.

use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber on stderr so log lines never mix
/// with command output. Verbosity: 0 warn, 1 info, 2+ debug; a RUST_LOG
/// value takes precedence over the flag.
pub fn init_logging(verbose: u8) {
	let default_level = match verbose {
		0 => "warn",
		1 => "info",
		_ => "debug",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.try_init();
}
