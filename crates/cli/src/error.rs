use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
	#[error(transparent)]
	Client(#[from] fitform::ClientError),

	/// Bad command-line input, caught before any request.
	#[error("{0}")]
	Usage(String),

	#[error("io error: {0}")]
	Io(#[from] std::io::Error),

	#[error("{0}")]
	Json(#[from] serde_json::Error),
}
