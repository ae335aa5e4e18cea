//! Error taxonomy for the client library.
//!
//! Three families, mirroring how failures are handled: validation and
//! transition errors are raised before any request is sent; backend and
//! transport errors surface after; best-effort cleanup failures are
//! swallowed at the call site and never reach this type. There is no
//! retry policy anywhere - every failure is terminal for that action.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
	/// Input rejected locally; no request was sent.
	#[error("{0}")]
	Validation(String),

	/// The lifecycle state machine refused the action; no request was sent.
	#[error("cannot {action}: {reason}")]
	InvalidTransition { action: &'static str, reason: String },

	/// The backend answered, but not with a success status.
	#[error("{action} failed: {message}")]
	Backend { action: &'static str, message: String },

	/// Transport-level failure (connection, TLS, timeout).
	#[error("request failed: {0}")]
	Http(#[from] reqwest::Error),

	/// A response body did not match the wire contract.
	#[error("invalid response payload: {0}")]
	Json(#[from] serde_json::Error),

	/// The configured base URL could not be parsed or joined.
	#[error("invalid url: {0}")]
	Url(#[from] url::ParseError),
}
