//! Client library for the FitForm coaching backend.
//!
//! The backend owns everything hard: video capture, pose estimation, rep
//! counting, and advice generation. This crate owns the client's side of
//! the contract:
//!
//! * [`ApiClient`] - typed wrappers over the HTTP endpoints.
//! * [`SessionController`] - the session/set lifecycle state machine.
//!   The server is the source of truth; local state only advances after
//!   an explicit success acknowledgement.
//! * [`MetricsFeed`] - the server-sent-event metrics subscription, held
//!   open for exactly the lifetime of an active session and torn down on
//!   every exit path.
//!
//! Wire types live in `fitform-protocol` and are re-exported here for
//! convenience.

pub mod api;
pub mod controller;
pub mod error;
pub mod sse;

pub use api::ApiClient;
pub use controller::{Action, Controls, Event, Phase, SessionController, SessionHandle, SessionState};
pub use error::{ClientError, Result};
pub use fitform_protocol as protocol;
pub use sse::MetricsFeed;
