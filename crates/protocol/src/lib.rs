//! Wire types for the FitForm coaching backend.
//!
//! This crate contains the serde-serializable types used for communication
//! with the capture backend (the `/cv/*` control endpoints plus the
//! server-sent-event metrics stream) and the REST persistence API
//! (`/api/*`). These types represent the "protocol layer" - the shapes of
//! data as they appear on the wire.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! * Pure data: No behavior beyond serialization, defaults, and field
//!   validation
//! * 1:1 with the backend: field names match the backend's JSON exactly
//! * Stable: Changes only when the wire contract changes
//!
//! The stateful session controller built on top of these types lives in
//! `fitform-client`.

pub mod feedback;
pub mod log;
pub mod metrics;
pub mod session;

pub use feedback::*;
pub use log::*;
pub use metrics::*;
pub use session::*;
