//! The session/set lifecycle state machine.
//!
//! The client drives a multi-step remote lifecycle: idle, session active,
//! set active, feedback pending, session ending. The server is the source
//! of truth for whether an action succeeded - local state never advances
//! on request dispatch, only on an explicit success acknowledgement.
//! That split lives in two layers here:
//!
//! * [`SessionState`] - the pure core. [`SessionState::authorize`] is the
//!   precondition table (nothing is sent when it refuses), and
//!   [`SessionState::apply`] is the transition function over acknowledged
//!   [`Event`]s. Both are plain functions, testable without a runtime.
//! * [`SessionController`] - the async driver that owns the
//!   [`ApiClient`], the pure state, and the metrics subscription, and
//!   sequences authorize -> request -> apply for every action.

use fitform_protocol::{
	EndSessionRequest, EndSessionResponse, EndSetResponse, MetricsSnapshot, SetFeedback, StartSessionRequest,
	StatusResponse, UserContext,
};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::api::ApiClient;
use crate::error::{ClientError, Result};
use crate::sse::MetricsFeed;

/// Client-local view of where the remote session lifecycle stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
	#[default]
	Idle,
	SessionActive,
	SetActive,
	FeedbackPending,
	SessionEnding,
}

impl std::fmt::Display for Phase {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Phase::Idle => "idle",
			Phase::SessionActive => "session active",
			Phase::SetActive => "set active",
			Phase::FeedbackPending => "feedback pending",
			Phase::SessionEnding => "session ending",
		};
		write!(f, "{name}")
	}
}

/// User-triggered lifecycle actions, checked against the current phase
/// before any request goes out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
	StartSession,
	StartSet,
	EndSet,
	SubmitFeedback,
	UpdateNotes,
	EndSession,
}

impl Action {
	fn describe(self) -> &'static str {
		match self {
			Action::StartSession => "start session",
			Action::StartSet => "start set",
			Action::EndSet => "end set",
			Action::SubmitFeedback => "submit feedback",
			Action::UpdateNotes => "update notes",
			Action::EndSession => "end session",
		}
	}
}

/// Acknowledged lifecycle events. Only these move the state; a dispatched
/// request that fails produces no event (except the documented
/// `EndRequested`/`EndFailed` pair around `end_session`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
	SessionStarted,
	SetStarted,
	SetEnded,
	FeedbackAccepted,
	EndRequested,
	EndFailed,
	SessionClosed,
}

/// Which actions are currently available. Derived from the phase on
/// demand, never stored - the rendering layer reads this to enable or
/// disable controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Controls {
	pub can_start_session: bool,
	pub can_start_set: bool,
	pub can_end_set: bool,
	pub can_submit_feedback: bool,
	pub can_end_session: bool,
}

/// Identity of the one active remote capture session. Created on a
/// successful start acknowledgement, destroyed when the session closes.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionHandle {
	pub user_id: String,
	pub weight: f64,
}

/// The pure lifecycle core: phase plus the set counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionState {
	phase: Phase,
	current_set: u32,
}

impl Default for SessionState {
	fn default() -> Self {
		Self {
			phase: Phase::Idle,
			current_set: 1,
		}
	}
}

impl SessionState {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	/// Number of the set currently being performed or prepared. Starts at
	/// 1 and advances only when a feedback submission is acknowledged.
	pub fn current_set(&self) -> u32 {
		self.current_set
	}

	pub fn controls(&self) -> Controls {
		Controls {
			can_start_session: self.phase == Phase::Idle,
			can_start_set: self.phase == Phase::SessionActive,
			can_end_set: self.phase == Phase::SetActive,
			can_submit_feedback: self.phase == Phase::FeedbackPending,
			can_end_session: self.phase == Phase::SessionActive,
		}
	}

	/// The precondition table. A refusal means the request is never sent
	/// and the state is untouched.
	pub fn authorize(&self, action: Action) -> Result<()> {
		let reason = match (action, self.phase) {
			(Action::StartSession, Phase::Idle) => return Ok(()),
			(Action::StartSession, _) => "a session is already active",

			(Action::StartSet, Phase::SessionActive) => return Ok(()),
			(Action::StartSet, Phase::Idle) => "no session is active",
			(Action::StartSet, Phase::SetActive) => "a set is already open",
			(Action::StartSet, Phase::FeedbackPending) => "feedback for the previous set has not been submitted",
			(Action::StartSet, Phase::SessionEnding) => "the session is ending",

			(Action::EndSet, Phase::SetActive) => return Ok(()),
			(Action::EndSet, _) => "no set is active",

			(Action::SubmitFeedback, Phase::FeedbackPending) => return Ok(()),
			(Action::SubmitFeedback, _) => "no completed set is awaiting feedback",

			(Action::UpdateNotes, Phase::SessionActive | Phase::SetActive | Phase::FeedbackPending) => {
				return Ok(());
			}
			(Action::UpdateNotes, _) => "no session is active",

			(Action::EndSession, Phase::SessionActive) => return Ok(()),
			(Action::EndSession, Phase::FeedbackPending) => "set feedback is still pending; submit it first",
			(Action::EndSession, Phase::SetActive) => "a set is still open; end it first",
			(Action::EndSession, _) => "no session is active",
		};
		Err(ClientError::InvalidTransition {
			action: action.describe(),
			reason: reason.to_string(),
		})
	}

	/// The transition function over acknowledged events.
	pub fn apply(&mut self, event: Event) {
		match event {
			Event::SessionStarted => {
				self.phase = Phase::SessionActive;
				self.current_set = 1;
			}
			Event::SetStarted => self.phase = Phase::SetActive,
			Event::SetEnded => self.phase = Phase::FeedbackPending,
			Event::FeedbackAccepted => {
				self.phase = Phase::SessionActive;
				self.current_set += 1;
			}
			Event::EndRequested => self.phase = Phase::SessionEnding,
			Event::EndFailed => self.phase = Phase::SessionActive,
			Event::SessionClosed => {
				self.phase = Phase::Idle;
				self.current_set = 1;
			}
		}
	}
}

/// Async driver for the lifecycle. Owns all mutable session state; the
/// rendering layer only ever reads (phase, controls, metrics receiver).
pub struct SessionController {
	api: ApiClient,
	state: SessionState,
	session: Option<SessionHandle>,
	feed: Option<MetricsFeed>,
}

impl SessionController {
	pub fn new(api: ApiClient) -> Self {
		Self {
			api,
			state: SessionState::new(),
			session: None,
			feed: None,
		}
	}

	pub fn api(&self) -> &ApiClient {
		&self.api
	}

	pub fn phase(&self) -> Phase {
		self.state.phase()
	}

	pub fn current_set(&self) -> u32 {
		self.state.current_set()
	}

	pub fn controls(&self) -> Controls {
		self.state.controls()
	}

	pub fn session(&self) -> Option<&SessionHandle> {
		self.session.as_ref()
	}

	/// Read handle onto the live metrics stream; `None` while idle.
	pub fn metrics(&self) -> Option<watch::Receiver<MetricsSnapshot>> {
		self.feed.as_ref().map(MetricsFeed::subscribe)
	}

	/// Most recent snapshot, or the zero snapshot while idle.
	pub fn latest_metrics(&self) -> MetricsSnapshot {
		self.feed.as_ref().map(MetricsFeed::latest).unwrap_or_default()
	}

	/// Starts a capture session. Any stale remote session is force-closed
	/// first (best-effort, failures swallowed), then the start request is
	/// issued; only a success acknowledgement activates the local state
	/// and opens the metrics subscription.
	pub async fn start_session(
		&mut self,
		user_id: &str,
		weight: Option<f64>,
		goal: Option<String>,
		experience_level: Option<String>,
	) -> Result<()> {
		self.state.authorize(Action::StartSession)?;

		let user_id = user_id.trim();
		if user_id.is_empty() {
			return Err(ClientError::Validation("a user id is required".to_string()));
		}
		let weight = weight.unwrap_or(0.0);
		if !weight.is_finite() || weight < 0.0 {
			return Err(ClientError::Validation(format!("weight must be a non-negative number, got {weight}")));
		}

		self.api.clear_stale_session().await;

		let request = StartSessionRequest {
			weight,
			user_context: UserContext {
				user_id: user_id.to_string(),
				goal,
				experience_level,
				notes: None,
			},
		};
		let ack = self.api.start_session(&request).await?;
		ensure_success(&ack, Action::StartSession)?;

		self.feed = Some(MetricsFeed::open(&self.api)?);
		self.session = Some(SessionHandle {
			user_id: user_id.to_string(),
			weight,
		});
		self.state.apply(Event::SessionStarted);
		info!(target = "fitform.session", user_id, weight, "session started");
		Ok(())
	}

	pub async fn start_set(&mut self) -> Result<()> {
		self.state.authorize(Action::StartSet)?;
		let ack = self.api.start_set().await?;
		ensure_success(&ack, Action::StartSet)?;
		self.state.apply(Event::SetStarted);
		info!(target = "fitform.session", set = self.state.current_set(), "set started");
		Ok(())
	}

	/// Ends the active set. The backend's response carries the aggregate
	/// set metrics, returned here for display; the state only moves to
	/// feedback-pending on an explicit success status.
	pub async fn end_set(&mut self) -> Result<EndSetResponse> {
		self.state.authorize(Action::EndSet)?;
		let response = self.api.end_set().await?;
		if !response.is_success() {
			return Err(ClientError::Backend {
				action: Action::EndSet.describe(),
				message: response.message.unwrap_or_else(|| format!("backend returned status {:?}", response.status)),
			});
		}
		self.state.apply(Event::SetEnded);
		info!(
			target = "fitform.session",
			set = self.state.current_set(),
			total_reps = response.total_reps,
			"set ended, feedback pending"
		);
		Ok(response)
	}

	/// Submits feedback for the just-completed set. Validation runs
	/// before any request; the set counter advances only when the backend
	/// acknowledges the submission.
	pub async fn submit_feedback(&mut self, feedback: &SetFeedback) -> Result<()> {
		self.state.authorize(Action::SubmitFeedback)?;
		feedback.validate().map_err(ClientError::Validation)?;
		let ack = self.api.submit_set_feedback(feedback).await?;
		ensure_success(&ack, Action::SubmitFeedback)?;
		self.state.apply(Event::FeedbackAccepted);
		info!(
			target = "fitform.session",
			rpe = feedback.rpe,
			rir = feedback.rir,
			next_set = self.state.current_set(),
			"set feedback recorded"
		);
		Ok(())
	}

	/// Attaches free-text notes to the running session.
	pub async fn update_notes(&mut self, notes: &str) -> Result<()> {
		self.state.authorize(Action::UpdateNotes)?;
		let ack = self.api.update_session_notes(notes).await?;
		ensure_success(&ack, Action::UpdateNotes)?;
		Ok(())
	}

	/// Ends the session. Refused outright while feedback is pending or a
	/// set is open. On a success acknowledgement the metrics subscription
	/// is released and local state resets to idle unconditionally,
	/// whether or not the backend named a session file; on failure the
	/// session stays active.
	pub async fn end_session(&mut self, mut summary: EndSessionRequest) -> Result<EndSessionResponse> {
		self.state.authorize(Action::EndSession)?;

		if summary.total_sets.is_none() {
			summary.total_sets = Some(self.state.current_set().saturating_sub(1));
		}

		self.state.apply(Event::EndRequested);
		match self.api.end_session(&summary).await {
			Ok(response) if response.is_success() => {
				self.feed = None;
				self.session = None;
				self.state.apply(Event::SessionClosed);
				info!(target = "fitform.session", filename = response.filename.as_deref(), "session ended");
				Ok(response)
			}
			Ok(response) => {
				self.state.apply(Event::EndFailed);
				Err(ClientError::Backend {
					action: Action::EndSession.describe(),
					message: response.message.unwrap_or_else(|| format!("backend returned status {:?}", response.status)),
				})
			}
			Err(err) => {
				self.state.apply(Event::EndFailed);
				debug!(target = "fitform.session", error = %err, "end session failed; session stays active");
				Err(err)
			}
		}
	}
}

fn ensure_success(ack: &StatusResponse, action: Action) -> Result<()> {
	if ack.is_success() {
		return Ok(());
	}
	Err(ClientError::Backend {
		action: action.describe(),
		message: ack.message.clone().unwrap_or_else(|| format!("backend returned status {:?}", ack.status)),
	})
}
