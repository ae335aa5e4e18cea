//! Control payloads for the capture-session lifecycle endpoints.

use serde::{Deserialize, Serialize};

/// Who is training and why, sent with `POST /cv/start_session`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
	pub user_id: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub goal: Option<String>,
	#[serde(rename = "experienceLevel", skip_serializing_if = "Option::is_none")]
	pub experience_level: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
}

/// Body of `POST /cv/start_session`. The backend accepts a zero weight.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StartSessionRequest {
	pub weight: f64,
	#[serde(rename = "userContext")]
	pub user_context: UserContext,
}

/// Generic `{status, message}` acknowledgement returned by the control
/// endpoints. Only a literal `"success"` status counts as success; the
/// session controller never advances on anything else.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
	pub status: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
}

impl StatusResponse {
	pub fn is_success(&self) -> bool {
		self.status == "success"
	}
}

/// Response of `POST /cv/end_set`: the ack plus the aggregate metrics the
/// backend computed for the completed set. The metrics blob is opaque to
/// the lifecycle logic and only rendered for the user.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EndSetResponse {
	pub status: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub metrics: Option<serde_json::Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub total_reps: Option<u64>,
}

impl EndSetResponse {
	pub fn is_success(&self) -> bool {
		self.status == "success"
	}
}

/// Session-level summary sent with `POST /cv/end_session`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EndSessionRequest {
	#[serde(rename = "overallFeeling", skip_serializing_if = "Option::is_none")]
	pub overall_feeling: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
	#[serde(rename = "totalSets", skip_serializing_if = "Option::is_none")]
	pub total_sets: Option<u32>,
}

/// Response of `POST /cv/end_session`. A present `filename` names the
/// saved session file, retrievable via `GET /cv/download_session/{filename}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EndSessionResponse {
	pub status: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub filename: Option<String>,
}

impl EndSessionResponse {
	pub fn is_success(&self) -> bool {
		self.status == "success"
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn start_session_request_uses_camel_case_wire_names() {
		let request = StartSessionRequest {
			weight: 20.0,
			user_context: UserContext {
				user_id: "user_1".to_string(),
				goal: Some("Technique Improvement".to_string()),
				experience_level: Some("Beginner".to_string()),
				notes: None,
			},
		};
		let wire = serde_json::to_value(&request).unwrap();
		assert_eq!(wire["userContext"]["user_id"], "user_1");
		assert_eq!(wire["userContext"]["experienceLevel"], "Beginner");
		assert!(wire["userContext"].get("notes").is_none());
	}

	#[test]
	fn only_literal_success_counts() {
		let ok: StatusResponse = serde_json::from_str(r#"{"status": "success"}"#).unwrap();
		let err: StatusResponse =
			serde_json::from_str(r#"{"status": "error", "message": "No active session"}"#).unwrap();
		assert!(ok.is_success());
		assert!(!err.is_success());
	}

	#[test]
	fn end_session_response_carries_optional_filename() {
		let response: EndSessionResponse =
			serde_json::from_str(r#"{"status": "success", "filename": "session_42.json"}"#).unwrap();
		assert!(response.is_success());
		assert_eq!(response.filename.as_deref(), Some("session_42.json"));
	}
}
