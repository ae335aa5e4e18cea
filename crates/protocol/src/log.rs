//! Payloads for the REST persistence API: manual workout logs, session
//! history, advice, and journal entries.

use serde::{Deserialize, Serialize};

/// One set of a manually logged exercise.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
	pub reps: u32,
	pub weight: f64,
}

/// One exercise with its sets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Workout {
	pub name: String,
	pub sets: Vec<WorkoutSet>,
}

/// Body of `POST /api/sessions`: the whole log is posted atomically.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogSessionRequest {
	pub user_id: String,
	pub workouts: Vec<Workout>,
}

/// Stored workout session returned by `GET /api/sessions`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
	#[serde(default, alias = "_id")]
	pub id: String,
	pub user_id: String,
	#[serde(default)]
	pub workouts: Vec<Workout>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub finished_at: Option<String>,
}

/// Response of `GET /api/advice/{user_id}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AdviceResponse {
	pub advice: String,
}

/// Body of `POST /api/entries`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalEntryCreate {
	pub content: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_id: Option<String>,
}

/// Stored journal entry returned by the `/api/entries` endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
	#[serde(default, alias = "_id")]
	pub id: String,
	pub content: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn session_record_accepts_mongo_style_id() {
		let record: SessionRecord = serde_json::from_str(
			r#"{"_id": "6523a1f8", "user_id": "user_1", "workouts": [], "finished_at": "2025-04-27T15:30:00Z"}"#,
		)
		.unwrap();
		assert_eq!(record.id, "6523a1f8");
		assert_eq!(record.user_id, "user_1");
	}

	#[test]
	fn log_request_serializes_nested_sets() {
		let request = LogSessionRequest {
			user_id: "user_1".to_string(),
			workouts: vec![Workout {
				name: "Bench Press".to_string(),
				sets: vec![WorkoutSet { reps: 8, weight: 185.0 }, WorkoutSet { reps: 6, weight: 195.0 }],
			}],
		};
		let wire = serde_json::to_value(&request).unwrap();
		assert_eq!(wire["workouts"][0]["sets"][1]["reps"], 6);
	}
}
