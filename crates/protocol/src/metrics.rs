//! Live metrics payloads delivered over the `/cv/metrics` event stream.

use serde::{Deserialize, Serialize};

/// Per-frame form quality metrics computed by the backend.
///
/// Early frames (before a body is detected) omit some or all keys, so
/// every field defaults to zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormMetrics {
	pub shoulder_elevation: f64,
	pub elbow_flare: f64,
	pub torso_lean: f64,
	pub rom_percentage: f64,
}

/// One snapshot of the live rep-counting state.
///
/// Each stream message carries a complete snapshot; consumers replace
/// their previous value wholesale rather than merging fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsSnapshot {
	pub reps: u64,
	pub angle: f64,
	pub feedback: String,
	pub form_metrics: FormMetrics,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn snapshot_without_form_metrics_defaults_to_zero() {
		let snapshot: MetricsSnapshot =
			serde_json::from_str(r#"{"reps": 4, "angle": 52.0, "feedback": "Full curl!"}"#).unwrap();
		assert_eq!(snapshot.reps, 4);
		assert_eq!(snapshot.form_metrics, FormMetrics::default());
	}

	#[test]
	fn partial_form_metrics_fill_missing_keys() {
		let snapshot: MetricsSnapshot = serde_json::from_str(
			r#"{"reps": 1, "angle": 160.0, "feedback": "ok", "form_metrics": {"rom_percentage": 87.5}}"#,
		)
		.unwrap();
		assert_eq!(snapshot.form_metrics.rom_percentage, 87.5);
		assert_eq!(snapshot.form_metrics.elbow_flare, 0.0);
	}
}
