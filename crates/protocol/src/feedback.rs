//! Subjective per-set feedback, collected after every completed set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Why the set ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FatigueReason {
	#[default]
	TargetRepsMet,
	MuscularFailure,
	FormBreakdown,
	Pain,
	Other,
}

impl FromStr for FatigueReason {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"target_reps_met" | "target" => Ok(FatigueReason::TargetRepsMet),
			"muscular_failure" | "failure" => Ok(FatigueReason::MuscularFailure),
			"form_breakdown" | "form" => Ok(FatigueReason::FormBreakdown),
			"pain" => Ok(FatigueReason::Pain),
			"other" => Ok(FatigueReason::Other),
			_ => Err(format!("unknown fatigue reason: {s}")),
		}
	}
}

impl fmt::Display for FatigueReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			FatigueReason::TargetRepsMet => "target_reps_met",
			FatigueReason::MuscularFailure => "muscular_failure",
			FatigueReason::FormBreakdown => "form_breakdown",
			FatigueReason::Pain => "pain",
			FatigueReason::Other => "other",
		};
		write!(f, "{name}")
	}
}

/// Where the set was felt most. Wire names are capitalized, matching the
/// backend's stored values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MuscleFocus {
	#[default]
	Biceps,
	Forearms,
	Shoulders,
	Back,
	Other,
}

impl FromStr for MuscleFocus {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"biceps" => Ok(MuscleFocus::Biceps),
			"forearms" => Ok(MuscleFocus::Forearms),
			"shoulders" => Ok(MuscleFocus::Shoulders),
			"back" => Ok(MuscleFocus::Back),
			"other" => Ok(MuscleFocus::Other),
			_ => Err(format!("unknown muscle focus: {s}")),
		}
	}
}

impl fmt::Display for MuscleFocus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			MuscleFocus::Biceps => "Biceps",
			MuscleFocus::Forearms => "Forearms",
			MuscleFocus::Shoulders => "Shoulders",
			MuscleFocus::Back => "Back",
			MuscleFocus::Other => "Other",
		};
		write!(f, "{name}")
	}
}

/// Body of `POST /cv/submit_set_feedback`. Built fresh for every set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetFeedback {
	pub rpe: f64,
	pub rir: f64,
	pub fatigue_reason: FatigueReason,
	pub muscle_focus: MuscleFocus,
	pub pain_flag: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub pain_location: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub notes: Option<String>,
}

impl SetFeedback {
	/// Checks the field constraints the backend enforces, so an invalid
	/// submission is rejected before any request is sent: RPE in 1-10,
	/// RIR in 0-10, and a pain location whenever pain is flagged.
	pub fn validate(&self) -> Result<(), String> {
		if !(1.0..=10.0).contains(&self.rpe) {
			return Err(format!("rpe must be between 1 and 10, got {}", self.rpe));
		}
		if !(0.0..=10.0).contains(&self.rir) {
			return Err(format!("rir must be between 0 and 10, got {}", self.rir));
		}
		if self.pain_flag && self.pain_location.as_deref().unwrap_or("").trim().is_empty() {
			return Err("pain location is required when pain is flagged".to_string());
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn feedback() -> SetFeedback {
		SetFeedback {
			rpe: 8.0,
			rir: 2.0,
			fatigue_reason: FatigueReason::TargetRepsMet,
			muscle_focus: MuscleFocus::Biceps,
			pain_flag: false,
			pain_location: None,
			notes: None,
		}
	}

	#[test]
	fn wire_names_match_backend() {
		let wire = serde_json::to_value(feedback()).unwrap();
		assert_eq!(wire["rpe"], 8.0);
		assert_eq!(wire["fatigueReason"], "target_reps_met");
		assert_eq!(wire["muscleFocus"], "Biceps");
		assert_eq!(wire["painFlag"], false);
	}

	#[test]
	fn rpe_out_of_range_rejected() {
		let mut fb = feedback();
		fb.rpe = 11.0;
		assert!(fb.validate().is_err());
		fb.rpe = f64::NAN;
		assert!(fb.validate().is_err());
	}

	#[test]
	fn rir_out_of_range_rejected() {
		let mut fb = feedback();
		fb.rir = -1.0;
		assert!(fb.validate().is_err());
	}

	#[test]
	fn pain_flag_requires_location() {
		let mut fb = feedback();
		fb.pain_flag = true;
		assert!(fb.validate().is_err());
		fb.pain_location = Some("left elbow".to_string());
		assert!(fb.validate().is_ok());
	}

	#[test]
	fn reason_parses_from_cli_spellings() {
		assert_eq!("failure".parse::<FatigueReason>().unwrap(), FatigueReason::MuscularFailure);
		assert_eq!("form_breakdown".parse::<FatigueReason>().unwrap(), FatigueReason::FormBreakdown);
		assert!("tired".parse::<FatigueReason>().is_err());
	}
}
