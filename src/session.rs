//! Breathing session descriptors
//!
//! A session descriptor is what the recommendation provider hands back: a
//! named technique plus the inhale/hold/exhale rhythm the scheduler runs.

use crate::scheduler::PhaseDurations;
use crate::{CalmcoreError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::warn;

/// How demanding a technique is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Advanced,
}

impl Difficulty {
    /// Parse a label leniently; anything unrecognised is `Medium`
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "easy" | "beginner" => Difficulty::Easy,
            "advanced" | "hard" => Difficulty::Advanced,
            _ => Difficulty::Medium,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Advanced => write!(f, "Advanced"),
        }
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.map(|l| Difficulty::from_label(&l)).unwrap_or_default())
    }
}

/// Phase lengths of one breathing cycle, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingsTriple {
    pub inhale: f64,
    #[serde(default)]
    pub hold: f64,
    pub exhale: f64,
}

impl TimingsTriple {
    /// Substitute for anything the scheduler would reject
    pub const SAFE_DEFAULT: TimingsTriple = TimingsTriple {
        inhale: 4.0,
        hold: 4.0,
        exhale: 4.0,
    };

    /// Longest accepted phase, in seconds
    pub const MAX_PHASE_SECONDS: f64 = 3600.0;

    pub fn new(inhale: f64, hold: f64, exhale: f64) -> Self {
        Self {
            inhale,
            hold,
            exhale,
        }
    }

    /// Length of one full cycle in seconds
    pub fn total_seconds(&self) -> f64 {
        self.inhale + self.hold + self.exhale
    }

    /// Breaths per minute at this rhythm
    pub fn breaths_per_minute(&self) -> f64 {
        let total = self.total_seconds();
        if total > 0.0 {
            60.0 / total
        } else {
            0.0
        }
    }

    /// Check the triple can drive the scheduler.
    ///
    /// Every value must be a finite, non-negative number of seconds no longer
    /// than [`Self::MAX_PHASE_SECONDS`], and at least one of inhale/exhale
    /// must be positive.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("inhale", self.inhale),
            ("hold", self.hold),
            ("exhale", self.exhale),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CalmcoreError::InvalidTimings(format!(
                    "{} must be a non-negative number of seconds, got {}",
                    name, value
                )));
            }
            if value > Self::MAX_PHASE_SECONDS {
                return Err(CalmcoreError::InvalidTimings(format!(
                    "{} of {}s exceeds the {}s limit",
                    name,
                    value,
                    Self::MAX_PHASE_SECONDS
                )));
            }
        }

        if self.inhale <= 0.0 && self.exhale <= 0.0 {
            return Err(CalmcoreError::InvalidTimings(format!(
                "cycle {} has neither an inhale nor an exhale",
                self
            )));
        }

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl fmt::Display for TimingsTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.inhale, self.hold, self.exhale)
    }
}

/// One recommended breathing technique
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub timings: TimingsTriple,
    #[serde(default)]
    pub instruction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_advice: Option<String>,
}

impl SessionDescriptor {
    /// Normalise a descriptor received from the provider.
    ///
    /// `position` is the zero-based index in the response and only feeds the
    /// generated id when none was supplied.
    pub fn sanitized(mut self, position: usize) -> Self {
        if self.id.as_deref().map_or(true, |id| id.trim().is_empty()) {
            self.id = Some(format!("option_{}", position + 1));
        }

        if let Err(e) = PhaseDurations::from_timings(&self.timings) {
            warn!(
                "Replacing timings of \"{}\" with {}: {}",
                self.title,
                TimingsTriple::SAFE_DEFAULT,
                e
            );
            self.timings = TimingsTriple::SAFE_DEFAULT;
        }

        self.warning = non_blank(self.warning);
        self.sequence_advice = non_blank(self.sequence_advice);
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Served when the provider fails for any reason
pub fn fallback_sessions() -> Vec<SessionDescriptor> {
    vec![
        SessionDescriptor {
            id: Some("fallback_1".to_string()),
            title: "Box Breathing".to_string(),
            description: "Classic technique to reset focus and calm nerves.".to_string(),
            difficulty: Difficulty::Medium,
            timings: TimingsTriple::new(4.0, 4.0, 4.0),
            instruction: "Find your square.".to_string(),
            warning: None,
            sequence_advice: Some("4 rounds".to_string()),
        },
        SessionDescriptor {
            id: Some("fallback_2".to_string()),
            title: "Physiological Sigh".to_string(),
            description: "Double inhale, long exhale to quickly offload CO2.".to_string(),
            difficulty: Difficulty::Easy,
            timings: TimingsTriple::new(2.0, 0.0, 6.0),
            instruction: "Double inhale... release.".to_string(),
            warning: None,
            sequence_advice: Some("5 times".to_string()),
        },
        SessionDescriptor {
            id: Some("fallback_3".to_string()),
            title: "4-7-8 Relax".to_string(),
            description: "Deep relaxation technique for sleep or calm.".to_string(),
            difficulty: Difficulty::Advanced,
            timings: TimingsTriple::new(4.0, 7.0, 8.0),
            instruction: "Soothe the system.".to_string(),
            warning: None,
            sequence_advice: Some("4 cycles".to_string()),
        },
    ]
}

/// Served when no provider credential is configured
pub fn missing_credential_sessions() -> Vec<SessionDescriptor> {
    vec![SessionDescriptor {
        id: Some("missing_key".to_string()),
        title: "Calming Breath".to_string(),
        description:
            "A simple breathing pattern to help you center yourself. (API Key Missing)"
                .to_string(),
        difficulty: Difficulty::Easy,
        timings: TimingsTriple::SAFE_DEFAULT,
        instruction: "Breathe gently.".to_string(),
        warning: None,
        sequence_advice: None,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_degenerate_cycles() {
        assert!(TimingsTriple::new(0.0, 0.0, 0.0).validate().is_err());
        assert!(TimingsTriple::new(0.0, 5.0, 0.0).validate().is_err());
        assert!(TimingsTriple::new(-1.0, 0.0, 4.0).validate().is_err());
        assert!(TimingsTriple::new(4.0, f64::NAN, 4.0).validate().is_err());
        assert!(TimingsTriple::new(4.0, 0.0, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_overlong_phases() {
        assert!(TimingsTriple::new(1e30, 0.0, 4.0).validate().is_err());
        assert!(TimingsTriple::new(4.0, f64::MAX, 4.0).validate().is_err());
        assert!(TimingsTriple::new(4.0, 0.0, 3600.5).validate().is_err());
        assert!(TimingsTriple::new(3600.0, 3600.0, 3600.0).validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_zero_phases() {
        assert!(TimingsTriple::new(2.0, 0.0, 6.0).validate().is_ok());
        assert!(TimingsTriple::new(0.0, 0.0, 6.0).validate().is_ok());
        assert!(TimingsTriple::new(4.0, 7.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_breaths_per_minute() {
        assert_eq!(TimingsTriple::new(4.0, 4.0, 4.0).breaths_per_minute(), 5.0);
        assert_eq!(TimingsTriple::new(0.0, 0.0, 0.0).breaths_per_minute(), 0.0);
    }

    #[test]
    fn test_difficulty_defaults_to_medium() {
        let json = r#"{"title":"Box","timings":{"inhale":4,"hold":4,"exhale":4}}"#;
        let descriptor: SessionDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.difficulty, Difficulty::Medium);

        let json = r#"{"title":"Box","difficulty":"easy","timings":{"inhale":4,"exhale":4}}"#;
        let descriptor: SessionDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.difficulty, Difficulty::Easy);
        assert_eq!(descriptor.timings.hold, 0.0);

        let json = r#"{"title":"Box","difficulty":"Legendary","timings":{"inhale":4,"exhale":4}}"#;
        let descriptor: SessionDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_sanitized_replaces_degenerate_timings() {
        let descriptor = SessionDescriptor {
            id: None,
            title: "Nothing".to_string(),
            description: String::new(),
            difficulty: Difficulty::Easy,
            timings: TimingsTriple::new(0.0, 0.0, 0.0),
            instruction: String::new(),
            warning: Some("   ".to_string()),
            sequence_advice: Some("3 rounds".to_string()),
        }
        .sanitized(1);

        assert_eq!(descriptor.timings, TimingsTriple::SAFE_DEFAULT);
        assert_eq!(descriptor.id.as_deref(), Some("option_2"));
        assert_eq!(descriptor.warning, None);
        assert_eq!(descriptor.sequence_advice.as_deref(), Some("3 rounds"));
    }

    #[test]
    fn test_sanitized_replaces_huge_timings() {
        let descriptor = SessionDescriptor {
            id: Some("option_1".to_string()),
            title: "Endless".to_string(),
            description: String::new(),
            difficulty: Difficulty::Advanced,
            timings: TimingsTriple::new(1e17, 0.0, 1e17),
            instruction: String::new(),
            warning: None,
            sequence_advice: None,
        }
        .sanitized(0);

        assert_eq!(descriptor.timings, TimingsTriple::SAFE_DEFAULT);
    }

    #[test]
    fn test_fallback_sets_are_well_formed() {
        let fallback = fallback_sessions();
        assert_eq!(fallback.len(), 3);
        assert!(fallback.iter().all(|s| s.timings.is_valid()));

        let difficulties: Vec<Difficulty> = fallback.iter().map(|s| s.difficulty).collect();
        assert!(difficulties.contains(&Difficulty::Easy));
        assert!(difficulties.contains(&Difficulty::Medium));
        assert!(difficulties.contains(&Difficulty::Advanced));

        let missing = missing_credential_sessions();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].timings, TimingsTriple::new(4.0, 4.0, 4.0));
    }
}
