use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// One named segment of a breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Inhale,
    Hold,
    Exhale,
    /// Second hold after the exhale. Skipped when its duration is zero.
    Hold2,
}

impl Phase {
    /// Label shown to the user. Both holds read "Hold".
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Inhale => "Inhale",
            Phase::Hold | Phase::Hold2 => "Hold",
            Phase::Exhale => "Exhale",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Inhale => "inhale",
            Phase::Hold => "hold",
            Phase::Exhale => "exhale",
            Phase::Hold2 => "hold2",
        };
        f.write_str(name)
    }
}

/// Per-phase durations in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDurations {
    pub inhale: u32,
    pub hold: u32,
    pub exhale: u32,
    /// Zero means the second hold is skipped entirely.
    #[serde(default)]
    pub hold2: u32,
}

impl PhaseDurations {
    pub fn get(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Inhale => self.inhale,
            Phase::Hold => self.hold,
            Phase::Exhale => self.exhale,
            Phase::Hold2 => self.hold2,
        }
    }

    /// Seconds in one full cycle. A zero `hold2` contributes nothing.
    pub fn cycle_secs(&self) -> u32 {
        self.inhale + self.hold + self.exhale + self.hold2
    }

    /// Invariant: `inhale`, `hold`, and `exhale` are each > 0.
    fn first_invalid_phase(&self) -> Option<Phase> {
        [Phase::Inhale, Phase::Hold, Phase::Exhale]
            .into_iter()
            .find(|&phase| self.get(phase) == 0)
    }
}

/// Immutable breathing exercise configuration, selected by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathingProfile {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub benefits: String,
    pub phases: PhaseDurations,
}

impl BreathingProfile {
    /// # Errors
    /// Returns `InvalidProfileConfiguration` if a required phase is zero.
    pub fn validate(&self) -> Result<(), SessionError> {
        match self.phases.first_invalid_phase() {
            Some(phase) => Err(SessionError::InvalidProfileConfiguration {
                profile: self.id.clone(),
                phase,
            }),
            None => Ok(()),
        }
    }

    /// Inhale, hold, exhale, and hold for equal counts of 4 seconds each.
    pub fn box_breathing() -> Self {
        Self {
            id: "box".into(),
            name: "Box Breathing".into(),
            description: "Inhale, hold, exhale, and hold for equal counts of 4 seconds each"
                .into(),
            benefits: "Reduces stress and improves concentration".into(),
            phases: PhaseDurations {
                inhale: 4,
                hold: 4,
                exhale: 4,
                hold2: 4,
            },
        }
    }

    /// Inhale for 4 seconds, hold for 7 seconds, exhale for 8 seconds.
    pub fn four_seven_eight() -> Self {
        Self {
            id: "478".into(),
            name: "4-7-8 Breathing".into(),
            description: "Inhale for 4 seconds, hold for 7 seconds, exhale for 8 seconds".into(),
            benefits: "Helps with anxiety, sleep, and stress management".into(),
            phases: PhaseDurations {
                inhale: 4,
                hold: 7,
                exhale: 8,
                hold2: 0,
            },
        }
    }

    /// Slow, deep breathing with a longer exhale.
    pub fn calming_breath() -> Self {
        Self {
            id: "calm".into(),
            name: "Calming Breath".into(),
            description: "Slow, deep breathing with a longer exhale to calm the nervous system"
                .into(),
            benefits: "Reduces anxiety and promotes relaxation".into(),
            phases: PhaseDurations {
                inhale: 5,
                hold: 2,
                exhale: 6,
                hold2: 0,
            },
        }
    }

    /// The built-in exercise catalog.
    pub fn builtin() -> Vec<Self> {
        vec![
            Self::box_breathing(),
            Self::four_seven_eight(),
            Self::calming_breath(),
        ]
    }

    /// Look up a built-in exercise by id.
    pub fn by_id(id: &str) -> Option<Self> {
        Self::builtin().into_iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_3_exercises() {
        let profiles = BreathingProfile::builtin();
        assert_eq!(profiles.len(), 3);
        for p in &profiles {
            assert!(p.validate().is_ok());
        }
    }

    #[test]
    fn box_cycle_is_16_seconds() {
        assert_eq!(BreathingProfile::box_breathing().phases.cycle_secs(), 16);
    }

    #[test]
    fn four_seven_eight_cycle_is_19_seconds() {
        let p = BreathingProfile::four_seven_eight();
        assert_eq!(p.phases.cycle_secs(), 19);
        assert_eq!(p.phases.hold2, 0);
    }

    #[test]
    fn by_id_finds_builtins() {
        assert_eq!(BreathingProfile::by_id("478").unwrap().name, "4-7-8 Breathing");
        assert!(BreathingProfile::by_id("missing").is_none());
    }

    #[test]
    fn zero_required_phase_is_invalid() {
        let mut p = BreathingProfile::box_breathing();
        p.phases.hold = 0;
        let err = p.validate().unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidProfileConfiguration {
                phase: Phase::Hold,
                ..
            }
        ));
    }

    #[test]
    fn zero_hold2_is_valid() {
        let mut p = BreathingProfile::box_breathing();
        p.phases.hold2 = 0;
        assert!(p.validate().is_ok());
        assert_eq!(p.phases.cycle_secs(), 12);
    }
}
