use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::breathing::{Phase, SessionStatus};
use crate::streak::{ActivityKind, StreakRecord};

/// Every state change in the system produces an Event.
/// The presentation layer consumes these; the CLI prints them as JSON.
/// Timestamps are stamped by the caller from its injected clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        profile_id: String,
        phase: Phase,
        remaining_secs: u32,
        target_cycles: u32,
        at: DateTime<Utc>,
    },
    SessionPaused {
        phase: Phase,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    SessionResumed {
        phase: Phase,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// Entered a new phase mid-cycle.
    PhaseAdvanced {
        phase: Phase,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    /// The sequence wrapped back to inhale with cycles still to go.
    CycleCompleted {
        completed_cycles: u32,
        target_cycles: u32,
        at: DateTime<Utc>,
    },
    /// The target cycle count was reached; the session is frozen.
    SessionCompleted {
        profile_id: String,
        cycles: u32,
        at: DateTime<Utc>,
    },
    SessionReset {
        at: DateTime<Utc>,
    },
    ProfileSwitched {
        profile_id: String,
        at: DateTime<Utc>,
    },
    StreakUpdated {
        kind: ActivityKind,
        streak: StreakRecord,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        status: SessionStatus,
        profile_id: String,
        phase: Phase,
        phase_label: String,
        remaining_secs: u32,
        phase_secs: u32,
        phase_progress: f64,
        completed_cycles: u32,
        target_cycles: u32,
        at: DateTime<Utc>,
    },
}
