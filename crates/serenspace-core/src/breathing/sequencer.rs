//! Breathing session state machine.
//!
//! The sequencer is a tick-driven state machine. It does not own a timer --
//! the caller (or its scheduling collaborator) is responsible for calling
//! `tick()` once per elapsed second of running time, and for supplying the
//! timestamps stamped onto events.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused | Completed)
//! ```
//!
//! Phases advance in the fixed order `inhale -> hold -> exhale -> hold2 ->
//! inhale`, skipping `hold2` when its configured duration is zero. The
//! completed-cycle counter is incremented at the single checkpoint where the
//! sequence wraps back to `inhale`; that checkpoint is also the only place
//! the target-cycle comparison happens.
//!
//! ## Usage
//!
//! ```ignore
//! let mut session = BreathingSequencer::new(profile, 3)?;
//! session.start(now)?;
//! // Once per second while running:
//! session.tick(now); // Returns Some(Event) on a phase or cycle boundary
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::profile::{BreathingProfile, Phase};
use crate::error::SessionError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Idle,
    Running,
    Paused,
    Completed,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Running => "running",
            SessionStatus::Paused => "paused",
            SessionStatus::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Guided breathing session.
///
/// Owns its profile exclusively; switching exercises replaces it wholesale.
/// Serializable so the caller can persist a session between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreathingSequencer {
    profile: BreathingProfile,
    status: SessionStatus,
    phase: Phase,
    /// Countdown within the current phase, in seconds.
    remaining_secs: u32,
    completed_cycles: u32,
    target_cycles: u32,
}

impl BreathingSequencer {
    /// Create a session for the given exercise.
    ///
    /// Starts in the `Idle` state at the beginning of the inhale phase.
    /// `target_cycles` is clamped to at least one cycle.
    ///
    /// # Errors
    /// Returns `InvalidProfileConfiguration` if `inhale`, `hold`, or
    /// `exhale` is zero.
    pub fn new(profile: BreathingProfile, target_cycles: u32) -> Result<Self, SessionError> {
        profile.validate()?;
        let remaining_secs = profile.phases.inhale;
        Ok(Self {
            profile,
            status: SessionStatus::Idle,
            phase: Phase::Inhale,
            remaining_secs,
            completed_cycles: 0,
            target_cycles: target_cycles.max(1),
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }

    pub fn target_cycles(&self) -> u32 {
        self.target_cycles
    }

    pub fn profile(&self) -> &BreathingProfile {
        &self.profile
    }

    /// Configured duration of the current phase, in seconds.
    pub fn phase_secs(&self) -> u32 {
        self.profile.phases.get(self.phase)
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn phase_progress(&self) -> f64 {
        let total = self.phase_secs();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / total as f64)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self, at: DateTime<Utc>) -> Event {
        Event::StateSnapshot {
            status: self.status,
            profile_id: self.profile.id.clone(),
            phase: self.phase,
            phase_label: self.phase.label().to_string(),
            remaining_secs: self.remaining_secs,
            phase_secs: self.phase_secs(),
            phase_progress: self.phase_progress(),
            completed_cycles: self.completed_cycles,
            target_cycles: self.target_cycles,
            at,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Arm the session. Resumes when paused.
    ///
    /// Resuming never advances the countdown by itself -- the first
    /// decrement after a resume happens on the next injected tick.
    ///
    /// # Errors
    /// Returns `IllegalStateTransition` when the session is completed.
    pub fn start(&mut self, at: DateTime<Utc>) -> Result<Option<Event>, SessionError> {
        match self.status {
            SessionStatus::Idle => {
                self.status = SessionStatus::Running;
                Ok(Some(Event::SessionStarted {
                    profile_id: self.profile.id.clone(),
                    phase: self.phase,
                    remaining_secs: self.remaining_secs,
                    target_cycles: self.target_cycles,
                    at,
                }))
            }
            SessionStatus::Paused => {
                self.status = SessionStatus::Running;
                Ok(Some(Event::SessionResumed {
                    phase: self.phase,
                    remaining_secs: self.remaining_secs,
                    at,
                }))
            }
            SessionStatus::Running => Ok(None), // Already running.
            SessionStatus::Completed => Err(SessionError::IllegalStateTransition {
                action: "start",
                status: self.status,
            }),
        }
    }

    /// Stop advancing without touching phase or remaining time.
    pub fn pause(&mut self, at: DateTime<Utc>) -> Option<Event> {
        match self.status {
            SessionStatus::Running => {
                self.status = SessionStatus::Paused;
                Some(Event::SessionPaused {
                    phase: self.phase,
                    remaining_secs: self.remaining_secs,
                    at,
                })
            }
            _ => None,
        }
    }

    /// Return to the initial state for the current profile, discarding
    /// cycle progress.
    pub fn reset(&mut self, at: DateTime<Utc>) -> Event {
        self.status = SessionStatus::Idle;
        self.phase = Phase::Inhale;
        self.remaining_secs = self.profile.phases.inhale;
        self.completed_cycles = 0;
        Event::SessionReset { at }
    }

    /// Change the target cycle count.
    ///
    /// Takes effect only at future cycle-boundary checks; an already
    /// exceeded target never completes the session mid-cycle.
    pub fn set_target_cycles(&mut self, target_cycles: u32) {
        self.target_cycles = target_cycles.max(1);
    }

    /// Replace the exercise, producing a fresh session with the same
    /// target cycle count.
    ///
    /// # Errors
    /// Returns `IllegalStateTransition` while running, or
    /// `InvalidProfileConfiguration` for a bad profile.
    pub fn switch_profile(
        &mut self,
        profile: BreathingProfile,
        at: DateTime<Utc>,
    ) -> Result<Event, SessionError> {
        if self.status == SessionStatus::Running {
            return Err(SessionError::IllegalStateTransition {
                action: "switch profile",
                status: self.status,
            });
        }
        profile.validate()?;
        self.status = SessionStatus::Idle;
        self.phase = Phase::Inhale;
        self.remaining_secs = profile.phases.inhale;
        self.completed_cycles = 0;
        self.profile = profile;
        Ok(Event::ProfileSwitched {
            profile_id: self.profile.id.clone(),
            at,
        })
    }

    /// Advance one second of running time.
    ///
    /// A no-op unless the session is running, so a paused or completed
    /// session can never be decremented by a stale tick. Returns an event
    /// on phase entry, cycle completion, and session completion.
    pub fn tick(&mut self, at: DateTime<Utc>) -> Option<Event> {
        if self.status != SessionStatus::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        Some(self.advance(at))
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn advance(&mut self, at: DateTime<Utc>) -> Event {
        let next = match self.phase {
            Phase::Inhale => Phase::Hold,
            Phase::Hold => Phase::Exhale,
            Phase::Exhale if self.profile.phases.hold2 > 0 => Phase::Hold2,
            Phase::Exhale | Phase::Hold2 => Phase::Inhale,
        };

        if next == Phase::Inhale {
            // Cycle boundary: count the finished cycle before the new
            // inhale begins. This is the only completion checkpoint.
            self.completed_cycles += 1;
            self.phase = Phase::Inhale;
            self.remaining_secs = self.profile.phases.inhale;
            if self.completed_cycles >= self.target_cycles {
                self.status = SessionStatus::Completed;
                return Event::SessionCompleted {
                    profile_id: self.profile.id.clone(),
                    cycles: self.completed_cycles,
                    at,
                };
            }
            return Event::CycleCompleted {
                completed_cycles: self.completed_cycles,
                target_cycles: self.target_cycles,
                at,
            };
        }

        self.phase = next;
        self.remaining_secs = self.profile.phases.get(next);
        Event::PhaseAdvanced {
            phase: next,
            duration_secs: self.remaining_secs,
            at,
        }
    }
}
