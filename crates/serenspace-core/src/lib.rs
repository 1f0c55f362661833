//! # SerenSpace Core Library
//!
//! This library provides the core business logic for SerenSpace, a
//! mental-wellness companion. It follows a CLI-first philosophy where all
//! operations are available via a standalone CLI binary, with any richer
//! presentation layer being a thin shell over the same core library.
//!
//! ## Architecture
//!
//! - **Breathing Sequencer**: A tick-driven state machine that requires the
//!   caller to invoke `tick()` once per elapsed second of running time
//! - **Streak Calculator**: Pure functions over caller-supplied calendar
//!   dates -- the core never reads the wall clock on its own
//! - **Storage**: SQLite-based session/activity storage and TOML-based
//!   configuration
//!
//! ## Key Components
//!
//! - [`BreathingSequencer`]: Guided breathing session state machine
//! - [`record_activity`] / [`consecutive_day_count`]: Streak algorithms
//! - [`Database`]: Session, activity, and streak persistence
//! - [`Config`]: Application configuration management

pub mod breathing;
pub mod clock;
pub mod error;
pub mod events;
pub mod storage;
pub mod streak;

pub use breathing::{BreathingProfile, BreathingSequencer, Phase, PhaseDurations, SessionStatus};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, DatabaseError, SessionError, StreakError};
pub use events::Event;
pub use storage::{Config, Database};
pub use streak::{
    consecutive_day_count, record_activity, ActivityKind, StreakRecord, UserStreaks,
};
