//! Core error types for serenspace-core.
//!
//! This module defines the error hierarchy using thiserror. Session and
//! streak errors are contract violations surfaced to the caller; storage
//! and config errors wrap the persistence collaborator's failures.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::breathing::{Phase, SessionStatus};

/// Core error type for serenspace-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Breathing session errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Streak calculation errors
    #[error("Streak error: {0}")]
    Streak(#[from] StreakError),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Breathing session errors.
#[derive(Error, Debug)]
pub enum SessionError {
    /// A required phase has a zero duration. `hold2` is exempt: zero there
    /// means the phase is skipped.
    #[error("invalid profile '{profile}': phase '{phase}' must be longer than zero seconds")]
    InvalidProfileConfiguration { profile: String, phase: Phase },

    /// The requested command is not legal in the session's current status.
    #[error("cannot {action} while session is {status}")]
    IllegalStateTransition {
        action: &'static str,
        status: SessionStatus,
    },
}

/// Streak calculation errors.
#[derive(Error, Debug)]
pub enum StreakError {
    /// The supplied activity date precedes the recorded one. Clock skew and
    /// out-of-order events are surfaced, never silently corrected.
    #[error("invalid temporal order: activity date {today} precedes recorded date {last}")]
    InvalidTemporalOrder { last: NaiveDate, today: NaiveDate },
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Data directory could not be created or determined
    #[error("Data directory unavailable: {0}")]
    DataDir(#[from] std::io::Error),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        DatabaseError::QueryFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
