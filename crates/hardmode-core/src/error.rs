//! Core error types for hardmode-core.
//!
//! Timer errors are local and non-fatal: a failed transition leaves the
//! state machine untouched. Storage and configuration errors come from the
//! host-side collaborators and never reach the state machine.

use std::path::PathBuf;
use thiserror::Error;

use crate::timer::Phase;

/// Core error type for hardmode-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Timer transition errors
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by [`crate::timer::TimerFsm`] operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// The operation is not legal in the current phase.
    #[error("cannot {operation} while in {phase} phase")]
    InvalidState {
        operation: &'static str,
        phase: Phase,
    },

    /// The caller supplied an unusable value (e.g. a blank task name).
    #[error("invalid input: {0}")]
    InvalidInput(String),
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

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// A referenced row does not exist
    #[error("No {kind} with id {id}")]
    NotFound { kind: &'static str, id: i64 },

    /// The day's plan already has a task with this name (ignoring case)
    #[error("Task '{0}' is already on today's plan")]
    DuplicateTask(String),

    /// The day's plan has no task with this name
    #[error("No task named '{0}' on today's plan")]
    UnknownTask(String),
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

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Data directory could not be prepared
    #[error("Data directory unavailable: {0}")]
    DataDir(#[source] std::io::Error),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg) if e.code == rusqlite::ErrorCode::DatabaseLocked => {
                DatabaseError::Locked
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
