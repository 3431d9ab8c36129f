//! Core error types for soultracker-core.
//!
//! The classifier never fails. The ledger and booster award only ever raise
//! [`LedgerError`]; the store and configuration layers have their own enums,
//! all of which fold into [`CoreError`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for soultracker-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Check-in / award validation errors
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// User store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Local validation failures of the check-in ledger and booster award.
///
/// Values are never clamped; the caller must reject the update.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A supplied streak or point balance is negative
    #[error("Invalid state: '{field}' must not be negative (got {value})")]
    InvalidState { field: &'static str, value: i64 },

    /// A negative award was requested
    #[error("Invalid argument: '{field}' must not be negative (got {value})")]
    InvalidArgument { field: &'static str, value: i64 },
}

/// User store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No record for the given id or email
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Another record already uses this email
    #[error("An account with this email already exists: {0}")]
    DuplicateEmail(String),

    /// A writer panicked while holding the store lock
    #[error("User store lock poisoned")]
    Poisoned,

    /// Failed to open the database file
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// A stored row could not be decoded
    #[error("Corrupt record for '{id}': {message}")]
    Corrupt { id: String, message: String },
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

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// No usable data directory
    #[error("Cannot determine data directory: {0}")]
    NoDataDir(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
