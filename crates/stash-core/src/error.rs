//! Core error types for stash-core.
//!
//! The streak computation itself never fails; these errors cover the
//! surrounding I/O: loading history snapshots, the achievement flag store,
//! and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for stash-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// History snapshot errors
    #[error("History error: {0}")]
    History(#[from] HistoryError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

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

    /// Data directory could not be prepared
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Errors reading a saved-song history snapshot.
#[derive(Error, Debug)]
pub enum HistoryError {
    /// The file could not be read
    #[error("Failed to read history from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not a history document
    #[error("Malformed history in {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Timestamp supplied by a caller could not be parsed
    #[error("Invalid timestamp '{0}': expected RFC 3339 (e.g. 2024-01-10T12:00:00Z)")]
    InvalidTimestamp(String),

    /// UTC offset outside what a calendar zone can express
    #[error("UTC offset of {minutes} minutes is out of range (-1439..=1439)")]
    OffsetOutOfRange { minutes: i32 },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
