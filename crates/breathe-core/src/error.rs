//! Core error types for breathe-core.
//!
//! This module defines the error hierarchy using thiserror. Only invalid run
//! requests surface synchronously as errors; invalid lifecycle transitions
//! are silent no-ops logged at debug level, and environmental failures
//! (keep-awake, audio) are swallowed by the boundary that owns them.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for breathe-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid run request
    #[error("Start error: {0}")]
    Start(#[from] StartError),

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

/// Errors that reject a start request before any state changes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StartError {
    /// Requested technique id does not exist in the catalog
    #[error("Unknown technique: {0}")]
    UnknownTechnique(String),

    /// Requested cycle count is outside the technique's supported range
    #[error("Cycle count {requested} out of range (1-{max})")]
    CyclesOutOfRange { requested: u32, max: u32 },
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
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CoreError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CoreError::Custom(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
