//! Core error types for time-wizard-core.
//!
//! Only configuration and kanban persistence can fail. The interactive
//! engine itself never returns errors: unresolvable reminder expressions
//! are excluded from polls and audio failures are swallowed.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for time-wizard-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Kanban store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to locate or create the data directory
    #[error("Failed to access data directory: {0}")]
    DataDir(String),

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the schema
    #[error("unknown config key: {0}")]
    UnknownKey(String),
}

/// Kanban store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access data directory: {0}")]
    DataDir(String),

    #[error("Failed to read/write kanban file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse kanban JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Task with id {0} doesn't exist")]
    TaskNotFound(u32),

    #[error("Task with id {0} already exists")]
    TaskExists(u32),

    #[error("Board '{0}' doesn't exist")]
    BoardNotFound(String),

    #[error("Board with id {0} already exists")]
    BoardExists(u32),

    #[error("{0} name must not be empty")]
    EmptyName(&'static str),

    #[error("No free id left")]
    IdSpaceExhausted,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
