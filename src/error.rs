//! Error types for kitup operations.
//!
//! This module defines [`KitupError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `KitupError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `KitupError::Other`) for unexpected errors
//! - Step errors never escape the runner; they become failed step outcomes

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for kitup operations.
#[derive(Debug, Error)]
pub enum KitupError {
    /// Explicitly requested configuration file does not exist.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// External command exited non-zero or could not be spawned.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Remote installer script could not be downloaded.
    #[error("Failed to fetch {url}: {message}")]
    FetchFailed { url: String, message: String },

    /// A prompt needed an answer but none could be obtained.
    #[error("Cannot prompt for '{key}': {message}")]
    PromptUnavailable { key: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for kitup operations.
pub type Result<T> = std::result::Result<T, KitupError>;
