//! Error types for the profile gate.
//!
//! Validation problems in user-authored profiles are never errors: they are
//! accumulated as codes in a `ValidationResult`. The types here cover misuse,
//! configuration, and I/O at the outer surfaces.

use crate::profile::ProfileKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the gate's outer surfaces
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Profile not found: {kind}:{reference}")]
    NotFound { kind: ProfileKind, reference: String },

    #[error("Failed to parse YAML in {path}: {message}")]
    Yaml { path: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for ProfileError {
    fn from(err: config::ConfigError) -> Self {
        ProfileError::ConfigError(err.to_string())
    }
}
