//! Configuration
//!
//! Layered configuration for the gate: built-in defaults, then the global file
//! under `$XDG_CONFIG_HOME/profile-gate/config.toml`, then the workspace files
//! `config/config.toml` and `config/{PROFILE_GATE_ENV}.toml`, then
//! `PROFILE_GATE__*` environment variables.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod paths;
mod profiles;
mod sources;

pub use facade::{ConfigLoader, ENV_PREFIX};
pub use profiles::ProfilesConfig;

/// XDG path helpers
pub mod xdg {
    pub use super::paths::xdg_root::*;
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateConfig {
    #[serde(default)]
    pub profiles: ProfilesConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    Profiles(String),
    Logging(String),
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigValidationError::Profiles(msg) => write!(f, "Profiles: {}", msg),
            ConfigValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ConfigValidationError {}

impl GateConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.profiles.validate() {
            errors.push(ConfigValidationError::Profiles(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ConfigValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
