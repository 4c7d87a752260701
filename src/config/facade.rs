//! Config loader facade: builds the layered configuration.

use crate::config::merge::merge_policy;
use crate::config::sources::{global_file, workspace_file};
use crate::config::GateConfig;
use config::{ConfigError, Environment, File};
use std::path::{Path, PathBuf};

/// Prefix for environment overrides, e.g. `PROFILE_GATE__PROFILES__DIR`
pub const ENV_PREFIX: &str = "PROFILE_GATE";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults < global file < workspace files < environment.
    pub fn load(workspace_root: &Path) -> Result<GateConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Load a single explicit file on top of the defaults.
    pub fn load_from_file(path: &Path) -> Result<GateConfig, ConfigError> {
        merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true))
            .build()?
            .try_deserialize()
    }

    /// Global config file path, if a home directory can be determined.
    pub fn global_config_path() -> Option<PathBuf> {
        crate::config::xdg::global_config_path()
    }

    /// Configuration with nothing but defaults.
    pub fn default() -> GateConfig {
        GateConfig::default()
    }
}
