//! Global config file source: $XDG_CONFIG_HOME/profile-gate/config.toml or ~/.config/profile-gate/config.toml

use crate::config::xdg;
use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use tracing::debug;

/// Add global config file source to builder if it exists.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if let Some(global_path) = xdg::global_config_path() {
        if global_path.exists() {
            let canonical_path = dunce::canonicalize(&global_path).unwrap_or(global_path);
            builder = builder.add_source(File::from(canonical_path).required(false));
        } else {
            debug!(
                config_path = %global_path.display(),
                "No global configuration file; using defaults"
            );
        }
    }
    Ok(builder)
}
