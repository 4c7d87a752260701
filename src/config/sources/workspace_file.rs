//! Workspace config files under `<workspace>/config/`.
//!
//! `config.toml` is the shared base; `<env>.toml` layers on top of it, where
//! `<env>` comes from `PROFILE_GATE_ENV` and defaults to `development`.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Selects the environment-specific workspace file
pub const ENV_VAR: &str = "PROFILE_GATE_ENV";
const DEFAULT_ENV: &str = "development";
const BASE_NAME: &str = "config";

/// Active workspace environment; unset or blank means `development`.
pub fn environment_name() -> String {
    std::env::var(ENV_VAR)
        .ok()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_ENV.to_string())
}

/// Candidate files for `env`, lowest precedence first. Existence is not checked.
pub fn candidate_files(workspace_root: &Path, env: &str) -> Vec<PathBuf> {
    let config_dir = workspace_root.join("config");
    let mut files = vec![config_dir.join(format!("{}.toml", BASE_NAME))];
    if env != BASE_NAME {
        files.push(config_dir.join(format!("{}.toml", env)));
    }
    files
}

/// Layer every existing workspace file onto `builder`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let env = environment_name();
    let builder = candidate_files(workspace_root, &env)
        .into_iter()
        .filter(|path| path.is_file())
        .fold(builder, |builder, path| {
            debug!(config_path = %path.display(), env = %env, "Loading workspace configuration");
            builder.add_source(File::from(path).required(false))
        });
    Ok(builder)
}
