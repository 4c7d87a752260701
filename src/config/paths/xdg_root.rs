//! XDG base directories for profile-gate.
//!
//! `XDG_CONFIG_HOME` / `XDG_DATA_HOME` win when set; otherwise `$HOME/.config`
//! and `$HOME/.local/share`; otherwise the platform defaults from `directories`.

use crate::error::ProfileError;
use std::path::PathBuf;

pub const APP_DIR: &str = "profile-gate";

fn env_dir(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// `$XDG_CONFIG_HOME`, else `~/.config`.
pub fn config_home() -> Result<PathBuf, ProfileError> {
    if let Some(dir) = env_dir("XDG_CONFIG_HOME") {
        return Ok(dir);
    }
    if let Some(home) = env_dir("HOME") {
        return Ok(home.join(".config"));
    }
    directories::BaseDirs::new()
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| ProfileError::ConfigError("Cannot determine config directory".to_string()))
}

/// `$XDG_DATA_HOME`, else `~/.local/share`.
pub fn data_home() -> Result<PathBuf, ProfileError> {
    if let Some(dir) = env_dir("XDG_DATA_HOME") {
        return Ok(dir);
    }
    if let Some(home) = env_dir("HOME") {
        return Ok(home.join(".local").join("share"));
    }
    directories::BaseDirs::new()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| ProfileError::ConfigError("Cannot determine data directory".to_string()))
}

/// Global configuration file path.
pub fn global_config_path() -> Option<PathBuf> {
    config_home()
        .ok()
        .map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// Default profiles root. Not created here: the legacy migration needs to see
/// whether it exists.
pub fn profiles_dir() -> Result<PathBuf, ProfileError> {
    Ok(config_home()?.join(APP_DIR).join("profiles"))
}

/// Profiles root used by releases before the move to the config directory.
pub fn legacy_profiles_dir() -> Result<PathBuf, ProfileError> {
    Ok(data_home()?.join(APP_DIR).join("profiles"))
}
