//! Profiles section of the configuration.

use crate::config::xdg;
use crate::error::ProfileError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where profiles are read from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilesConfig {
    /// Profiles root; defaults to `$XDG_CONFIG_HOME/profile-gate/profiles`
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Pre-migration profiles root; defaults to `$XDG_DATA_HOME/profile-gate/profiles`
    #[serde(default)]
    pub legacy_dir: Option<PathBuf>,

    /// Cache the id index used when a reference does not match a file name
    #[serde(default = "default_true")]
    pub index_cache: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            dir: None,
            legacy_dir: None,
            index_cache: default_true(),
        }
    }
}

impl ProfilesConfig {
    /// Resolve `(profiles_dir, legacy_dir)`; relative paths are taken from the workspace root.
    pub fn resolve_paths(&self, workspace_root: &Path) -> Result<(PathBuf, PathBuf), ProfileError> {
        let anchor = |path: &PathBuf| {
            if path.is_absolute() {
                path.clone()
            } else {
                workspace_root.join(path)
            }
        };
        let dir = match &self.dir {
            Some(dir) => anchor(dir),
            None => xdg::profiles_dir()?,
        };
        let legacy = match &self.legacy_dir {
            Some(dir) => anchor(dir),
            None => xdg::legacy_profiles_dir()?,
        };
        Ok((dir, legacy))
    }

    pub fn validate(&self) -> Result<(), String> {
        if matches!(&self.dir, Some(dir) if dir.as_os_str().is_empty()) {
            return Err("Profiles dir cannot be empty".to_string());
        }
        if matches!(&self.legacy_dir, Some(dir) if dir.as_os_str().is_empty()) {
            return Err("Legacy profiles dir cannot be empty".to_string());
        }
        Ok(())
    }
}
