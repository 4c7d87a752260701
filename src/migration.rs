//! One-time promotion of the legacy profiles directory.
//!
//! Older releases kept profiles under the data directory. On startup the
//! legacy directory is renamed into the current location when the current
//! location does not exist yet. A failed rename is not fatal: the process keeps
//! working out of the legacy directory and tries again on the next start.

use crate::error::ProfileError;
use crate::safety::resolve_absolute;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Filesystem operations used by the migration
pub trait MigrationFs {
    fn exists(&self, path: &Path) -> bool;
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// `MigrationFs` backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFs;

impl MigrationFs for StdFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }
}

/// Where profiles live for this process
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfilesDirResolution {
    pub active_dir: PathBuf,
    pub used_legacy_fallback: bool,
    /// Whether this call moved the legacy directory
    pub migrated: bool,
}

/// Decide the active profiles directory, migrating the legacy one if needed.
///
/// Safe to call on every startup: once migrated the legacy directory is gone
/// and the migration branch is skipped. Only a failure to create the active
/// directory is returned as an error.
pub fn resolve_profiles_dir_with_legacy_fallback(
    profiles_dir: &Path,
    legacy_dir: &Path,
    fs: &dyn MigrationFs,
) -> Result<ProfilesDirResolution, ProfileError> {
    let mut resolution = ProfilesDirResolution {
        active_dir: profiles_dir.to_path_buf(),
        used_legacy_fallback: false,
        migrated: false,
    };

    let distinct = resolve_absolute(profiles_dir) != resolve_absolute(legacy_dir);
    if distinct && fs.exists(legacy_dir) && !fs.exists(profiles_dir) {
        match migrate(profiles_dir, legacy_dir, fs) {
            Ok(()) => {
                info!(
                    from = %legacy_dir.display(),
                    to = %profiles_dir.display(),
                    "Migrated legacy profiles directory"
                );
                resolution.migrated = true;
            }
            Err(e) => {
                warn!(
                    from = %legacy_dir.display(),
                    to = %profiles_dir.display(),
                    error = %e,
                    "Failed to migrate legacy profiles directory, using legacy location"
                );
                resolution.active_dir = legacy_dir.to_path_buf();
                resolution.used_legacy_fallback = true;
            }
        }
    }

    if !fs.exists(&resolution.active_dir) {
        fs.create_dir_all(&resolution.active_dir).map_err(|e| {
            ProfileError::ConfigError(format!(
                "Failed to create profiles directory {}: {}",
                resolution.active_dir.display(),
                e
            ))
        })?;
    }

    Ok(resolution)
}

fn migrate(profiles_dir: &Path, legacy_dir: &Path, fs: &dyn MigrationFs) -> io::Result<()> {
    if let Some(parent) = profiles_dir.parent() {
        if !parent.as_os_str().is_empty() {
            fs.create_dir_all(parent)?;
        }
    }
    fs.rename(legacy_dir, profiles_dir)
}
