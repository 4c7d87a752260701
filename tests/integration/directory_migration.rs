//! Legacy profiles directory promotion on a real filesystem

use profile_gate::migration::{resolve_profiles_dir_with_legacy_fallback, MigrationFs, StdFs};
use std::io;
use std::path::Path;
use tempfile::TempDir;

/// Real filesystem whose renames always fail
struct ReadOnlyRename;

impl MigrationFs for ReadOnlyRename {
    fn exists(&self, path: &Path) -> bool {
        StdFs.exists(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        StdFs.create_dir_all(path)
    }

    fn rename(&self, _from: &Path, _to: &Path) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
    }
}

#[test]
fn test_legacy_tree_moves_with_its_profiles() {
    let temp = TempDir::new().unwrap();
    let legacy = temp.path().join("data/profile-gate/profiles");
    let current = temp.path().join("config/profile-gate/profiles");
    std::fs::create_dir_all(legacy.join("api")).unwrap();
    std::fs::write(legacy.join("api/main.yaml"), "id: main\n").unwrap();

    let resolution = resolve_profiles_dir_with_legacy_fallback(&current, &legacy, &StdFs).unwrap();

    assert!(resolution.migrated);
    assert!(!resolution.used_legacy_fallback);
    assert_eq!(resolution.active_dir, current);
    assert!(current.join("api/main.yaml").is_file());
    assert!(!legacy.exists());

    let again = resolve_profiles_dir_with_legacy_fallback(&current, &legacy, &StdFs).unwrap();
    assert!(!again.migrated);
    assert_eq!(again.active_dir, current);
}

#[test]
fn test_failed_rename_keeps_using_legacy_tree() {
    let temp = TempDir::new().unwrap();
    let legacy = temp.path().join("legacy");
    let current = temp.path().join("current");
    std::fs::create_dir_all(&legacy).unwrap();

    let resolution =
        resolve_profiles_dir_with_legacy_fallback(&current, &legacy, &ReadOnlyRename).unwrap();

    assert!(resolution.used_legacy_fallback);
    assert_eq!(resolution.active_dir, legacy);
    assert!(legacy.is_dir());
}

#[test]
fn test_existing_current_tree_is_left_alone() {
    let temp = TempDir::new().unwrap();
    let legacy = temp.path().join("legacy");
    let current = temp.path().join("current");
    std::fs::create_dir_all(&legacy).unwrap();
    std::fs::create_dir_all(&current).unwrap();

    let resolution = resolve_profiles_dir_with_legacy_fallback(&current, &legacy, &StdFs).unwrap();

    assert!(!resolution.migrated);
    assert_eq!(resolution.active_dir, current);
    assert!(legacy.is_dir());
}

#[test]
fn test_fresh_install_creates_current_tree() {
    let temp = TempDir::new().unwrap();
    let current = temp.path().join("config/profiles");

    let resolution =
        resolve_profiles_dir_with_legacy_fallback(&current, &temp.path().join("nope"), &StdFs)
            .unwrap();

    assert_eq!(resolution.active_dir, current);
    assert!(current.is_dir());
}
