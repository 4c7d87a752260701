//! Layered configuration and XDG locations

use profile_gate::config::{xdg, ConfigLoader, ProfilesConfig};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::integration::with_xdg_env;

fn write_config(path: &std::path::Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_xdg_locations() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let config_home = test_dir.path().join("config");
        assert_eq!(xdg::config_home().unwrap(), config_home);
        assert_eq!(
            xdg::profiles_dir().unwrap(),
            config_home.join("profile-gate").join("profiles")
        );
        assert_eq!(
            xdg::legacy_profiles_dir().unwrap(),
            test_dir.path().join("data").join("profile-gate").join("profiles")
        );
        assert_eq!(
            ConfigLoader::global_config_path(),
            Some(config_home.join("profile-gate").join("config.toml"))
        );
        assert!(!xdg::profiles_dir().unwrap().exists());

        std::env::remove_var("XDG_CONFIG_HOME");
        assert_eq!(
            xdg::config_home().unwrap(),
            test_dir.path().join("home").join(".config")
        );
    });
}

#[test]
fn test_defaults_without_any_config_file() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert!(config.profiles.dir.is_none());
        assert!(config.profiles.index_cache);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.output, "stderr");

        let (dir, legacy) = config.profiles.resolve_paths(workspace.path()).unwrap();
        assert_eq!(dir, xdg::profiles_dir().unwrap());
        assert_eq!(legacy, xdg::legacy_profiles_dir().unwrap());
    });
}

#[test]
fn test_workspace_config_overrides_global_config() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        write_config(
            &test_dir.path().join("config/profile-gate/config.toml"),
            "[profiles]\ndir = \"/global/profiles\"\nindex_cache = false\n\n[logging]\nlevel = \"info\"\n",
        );
        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.profiles.dir, Some(PathBuf::from("/global/profiles")));
        assert!(!config.profiles.index_cache);
        assert_eq!(config.logging.level, "info");

        write_config(
            &workspace.path().join("config/config.toml"),
            "[profiles]\ndir = \"team-profiles\"\n",
        );
        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.profiles.dir, Some(PathBuf::from("team-profiles")));
        assert!(!config.profiles.index_cache, "unset keys keep the global value");

        let (dir, _) = config.profiles.resolve_paths(workspace.path()).unwrap();
        assert_eq!(dir, workspace.path().join("team-profiles"));
    });
}

#[test]
fn test_environment_specific_workspace_file() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        write_config(
            &workspace.path().join("config/config.toml"),
            "[logging]\nlevel = \"info\"\nformat = \"text\"\n",
        );
        write_config(
            &workspace.path().join("config/ci.toml"),
            "[logging]\nformat = \"json\"\n",
        );

        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.logging.format, "text");

        std::env::set_var("PROFILE_GATE_ENV", "ci");
        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    });
}

#[test]
fn test_environment_variables_override_files() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        write_config(
            &workspace.path().join("config/config.toml"),
            "[profiles]\ndir = \"from-file\"\n",
        );
        std::env::set_var("PROFILE_GATE__PROFILES__DIR", "/from/env");
        let loaded = ConfigLoader::load(workspace.path());
        std::env::remove_var("PROFILE_GATE__PROFILES__DIR");

        assert_eq!(loaded.unwrap().profiles.dir, Some(PathBuf::from("/from/env")));
    });
}

#[test]
fn test_invalid_config_is_reported_by_validate() {
    let test_dir = TempDir::new().unwrap();
    let config_file = test_dir.path().join("gate.toml");
    write_config(&config_file, "[logging]\noutput = \"syslog\"\n");

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    let errors = config.validate().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("syslog"));

    let profiles = ProfilesConfig::default();
    assert!(profiles.validate().is_ok());
}
