//! CLI route table against temporary profile trees

use clap::Parser;
use profile_gate::cli::{Cli, Commands, OutputFormat, RunContext};
use profile_gate::error::ProfileError;
use profile_gate::profile::ProfileKind;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::integration::{with_xdg_env, ProfileTree};

fn context(tree: &ProfileTree, format: OutputFormat) -> RunContext {
    let workspace = tree.root().to_path_buf();
    RunContext::new(workspace, None, Some(tree.root().to_path_buf()))
        .unwrap()
        .with_format(format)
        .with_color(false)
}

#[test]
fn test_parse_global_options_and_kind() {
    let cli = Cli::try_parse_from([
        "profile-gate",
        "--format",
        "json",
        "--profiles-dir",
        "/p",
        "validate",
        "Chunk",
        "c.yaml",
    ])
    .unwrap();
    assert_eq!(cli.format, OutputFormat::Json);
    assert_eq!(cli.profiles_dir, Some(PathBuf::from("/p")));
    match cli.command {
        Commands::Validate { kind, file } => {
            assert_eq!(kind, ProfileKind::Chunk);
            assert_eq!(file, PathBuf::from("c.yaml"));
        }
        other => panic!("unexpected command: {:?}", other),
    }

    assert!(Cli::try_parse_from(["profile-gate", "list", "widget"]).is_err());
}

#[test]
fn test_validate_and_check_commands() {
    let env_dir = TempDir::new().unwrap();
    let tree = ProfileTree::new().with_runnable_pipeline();
    let bad = tree.write("api", "bad.yaml", "id: bad\nrpm: 0\ntimeout: -1\n");
    let broken = tree.write("api", "broken.yaml", "id: [\n");

    with_xdg_env(&env_dir, || {
        let ctx = context(&tree, OutputFormat::Text);

        let outcome = ctx
            .execute(&Commands::Validate {
                kind: ProfileKind::Api,
                file: bad.clone(),
            })
            .unwrap();
        assert!(!outcome.ok);
        assert!(outcome.output.contains(": invalid"));
        assert!(outcome.output.contains("invalid_rpm"));
        assert!(outcome.output.contains("invalid_timeout"));

        let outcome = ctx
            .execute(&Commands::Validate {
                kind: ProfileKind::Api,
                file: broken.clone(),
            })
            .unwrap();
        assert!(outcome.output.contains("invalid_yaml"));

        let outcome = ctx
            .execute(&Commands::Check {
                pipeline: "run".to_string(),
            })
            .unwrap();
        assert!(outcome.ok);
        assert_eq!(outcome.output, "pipeline:run: ok\n");

        let json = context(&tree, OutputFormat::Json);
        let outcome = json
            .execute(&Commands::Check {
                pipeline: "nope".to_string(),
            })
            .unwrap();
        assert!(!outcome.ok);
        let value: serde_json::Value = serde_json::from_str(&outcome.output).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "ok": false,
                "errors": ["missing_reference:pipeline:nope"],
                "warnings": []
            })
        );
    });
}

#[test]
fn test_validate_missing_file_is_an_error() {
    let env_dir = TempDir::new().unwrap();
    let tree = ProfileTree::new();
    with_xdg_env(&env_dir, || {
        let err = context(&tree, OutputFormat::Text)
            .execute(&Commands::Validate {
                kind: ProfileKind::Api,
                file: tree.root().join("absent.yaml"),
            })
            .unwrap_err();
        assert!(matches!(err, ProfileError::IoError(_)));
    });
}

#[test]
fn test_resolve_list_and_normalize() {
    let env_dir = TempDir::new().unwrap();
    let tree = ProfileTree::new().with_runnable_pipeline();
    let legacy = tree.write("api", "old.yaml", "id: old\nserial_requests: 'yes'\nbase_url: u\nmodel: m\n");

    with_xdg_env(&env_dir, || {
        let ctx = context(&tree, OutputFormat::Text);

        let outcome = ctx
            .execute(&Commands::Resolve {
                kind: ProfileKind::Parser,
                reference: "json-parser".to_string(),
            })
            .unwrap();
        assert!(outcome.output.ends_with("json-parser.yaml"));

        let err = ctx
            .execute(&Commands::Resolve {
                kind: ProfileKind::Parser,
                reference: "../escape".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, ProfileError::NotFound { kind: ProfileKind::Parser, .. }));

        let outcome = ctx
            .execute(&Commands::List {
                kind: ProfileKind::Api,
            })
            .unwrap();
        assert!(outcome.output.contains("local"));
        assert!(outcome.output.contains("old.yaml"));

        let outcome = ctx
            .execute(&Commands::Normalize {
                kind: ProfileKind::Api,
                file: legacy.clone(),
            })
            .unwrap();
        assert!(outcome.output.contains("strict_concurrency: true"));
        assert!(!outcome.output.contains("serial_requests"));
        let on_disk = std::fs::read_to_string(&legacy).unwrap();
        assert!(on_disk.contains("serial_requests"), "normalize must not rewrite the file");

        let outcome = context(&tree, OutputFormat::Json)
            .execute(&Commands::Normalize {
                kind: ProfileKind::Api,
                file: legacy.clone(),
            })
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&outcome.output).unwrap();
        assert_eq!(value["changed"], serde_json::json!(true));
        assert_eq!(value["profile"]["strict_concurrency"], serde_json::json!(true));
    });
}

#[test]
fn test_audit_and_migrations() {
    let env_dir = TempDir::new().unwrap();
    let tree = ProfileTree::new().with_runnable_pipeline();

    with_xdg_env(&env_dir, || {
        let outcome = context(&tree, OutputFormat::Text)
            .execute(&Commands::Audit)
            .unwrap();
        assert!(outcome.ok, "{}", outcome.output);
        assert!(outcome.output.contains("Total: 5"));

        tree.write("policy", "odd.yaml", "id: odd\ntype: fuzzy\nsimilarity_threshold: 1.5\n");
        let outcome = context(&tree, OutputFormat::Json)
            .execute(&Commands::Audit)
            .unwrap();
        assert!(!outcome.ok);
        let value: serde_json::Value = serde_json::from_str(&outcome.output).unwrap();
        assert_eq!(value["summary"]["invalid"], serde_json::json!(1));
        assert_eq!(value["summary"]["with_warnings"], serde_json::json!(1));

        let outcome = context(&tree, OutputFormat::Text)
            .execute(&Commands::Migrations)
            .unwrap();
        assert!(outcome.output.starts_with("Schema version: "));
        assert!(outcome.output.contains("strictConcurrency"));
    });
}

#[test]
fn test_startup_promotes_legacy_profiles_dir() {
    let env_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();

    with_xdg_env(&env_dir, || {
        let legacy = env_dir.path().join("data/profile-gate/profiles/api");
        std::fs::create_dir_all(&legacy).unwrap();
        std::fs::write(legacy.join("main.yaml"), "id: main\nbase_url: u\nmodel: m\n").unwrap();

        let ctx = RunContext::new(workspace.path().to_path_buf(), None, None).unwrap();
        let expected = env_dir.path().join("config/profile-gate/profiles");
        assert!(ctx.profiles().migrated);
        assert_eq!(ctx.profiles_dir(), expected.as_path());

        let outcome = ctx
            .execute(&Commands::Resolve {
                kind: ProfileKind::Api,
                reference: "main".to_string(),
            })
            .unwrap();
        assert!(outcome.output.starts_with(expected.to_string_lossy().as_ref()));
    });
}

#[test]
fn test_invalid_configuration_stops_startup() {
    let env_dir = TempDir::new().unwrap();
    let config_file = env_dir.path().join("gate.toml");
    std::fs::write(&config_file, "[logging]\nformat = \"xml\"\n").unwrap();

    with_xdg_env(&env_dir, || {
        let err = RunContext::new(env_dir.path().to_path_buf(), Some(config_file.clone()), None)
            .err()
            .unwrap();
        assert!(matches!(err, ProfileError::ConfigError(ref msg) if msg.contains("xml")));
    });
}
