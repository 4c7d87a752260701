//! Reference resolution against real profile trees

use profile_gate::profile::ProfileKind;
use profile_gate::resolver::{load_profile, resolve_profile_path, IdIndex, ProfileResolver};
use std::sync::Arc;

use crate::integration::ProfileTree;

#[test]
fn test_resolution_order_prefers_file_names_over_internal_ids() {
    let tree = ProfileTree::new();
    let by_name = tree.write("parser", "tagged.yaml", "id: other\ntype: tagged_line\n");
    let by_id = tree.write("parser", "zzz.yaml", "id: tagged\ntype: tagged_line\n");
    let resolver = ProfileResolver::new(tree.root()).unwrap();

    assert_eq!(resolver.resolve(ProfileKind::Parser, "tagged"), Some(by_name.clone()));
    assert_eq!(resolver.resolve(ProfileKind::Parser, "tagged.yaml"), Some(by_name));
    assert_eq!(resolver.resolve(ProfileKind::Parser, "other"), Some(tree.root().join("parser/tagged.yaml")));
    assert_ne!(resolver.resolve(ProfileKind::Parser, "tagged"), Some(by_id));
}

#[test]
fn test_missing_yaml_file_name_falls_back_to_id_scan() {
    let tree = ProfileTree::new();
    let path = tree.write("policy", "renamed.yaml", "id: strict.yaml\ntype: strict\n");
    let resolver = ProfileResolver::new(tree.root()).unwrap();

    assert_eq!(resolver.resolve(ProfileKind::Policy, "strict.yaml"), Some(path));
}

#[test]
fn test_traversal_and_outside_paths_never_resolve() {
    let tree = ProfileTree::new();
    tree.write("api", "main.yaml", "id: main\n");
    let outside = tempfile::TempDir::new().unwrap();
    let outside_file = outside.path().join("main.yaml");
    std::fs::write(&outside_file, "id: main\n").unwrap();
    let resolver = ProfileResolver::new(tree.root()).unwrap();

    for reference in ["../api/main", "../../etc/passwd", "api/main", "..", ".hidden"] {
        assert_eq!(resolver.resolve(ProfileKind::Api, reference), None, "{}", reference);
    }
    let absolute = outside_file.to_string_lossy().to_string();
    assert_eq!(resolver.resolve(ProfileKind::Api, &absolute), None);
}

#[cfg(unix)]
#[test]
fn test_symlinked_profile_escaping_root_is_rejected() {
    let tree = ProfileTree::new();
    let outside = tempfile::TempDir::new().unwrap();
    let target = outside.path().join("secret.yaml");
    std::fs::write(&target, "id: secret\n").unwrap();
    std::fs::create_dir_all(tree.root().join("api")).unwrap();
    std::os::unix::fs::symlink(&target, tree.root().join("api").join("secret.yaml")).unwrap();

    let resolver = ProfileResolver::new(tree.root()).unwrap();
    assert_eq!(resolver.resolve(ProfileKind::Api, "secret"), None);
    assert_eq!(resolver.resolve(ProfileKind::Api, "secret.yaml"), None);

    let indexed = ProfileResolver::with_index(tree.root()).unwrap();
    assert_eq!(indexed.resolve(ProfileKind::Api, "secret"), None);
}

#[test]
fn test_indexed_resolver_sees_new_and_edited_files() {
    let tree = ProfileTree::new();
    tree.write("chunk", "a.yaml", "id: first\nchunk_type: line\n");
    let index = Arc::new(IdIndex::new());
    let resolver = ProfileResolver::with_shared_index(tree.root(), Arc::clone(&index)).unwrap();

    assert!(resolver.resolve(ProfileKind::Chunk, "first").is_some());
    assert_eq!(resolver.resolve(ProfileKind::Chunk, "second"), None);
    assert_eq!(index.indexed_dirs(), 1);

    let added = tree.write("chunk", "b.yaml", "id: second\nchunk_type: block\n");
    assert_eq!(resolver.resolve(ProfileKind::Chunk, "second"), Some(added));

    std::fs::remove_file(tree.root().join("chunk/a.yaml")).unwrap();
    assert_eq!(resolver.resolve(ProfileKind::Chunk, "first"), None);
}

#[test]
fn test_free_functions_report_empty_root_as_misuse() {
    assert!(resolve_profile_path(std::path::Path::new(""), ProfileKind::Api, "x").is_err());
    assert!(load_profile(std::path::Path::new(""), ProfileKind::Api, "x").is_err());
}

#[test]
fn test_load_and_list() {
    let tree = ProfileTree::new();
    tree.write("prompt", "b.yaml", "id: b\nname: Bravo\nuser_template: '{{source}}'\n");
    tree.write("prompt", "a.yml", "name: Alpha\n");
    tree.write("prompt", "c.yaml", "- not\n- a mapping\n");
    tree.write("prompt", "readme.md", "# ignored\n");

    let profile = load_profile(tree.root(), ProfileKind::Prompt, "b").unwrap().unwrap();
    assert_eq!(profile.id, "b");
    assert_eq!(profile.name, "Bravo");
    assert_eq!(profile.kind, ProfileKind::Prompt);

    let resolver = ProfileResolver::new(tree.root()).unwrap();
    let listed: Vec<(String, String)> = resolver
        .list(ProfileKind::Prompt)
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect();
    assert_eq!(
        listed,
        vec![
            ("a".to_string(), "Alpha".to_string()),
            ("b".to_string(), "Bravo".to_string()),
        ]
    );
    assert!(resolver.list(ProfileKind::Pipeline).is_empty());
}
