//! Resolve, list, normalize, and migration-table presentation.

use super::to_json;
use crate::compat::{FIELD_MIGRATIONS, SCHEMA_VERSION};
use crate::profile::{ProfileKind, ProfileSummary};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde_json::json;
use serde_yaml::{Mapping, Value};
use std::path::Path;

pub fn format_resolved_text(path: &Path) -> String {
    path.display().to_string()
}

pub fn format_resolved_json(kind: ProfileKind, reference: &str, path: &Path) -> String {
    to_json(&json!({
        "kind": kind,
        "reference": reference,
        "path": path,
    }))
}

pub fn format_list_text(kind: ProfileKind, profiles: &[ProfileSummary]) -> String {
    if profiles.is_empty() {
        return format!("No {} profiles found.", kind);
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Id", "Name", "File"]);
    for profile in profiles {
        let file = profile
            .path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        table.add_row(vec![profile.id.clone(), profile.name.clone(), file]);
    }
    format!("{}\n\nTotal: {} {} profile(s)", table, profiles.len(), kind)
}

pub fn format_list_json(kind: ProfileKind, profiles: &[ProfileSummary]) -> String {
    to_json(&json!({
        "kind": kind,
        "profiles": profiles,
        "total": profiles.len(),
    }))
}

/// Canonical YAML for the profile.
pub fn format_normalized_text(data: &Mapping) -> String {
    serde_yaml::to_string(&Value::Mapping(data.clone())).unwrap_or_default()
}

pub fn format_normalized_json(data: &Mapping, changed: bool) -> String {
    to_json(&json!({
        "changed": changed,
        "profile": data,
    }))
}

pub fn format_migrations_text() -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Kind", "Legacy field", "Canonical field", "Retired in"]);
    for migration in FIELD_MIGRATIONS {
        table.add_row(vec![
            migration.kind.to_string(),
            migration.legacy_field.to_string(),
            migration.canonical_field.to_string(),
            format!("v{}", migration.retired_in),
        ]);
    }
    format!("Schema version: {}\n\n{}", SCHEMA_VERSION, table)
}

pub fn format_migrations_json() -> String {
    to_json(&json!({
        "schema_version": SCHEMA_VERSION,
        "migrations": FIELD_MIGRATIONS,
    }))
}
