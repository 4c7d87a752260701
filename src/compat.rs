//! Compatibility normalizer.
//!
//! Older profile shapes keep validating because every historical alias is
//! listed in `FIELD_MIGRATIONS` and folded into its canonical field before
//! validation. Canonical fields are then re-normalized by `CANONICAL_RULES`.
//! Both tables are plain data so the supported aliases can be enumerated.

use crate::profile::value::{is_populated, parse_flag};
use crate::profile::ProfileKind;
use serde::Serialize;
use serde_yaml::{Mapping, Value};

/// Current profile schema version. Aliases retired at or before this version
/// are migrated.
pub const SCHEMA_VERSION: u32 = 3;

/// Pure value transform applied while migrating or re-normalizing a field.
pub type ValueTransform = fn(&Value) -> Value;

/// One legacy alias and where it goes
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldMigration {
    pub kind: ProfileKind,
    pub legacy_field: &'static str,
    pub canonical_field: &'static str,
    /// Schema version in which the alias stopped being written
    pub retired_in: u32,
    #[serde(skip)]
    pub transform: ValueTransform,
}

/// Re-normalization of a canonical field's value
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CanonicalRule {
    pub kind: ProfileKind,
    pub field: &'static str,
    #[serde(skip)]
    pub transform: ValueTransform,
}

/// Legacy aliases, in precedence order: when several aliases of the same
/// canonical field are present, the first one listed wins.
pub const FIELD_MIGRATIONS: &[FieldMigration] = &[
    FieldMigration {
        kind: ProfileKind::Api,
        legacy_field: "serial_requests",
        canonical_field: "strict_concurrency",
        retired_in: 2,
        transform: flag_value,
    },
    FieldMigration {
        kind: ProfileKind::Api,
        legacy_field: "strictConcurrency",
        canonical_field: "strict_concurrency",
        retired_in: 3,
        transform: flag_value,
    },
    FieldMigration {
        kind: ProfileKind::Chunk,
        legacy_field: "type",
        canonical_field: "chunk_type",
        retired_in: 2,
        transform: chunk_type_value,
    },
];

pub const CANONICAL_RULES: &[CanonicalRule] = &[
    CanonicalRule {
        kind: ProfileKind::Api,
        field: "strict_concurrency",
        transform: flag_value,
    },
    CanonicalRule {
        kind: ProfileKind::Chunk,
        field: "chunk_type",
        transform: chunk_type_value,
    },
];

fn flag_value(value: &Value) -> Value {
    Value::Bool(parse_flag(value))
}

fn chunk_type_value(value: &Value) -> Value {
    match value {
        Value::String(s) if s.trim().eq_ignore_ascii_case("legacy") => {
            Value::String("block".to_string())
        }
        other => other.clone(),
    }
}

/// Migrations that apply to a kind, in table order.
pub fn migrations_for(kind: ProfileKind) -> impl Iterator<Item = &'static FieldMigration> {
    FIELD_MIGRATIONS
        .iter()
        .filter(move |m| m.kind == kind && m.retired_in <= SCHEMA_VERSION)
}

/// Rewrite legacy fields of `data` into canonical form, in place.
///
/// Returns whether anything changed. A populated canonical field is never
/// overwritten by an alias; the alias is dropped. A null or blank canonical
/// field is replaced by the migrated alias. Running this twice is a
/// no-op the second time.
pub fn normalize(kind: ProfileKind, data: &mut Mapping) -> bool {
    let mut changed = false;

    for migration in migrations_for(kind) {
        let Some(legacy) = data.remove(migration.legacy_field) else {
            continue;
        };
        changed = true;
        if is_populated(data, migration.canonical_field) {
            tracing::trace!(
                kind = %kind,
                legacy = migration.legacy_field,
                canonical = migration.canonical_field,
                "Dropping legacy field shadowed by canonical field"
            );
            continue;
        }
        tracing::debug!(
            kind = %kind,
            legacy = migration.legacy_field,
            canonical = migration.canonical_field,
            "Migrating legacy profile field"
        );
        data.insert(
            Value::String(migration.canonical_field.to_string()),
            (migration.transform)(&legacy),
        );
    }

    for rule in CANONICAL_RULES.iter().filter(|r| r.kind == kind) {
        if let Some(current) = data.get_mut(rule.field) {
            let normalized = (rule.transform)(current);
            if *current != normalized {
                *current = normalized;
                changed = true;
            }
        }
    }

    changed
}
