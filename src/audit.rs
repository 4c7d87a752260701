//! Whole-tree audit: validate every profile file under the profiles root.

use crate::profile::value::text_field;
use crate::profile::ProfileKind;
use crate::resolver::{parse_yaml, yaml_files, ProfileResolver};
use crate::validation::{ProfileValidator, ValidationCode, ValidationResult};
use serde::Serialize;
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Verdict for one profile file
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    pub kind: ProfileKind,
    pub path: PathBuf,
    pub id: String,
    pub result: ValidationResult,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub with_warnings: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub root: PathBuf,
    pub entries: Vec<AuditEntry>,
    pub summary: AuditSummary,
}

impl AuditReport {
    /// True when no audited profile carries an error.
    pub fn ok(&self) -> bool {
        self.summary.invalid == 0
    }
}

/// Audit every kind directory under the validator's profiles root.
pub fn audit_with(validator: &ProfileValidator) -> AuditReport {
    let resolver = validator.resolver();
    let mut entries = Vec::new();

    for kind in ProfileKind::ALL {
        for path in yaml_files(&resolver.kind_dir(kind)) {
            entries.push(audit_file(validator, kind, path));
        }
    }

    let summary = AuditSummary {
        total: entries.len(),
        valid: entries.iter().filter(|e| e.result.ok).count(),
        invalid: entries.iter().filter(|e| !e.result.ok).count(),
        with_warnings: entries
            .iter()
            .filter(|e| !e.result.warnings.is_empty())
            .count(),
    };
    info!(
        root = %resolver.root().display(),
        total = summary.total,
        invalid = summary.invalid,
        "Audited profiles"
    );

    AuditReport {
        root: resolver.root().to_path_buf(),
        entries,
        summary,
    }
}

/// Audit the profiles tree rooted at `profiles_dir`.
pub fn audit_profiles(profiles_dir: &Path) -> Result<AuditReport, crate::error::ProfileError> {
    let resolver = ProfileResolver::with_index(profiles_dir)?;
    Ok(audit_with(&ProfileValidator::new(resolver)))
}

fn audit_file(validator: &ProfileValidator, kind: ProfileKind, path: PathBuf) -> AuditEntry {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let parsed = std::fs::read_to_string(&path)
        .map_err(crate::error::ProfileError::from)
        .and_then(|content| parse_yaml(&path, &content));

    let (id, result) = match parsed {
        Ok(value) => {
            let id = match &value {
                Value::Mapping(map) => text_field(map, "id").unwrap_or_else(|| stem.clone()),
                _ => stem.clone(),
            };
            (id, validator.validate(kind, &value))
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Profile file failed to parse");
            (stem, ValidationResult::failure(ValidationCode::InvalidYaml))
        }
    };

    AuditEntry {
        kind,
        path,
        id,
        result,
    }
}
