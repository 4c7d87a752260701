//! Safety layer: id grammar, filename checks, and path containment.
//!
//! References inside profiles are untrusted strings that end up joined into
//! filesystem paths. Everything the resolver builds passes through here.

use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};
use unicode_normalization::UnicodeNormalization;

/// Whether path comparison should ignore case on this platform
const CASE_INSENSITIVE_PATHS: bool = cfg!(any(windows, target_os = "macos"));

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Safe-id grammar: `[A-Za-z0-9_][A-Za-z0-9_.-]*`, no `..`, no separators.
///
/// Surrounding whitespace is ignored; an id that is blank after trimming is unsafe.
pub fn is_safe_id(id: &str) -> bool {
    let id = id.trim();
    let mut chars = id.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphanumeric() || first == '_') {
        return false;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')) {
        return false;
    }
    !id.contains("..") && !id.contains(is_separator)
}

/// A bare file name (no separators) whose stem is a safe id.
pub fn is_safe_filename(name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() || name.contains(is_separator) || name.contains("..") {
        return false;
    }
    Path::new(name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(is_safe_id)
        .unwrap_or(false)
}

/// Whether `name` carries a `.yaml` / `.yml` extension (ASCII case-insensitive).
pub fn has_yaml_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false)
}

/// Whether `candidate` is `base` itself or lies beneath it.
///
/// Both sides are made absolute and canonical (symlinks resolved for the part
/// of the path that exists) before a prefix match on `base + separator`.
pub fn is_path_within(base: &Path, candidate: &Path) -> bool {
    if base.as_os_str().is_empty() || candidate.as_os_str().is_empty() {
        return false;
    }
    let base = comparable(&resolve_absolute(base));
    let candidate = comparable(&resolve_absolute(candidate));

    if candidate == base {
        return true;
    }
    let prefix = if base.ends_with(is_separator) {
        base
    } else {
        format!("{}{}", base, MAIN_SEPARATOR)
    };
    candidate.starts_with(&prefix)
}

/// Absolute form of a path with `.` and `..` folded and the longest existing
/// ancestor canonicalized.
pub fn resolve_absolute(path: &Path) -> PathBuf {
    let lexical = lexical_absolute(path);

    let mut existing = lexical.as_path();
    let mut rest: Vec<&std::ffi::OsStr> = Vec::new();
    loop {
        if let Ok(canonical) = dunce::canonicalize(existing) {
            let mut resolved = canonical;
            for part in rest.iter().rev() {
                resolved.push(part);
            }
            return resolved;
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name);
                existing = parent;
            }
            _ => return lexical.clone(),
        }
    }
}

fn lexical_absolute(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

fn comparable(path: &Path) -> String {
    let normalized: String = path.to_string_lossy().nfc().collect();
    let mut result = normalized;
    while result.len() > 1 && result.ends_with(is_separator) {
        result.pop();
    }
    if CASE_INSENSITIVE_PATHS {
        result.to_lowercase()
    } else {
        result
    }
}
