//! Profile resolver: turns a reference string into a file inside the profiles root.
//!
//! Resolution order for `(kind, reference)`:
//! 1. an existing filesystem path, accepted only inside the profiles root
//!    (only absolute references or ones containing a separator are tried as paths);
//! 2. a `.yaml`/`.yml` file name under `{root}/{kind}/`;
//! 3. a safe id, tried as `{id}.yaml` then `{id}.yml`;
//! 4. a scan of `{root}/{kind}/` for a file whose `id` field matches.
//!
//! Every failure (unsafe reference, unreadable directory, unparsable file)
//! resolves to `None`; only an empty profiles root is reported as an error.

pub mod index;

pub use index::IdIndex;

use crate::error::ProfileError;
use crate::profile::value::text_field;
use crate::profile::{Profile, ProfileKind, ProfileSummary};
use crate::safety::{has_yaml_extension, is_path_within, is_safe_filename, is_safe_id};
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

/// Resolves and loads profiles under one profiles root
#[derive(Debug, Clone)]
pub struct ProfileResolver {
    root: PathBuf,
    index: Option<Arc<IdIndex>>,
}

impl ProfileResolver {
    /// Resolver that scans kind directories on every id fallback.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, ProfileError> {
        let root = root.into();
        if root.as_os_str().is_empty() {
            return Err(ProfileError::InvalidArgument(
                "profiles directory must not be empty".to_string(),
            ));
        }
        Ok(Self { root, index: None })
    }

    /// Resolver whose id fallback goes through a cached id index.
    pub fn with_index(root: impl Into<PathBuf>) -> Result<Self, ProfileError> {
        Self::with_shared_index(root, Arc::new(IdIndex::new()))
    }

    /// Resolver sharing an existing index (e.g. one index for several resolvers).
    pub fn with_shared_index(
        root: impl Into<PathBuf>,
        index: Arc<IdIndex>,
    ) -> Result<Self, ProfileError> {
        let mut resolver = Self::new(root)?;
        resolver.index = Some(index);
        Ok(resolver)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn kind_dir(&self, kind: ProfileKind) -> PathBuf {
        self.root.join(kind.as_str())
    }

    /// Resolve a reference to a profile file path.
    pub fn resolve(&self, kind: ProfileKind, reference: &str) -> Option<PathBuf> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }

        let as_path = Path::new(reference);
        if looks_like_path(reference) && as_path.exists() {
            if as_path.is_file() && is_path_within(&self.root, as_path) {
                trace!(kind = %kind, reference, "Resolved reference as existing path");
                return Some(as_path.to_path_buf());
            }
            debug!(kind = %kind, reference, "Rejected existing path outside profiles root");
            return None;
        }

        let kind_dir = self.kind_dir(kind);

        if has_yaml_extension(reference) {
            if !is_safe_filename(reference) {
                debug!(kind = %kind, reference, "Rejected unsafe profile file name");
                return None;
            }
            let candidate = kind_dir.join(reference);
            if let Some(found) = self.accept(candidate) {
                return Some(found);
            }
        } else {
            if !is_safe_id(reference) {
                debug!(kind = %kind, reference, "Rejected unsafe profile id");
                return None;
            }
            for ext in ["yaml", "yml"] {
                let candidate = kind_dir.join(format!("{}.{}", reference, ext));
                if let Some(found) = self.accept(candidate) {
                    return Some(found);
                }
            }
        }

        let found = match &self.index {
            Some(index) => index.lookup(&kind_dir, reference),
            None => scan_for_id(&kind_dir, reference),
        };
        match found {
            Some(path) if is_path_within(&self.root, &path) => {
                trace!(kind = %kind, reference, path = %path.display(), "Resolved reference by id scan");
                Some(path)
            }
            Some(path) => {
                debug!(kind = %kind, reference, path = %path.display(), "Rejected scanned file outside profiles root");
                None
            }
            None => None,
        }
    }

    /// Resolve and parse a profile. `None` when unresolvable, unparsable, or not a mapping.
    pub fn load(&self, kind: ProfileKind, reference: &str) -> Option<Profile> {
        let path = self.resolve(kind, reference)?;
        let data = parse_profile_file(&path)?;
        let stem = file_stem(&path);
        Some(Profile {
            id: text_field(&data, "id").unwrap_or_else(|| stem.clone()),
            name: text_field(&data, "name").unwrap_or(stem),
            kind,
            path,
            data,
        })
    }

    /// Every parsable profile of a kind, in file-name order.
    pub fn list(&self, kind: ProfileKind) -> Vec<ProfileSummary> {
        yaml_files(&self.kind_dir(kind))
            .into_iter()
            .filter_map(|path| {
                let Some(data) = parse_profile_file(&path) else {
                    warn!(path = %path.display(), "Skipping unparsable profile file");
                    return None;
                };
                let stem = file_stem(&path);
                let id = text_field(&data, "id").unwrap_or_else(|| stem.clone());
                if id != stem {
                    warn!(
                        "Profile id mismatch in {}: filename={}, id={}",
                        path.display(),
                        stem,
                        id
                    );
                }
                Some(ProfileSummary {
                    name: text_field(&data, "name").unwrap_or_else(|| stem.clone()),
                    id,
                    path,
                })
            })
            .collect()
    }

    fn accept(&self, candidate: PathBuf) -> Option<PathBuf> {
        (candidate.is_file() && is_path_within(&self.root, &candidate)).then_some(candidate)
    }
}

/// Bare ids are never looked up relative to the working directory.
fn looks_like_path(reference: &str) -> bool {
    Path::new(reference).is_absolute() || reference.contains('/') || reference.contains('\\')
}

/// Resolve a reference without keeping a resolver around.
pub fn resolve_profile_path(
    profiles_dir: &Path,
    kind: ProfileKind,
    reference: &str,
) -> Result<Option<PathBuf>, ProfileError> {
    Ok(ProfileResolver::new(profiles_dir)?.resolve(kind, reference))
}

/// Resolve and load a profile without keeping a resolver around.
pub fn load_profile(
    profiles_dir: &Path,
    kind: ProfileKind,
    reference: &str,
) -> Result<Option<Profile>, ProfileError> {
    Ok(ProfileResolver::new(profiles_dir)?.load(kind, reference))
}

/// Read a YAML document and require a mapping at its root.
pub fn read_profile_file(path: &Path) -> Result<Mapping, ProfileError> {
    let content = std::fs::read_to_string(path)?;
    match parse_yaml(path, &content)? {
        Value::Mapping(map) => Ok(map),
        _ => Err(ProfileError::Yaml {
            path: path.to_path_buf(),
            message: "profile document must be a mapping".to_string(),
        }),
    }
}

/// Parse YAML text into a generic tree; an empty document becomes null.
pub fn parse_yaml(path: &Path, content: &str) -> Result<Value, ProfileError> {
    serde_yaml::from_str(content).map_err(|e| ProfileError::Yaml {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

pub(crate) fn parse_profile_file(path: &Path) -> Option<Mapping> {
    match read_profile_file(path) {
        Ok(map) => Some(map),
        Err(e) => {
            trace!(path = %path.display(), error = %e, "Ignoring unreadable profile file");
            None
        }
    }
}

/// YAML files directly inside `dir`, sorted by file name. Unreadable → empty.
pub(crate) fn yaml_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .map(has_yaml_extension)
                    .unwrap_or(false)
        })
        .collect()
}

fn scan_for_id(kind_dir: &Path, id: &str) -> Option<PathBuf> {
    yaml_files(kind_dir).into_iter().find(|path| {
        parse_profile_file(path)
            .and_then(|data| text_field(&data, "id"))
            .map(|found| found == id)
            .unwrap_or(false)
    })
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}
