//! Cached id → path index for the resolver's id-scan fallback.
//!
//! A kind directory is indexed once and reused until its fingerprint changes.
//! The fingerprint covers the directory's own modification time and the
//! modification time of every YAML file in it, so renames, additions, removals,
//! and in-place edits of an `id` field all trigger a rebuild.

use crate::profile::value::text_field;
use crate::resolver::{parse_profile_file, yaml_files};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
struct DirFingerprint {
    dir_modified: Option<SystemTime>,
    files: Vec<(PathBuf, Option<SystemTime>)>,
}

impl DirFingerprint {
    fn capture(dir: &Path) -> Self {
        let modified = |path: &Path| std::fs::metadata(path).and_then(|m| m.modified()).ok();
        Self {
            dir_modified: modified(dir),
            files: yaml_files(dir)
                .into_iter()
                .map(|path| {
                    let stamp = modified(&path);
                    (path, stamp)
                })
                .collect(),
        }
    }
}

#[derive(Debug)]
struct DirIndex {
    fingerprint: DirFingerprint,
    ids: HashMap<String, PathBuf>,
}

impl DirIndex {
    fn build(fingerprint: DirFingerprint) -> Self {
        let mut ids: HashMap<String, PathBuf> = HashMap::new();
        for (path, _) in &fingerprint.files {
            let Some(id) = parse_profile_file(path).and_then(|data| text_field(&data, "id")) else {
                continue;
            };
            if let Some(existing) = ids.get(&id) {
                warn!(
                    id = %id,
                    kept = %existing.display(),
                    ignored = %path.display(),
                    "Duplicate profile id in directory"
                );
                continue;
            }
            ids.insert(id, path.clone());
        }
        Self { fingerprint, ids }
    }
}

/// Shared id index keyed by kind directory
#[derive(Debug, Default)]
pub struct IdIndex {
    dirs: RwLock<HashMap<PathBuf, DirIndex>>,
}

impl IdIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of the file in `dir` whose `id` field equals `id`.
    ///
    /// The first file in file-name order wins when ids collide, matching the
    /// uncached scan.
    pub fn lookup(&self, dir: &Path, id: &str) -> Option<PathBuf> {
        let fingerprint = DirFingerprint::capture(dir);

        {
            let dirs = self.dirs.read();
            if let Some(index) = dirs.get(dir) {
                if index.fingerprint == fingerprint {
                    return index.ids.get(id).cloned();
                }
            }
        }

        debug!(dir = %dir.display(), files = fingerprint.files.len(), "Rebuilding profile id index");
        let index = DirIndex::build(fingerprint);
        let found = index.ids.get(id).cloned();
        self.dirs.write().insert(dir.to_path_buf(), index);
        found
    }

    /// Drop the cached entry for one directory.
    pub fn invalidate(&self, dir: &Path) {
        self.dirs.write().remove(dir);
    }

    /// Number of directories currently indexed.
    pub fn indexed_dirs(&self) -> usize {
        self.dirs.read().len()
    }
}
