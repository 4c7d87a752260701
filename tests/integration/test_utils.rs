//! Shared test utilities for integration tests
//!
//! Provides centralized setup/teardown for XDG directories and temporary
//! profile trees so tests stay isolated from the developer's machine.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
static XDG_ENV_MUTEX: Mutex<()> = Mutex::new(());

const TRACKED_VARS: [&str; 4] = ["HOME", "XDG_CONFIG_HOME", "XDG_DATA_HOME", "PROFILE_GATE_ENV"];

/// Environment variable state to restore after test
struct EnvState {
    values: Vec<(&'static str, Option<String>)>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            values: TRACKED_VARS
                .iter()
                .map(|name| (*name, std::env::var(name).ok()))
                .collect(),
        }
    }

    fn restore(self) {
        for (name, value) in self.values {
            match value {
                Some(orig) => std::env::set_var(name, orig),
                None => std::env::remove_var(name),
            }
        }
    }
}

/// Run `f` with HOME, XDG_CONFIG_HOME, and XDG_DATA_HOME pointing inside `test_dir`.
///
/// Layout: `XDG_CONFIG_HOME=<dir>/config`, `XDG_DATA_HOME=<dir>/data`,
/// `HOME=<dir>/home`. `PROFILE_GATE_ENV` is cleared. The original environment
/// is restored afterwards, and a global mutex serializes callers.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = XDG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_config_home = test_dir.path().join("config");
    let test_data_home = test_dir.path().join("data");
    let test_home = test_dir.path().join("home");

    fs::create_dir_all(&test_config_home).unwrap();
    fs::create_dir_all(&test_data_home).unwrap();
    fs::create_dir_all(&test_home).unwrap();

    std::env::set_var("HOME", &test_home);
    std::env::set_var("XDG_CONFIG_HOME", &test_config_home);
    std::env::set_var("XDG_DATA_HOME", &test_data_home);
    std::env::remove_var("PROFILE_GATE_ENV");

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

    env_state.restore();

    match result {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

/// Temporary profiles root with one sub-directory per kind
pub struct ProfileTree {
    dir: TempDir,
}

impl ProfileTree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `{root}/{kind}/{file}` and return its path.
    pub fn write(&self, kind: &str, file: &str, content: &str) -> PathBuf {
        let dir = self.dir.path().join(kind);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(file);
        fs::write(&path, content).unwrap();
        path
    }

    /// A runnable pipeline `run` plus everything it references.
    pub fn with_runnable_pipeline(self) -> Self {
        self.write("api", "local.yaml", "id: local\nbase_url: http://localhost:8000/v1\nmodel: m\n");
        self.write(
            "prompt",
            "json-prompt.yaml",
            "id: json-prompt\nsystem_template: Reply with a JSON object.\nuser_template: '{{source}}'\n",
        );
        self.write("parser", "json-parser.yaml", "id: json-parser\ntype: json_object\noptions: {path: result}\n");
        self.write("chunk", "blocks.yaml", "id: blocks\nchunk_type: block\n");
        self.write(
            "pipeline",
            "run.yaml",
            "id: run\nprovider: local\nprompt: json-prompt\nparser: json-parser\nchunk_policy: blocks\n",
        );
        self
    }
}
