//! Fixture loader.
//!
//! Loads JSON documents from `fixtures/` at the workspace root.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;

pub struct Fixture;

impl Fixture {
    /// Load and parse a fixture JSON file at `workspace_root/path`.
    ///
    /// Panics if the file is missing or invalid JSON.
    pub fn load(relative_path: &str) -> Value {
        Self::load_as(relative_path)
    }

    /// Like [`Fixture::load`], deserialized straight into `T`.
    pub fn load_as<T: DeserializeOwned>(relative_path: &str) -> T {
        let full_path = workspace_root().join(relative_path);
        let contents = std::fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("fixture not found at {}: {}", full_path.display(), e));
        serde_json::from_str(&contents)
            .unwrap_or_else(|e| panic!("invalid fixture {}: {}", relative_path, e))
    }

    /// Raw text of a fixture, for tests that feed it through a store.
    pub fn text(relative_path: &str) -> String {
        let full_path = workspace_root().join(relative_path);
        std::fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("fixture not found at {}: {}", full_path.display(), e))
    }
}

/// Walk up from the crate dir to the directory whose manifest declares the
/// workspace.
fn workspace_root() -> PathBuf {
    let start = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::current_dir().unwrap());
    start
        .ancestors()
        .find(|dir| is_workspace_root(dir))
        .unwrap_or(&start)
        .to_path_buf()
}

fn is_workspace_root(dir: &Path) -> bool {
    std::fs::read_to_string(dir.join("Cargo.toml"))
        .map(|manifest| manifest.contains("[workspace]"))
        .unwrap_or(false)
}
