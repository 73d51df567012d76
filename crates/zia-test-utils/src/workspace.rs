//! [`TestWorkspace`]: a temporary directory holding a manifest and a store.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

/// A temporary working directory for CLI and manifest tests.
///
/// # Example
///
/// ```rust,no_run
/// use zia_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// ws.write_manifest("[[resources]]\nkind = \"zpa_gateway\"\n");
/// ws.write_store(&serde_json::json!({"zpa_gateway": []}));
/// assert!(ws.manifest_path().exists());
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root().join("zia.toml")
    }

    /// Path of the store file named by the default manifest settings.
    pub fn store_path(&self) -> PathBuf {
        self.root().join("remote.json")
    }

    pub fn write_manifest(&self, content: &str) {
        fs::write(self.manifest_path(), content).unwrap();
    }

    pub fn write_store(&self, content: &Value) {
        fs::write(self.store_path(), serde_json::to_string_pretty(content).unwrap()).unwrap();
    }

    /// Parsed store content.
    ///
    /// # Panics
    /// Panics if the store is missing or not valid JSON.
    pub fn read_store(&self) -> Value {
        let content = fs::read_to_string(self.store_path())
            .unwrap_or_else(|_| panic!("Could not read store: {}", self.store_path().display()));
        serde_json::from_str(&content).unwrap()
    }

    /// Records of one kind in the store, or an empty list.
    pub fn store_records(&self, kind: &str) -> Vec<Value> {
        self.read_store()
            .get(kind)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }
}
