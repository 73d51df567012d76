//! Local JSON store standing in for the remote collections
//!
//! The file holds one list of records per kind:
//!
//! ```json
//! { "zpa_gateway": [ { "id": 1, "name": "GW01", ... } ] }
//! ```
//!
//! Reads take a shared lock. Saves take an exclusive lock on the target and
//! replace it by renaming a fully written temp file.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use zia_content::Record;
use zia_core::MemoryGateway;

use crate::error::{CliError, Result};

pub struct JsonStore {
    path: PathBuf,
    collections: BTreeMap<String, Vec<Record>>,
}

impl JsonStore {
    /// Load the store, or start empty if the file does not exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        let collections = if path.exists() {
            let file = File::open(path)?;
            file.lock_shared()?;

            // Read through the locked handle
            let mut content = String::new();
            (&file).read_to_string(&mut content)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| CliError::store(path, e))?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!(path = %path.display(), kinds = collections.len(), "Loaded store");
        Ok(Self {
            path: path.to_path_buf(),
            collections,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A gateway over a copy of one kind's records.
    pub fn gateway(&self, kind: &str) -> MemoryGateway {
        MemoryGateway::with_records(self.collections.get(kind).cloned().unwrap_or_default())
    }

    /// Replace one kind's records with the gateway's final state.
    pub fn commit(&mut self, kind: &str, gateway: MemoryGateway) {
        self.collections
            .insert(kind.to_string(), gateway.into_records());
    }

    /// Write the store back atomically.
    pub fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.collections)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;
        lock_file.lock_exclusive()?;

        let temp_path = self.path.with_extension(format!("json.{}.tmp", std::process::id()));
        let mut temp = File::create(&temp_path)?;
        temp.write_all(content.as_bytes())?;
        temp.write_all(b"\n")?;
        temp.sync_all()?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), "Saved store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;
    use zia_core::ResourceGateway;

    #[test]
    fn test_missing_store_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::load(&dir.path().join("remote.json")).unwrap();
        assert!(store.gateway("zpa_gateway").records().is_empty());
    }

    #[test]
    fn test_commit_and_save_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/remote.json");

        let mut store = JsonStore::load(&path).unwrap();
        let gateway = store.gateway("zpa_gateway");
        gateway
            .create(&Record::from_value(json!({"name": "GW01"})).unwrap())
            .unwrap();
        store.commit("zpa_gateway", gateway);
        store.save().unwrap();

        let reloaded = JsonStore::load(&path).unwrap();
        let records = reloaded.gateway("zpa_gateway").records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("id"), Some(&json!(1)));
        assert!(!dir.path().join("nested").read_dir().unwrap().any(|e| {
            e.unwrap().file_name().to_string_lossy().ends_with(".tmp")
        }));
    }

    #[test]
    fn test_invalid_store_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("remote.json");
        fs::write(&path, "[1, 2]").unwrap();
        let err = JsonStore::load(&path).err().unwrap();
        assert!(matches!(err, CliError::Store { .. }));
    }
}
