//! Drive persistence - snapshots and the stores that hold them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::DosResult;

/// Serialisable image of a drive: label, current directory and the whole tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveSnapshot {
    #[serde(default)]
    pub label: String,
    /// Absolute path of the current directory, e.g. `C:\temp`.
    pub current_directory: String,
    /// Children of the root directory, in order.
    #[serde(default)]
    pub entries: Vec<SnapshotNode>,
}

/// One node of a snapshot tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SnapshotNode {
    Directory {
        name: String,
        #[serde(default)]
        children: Vec<SnapshotNode>,
    },
    File {
        name: String,
        #[serde(default)]
        content: String,
    },
}

/// Backing storage for `Drive::save` and `Drive::restore`.
pub trait DriveStore {
    /// Persist a snapshot, replacing whatever was stored before.
    fn save(&self, snapshot: &DriveSnapshot) -> DosResult<()>;

    /// Load the stored snapshot. Returns None if nothing was stored.
    fn load(&self) -> DosResult<Option<DriveSnapshot>>;
}

/// Store that keeps nothing: saving is a no-op and there is never anything to restore.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

impl DriveStore for NullStore {
    fn save(&self, _snapshot: &DriveSnapshot) -> DosResult<()> {
        Ok(())
    }

    fn load(&self) -> DosResult<Option<DriveSnapshot>> {
        Ok(None)
    }
}

/// Store that keeps the snapshot as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DriveStore for JsonFileStore {
    fn save(&self, snapshot: &DriveSnapshot) -> DosResult<()> {
        let json = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn load(&self) -> DosResult<Option<DriveSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&text)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dos-core-store-{}-{}.json", tag, std::process::id()))
    }

    #[test]
    fn test_null_store() {
        let store = NullStore;
        let snapshot = DriveSnapshot {
            label: String::new(),
            current_directory: "C:".to_string(),
            entries: vec![],
        };
        store.save(&snapshot).unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_json_store_missing_file() {
        let store = JsonFileStore::new(temp_path("missing"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_json_store_save_load() {
        let path = temp_path("roundtrip");
        let store = JsonFileStore::new(&path);
        let snapshot = DriveSnapshot {
            label: "SYSTEM".to_string(),
            current_directory: "C:\\temp".to_string(),
            entries: vec![SnapshotNode::Directory {
                name: "temp".to_string(),
                children: vec![SnapshotNode::File {
                    name: "a.txt".to_string(),
                    content: "hello".to_string(),
                }],
            }],
        };

        store.save(&snapshot).unwrap();
        let loaded = store.load().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, Some(snapshot));
    }

    #[test]
    fn test_snapshot_json_shape() {
        let json = r#"{
            "currentDirectory": "C:",
            "entries": [
                { "type": "file", "name": "readme" },
                { "type": "directory", "name": "bin" }
            ]
        }"#;
        let snapshot: DriveSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.label, "");
        assert_eq!(
            snapshot.entries,
            vec![
                SnapshotNode::File {
                    name: "readme".to_string(),
                    content: String::new(),
                },
                SnapshotNode::Directory {
                    name: "bin".to_string(),
                    children: vec![],
                },
            ]
        );
    }
}
