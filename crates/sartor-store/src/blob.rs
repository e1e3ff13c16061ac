//! Snapshot blob backends.
//!
//! The persistence collaborator is a key-value blob store holding one JSON
//! document: the whole snapshot. Load and save always move the complete
//! snapshot; there are no partial writes.

use crate::error::StoreError;
use sartor_core::snapshot::Snapshot;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// A backend holding one snapshot blob.
pub trait SnapshotStore: Send + Sync {
    /// Load the current snapshot. An absent blob loads as the empty
    /// snapshot; a blob with missing arrays loads with those collections
    /// empty.
    fn load(&self) -> Result<Snapshot, StoreError>;

    /// Replace the blob with `snapshot`, as one unit.
    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
}

/// File-backed blob: one JSON document on disk.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> Result<Snapshot, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no snapshot blob; starting empty");
                Ok(Snapshot::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(snapshot)?;
        // Write the whole blob to a sibling temp file, then rename over the
        // old one, so a reader never sees a half-written snapshot.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-memory blob, for tests and embedding.
#[derive(Default)]
pub struct MemoryStore {
    slot: RwLock<Snapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Snapshot, StoreError> {
        let slot = self.slot.read().map_err(|_| StoreError::Poisoned)?;
        Ok(slot.clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let mut slot = self.slot.write().map_err(|_| StoreError::Poisoned)?;
        *slot = snapshot.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sartor_core::model::Fabric;

    #[test]
    fn missing_file_loads_as_empty_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("crm.json"));
        let snapshot = store.load().unwrap();
        assert!(snapshot.clients.is_empty());
    }

    #[test]
    fn file_round_trip_preserves_collections() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("crm.json"));

        let mut snapshot = Snapshot::default();
        snapshot.fabrics.push(Fabric {
            fabric_id: "f1".into(),
            name: "Navy wool".into(),
        });
        store.save(&snapshot).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.fabrics.len(), 1);
        assert_eq!(loaded.fabrics[0].name, "Navy wool");
        // No temp file left behind.
        assert!(!dir.path().join("crm.json.tmp").exists());
    }

    #[test]
    fn partial_legacy_blob_loads_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crm.json");
        fs::write(&path, r#"{"clients":[]}"#).unwrap();

        let store = FileStore::new(&path);
        let snapshot = store.load().unwrap();
        assert!(snapshot.appointments.is_empty());
        assert!(snapshot.style_preferences.is_empty());
    }
}
