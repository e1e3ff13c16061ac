//! Versioned shared access on top of a blob backend.

use crate::blob::SnapshotStore;
use crate::error::StoreError;
use sartor_core::snapshot::Snapshot;
use std::sync::Mutex;

struct Inner {
    version: u64,
    snapshot: Snapshot,
}

/// Serializes readers and committers over one snapshot.
///
/// Reads hand out a version alongside the snapshot; a commit names the
/// version it was computed against and is rejected when the store has moved
/// on. Callers retry by re-reading and re-deriving their change.
pub struct SharedStore<S: SnapshotStore> {
    backend: S,
    inner: Mutex<Inner>,
}

impl<S: SnapshotStore> SharedStore<S> {
    /// Load the backend's current blob and start versioning from it.
    pub fn open(backend: S) -> Result<Self, StoreError> {
        let snapshot = backend.load()?;
        Ok(Self {
            backend,
            inner: Mutex::new(Inner {
                version: 0,
                snapshot,
            }),
        })
    }

    /// Current version and a copy of the snapshot at that version.
    pub fn read(&self) -> Result<(u64, Snapshot), StoreError> {
        let inner = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        Ok((inner.version, inner.snapshot.clone()))
    }

    /// Persist `next` and bump the version, provided the caller computed it
    /// against the version the store is still at.
    pub fn commit(&self, base_version: u64, next: Snapshot) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        if inner.version != base_version {
            return Err(StoreError::Conflict {
                expected: base_version,
                found: inner.version,
            });
        }
        self.backend.save(&next)?;
        inner.snapshot = next;
        inner.version += 1;
        Ok(inner.version)
    }

    pub fn into_backend(self) -> S {
        self.backend
    }
}
