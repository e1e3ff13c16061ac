//! Snapshot persistence for the tailoring CRM.
//!
//! Two layers: blob backends ([`SnapshotStore`], with file and in-memory
//! implementations) and [`SharedStore`], which adds versioned read/commit
//! on top so concurrent writers cannot silently overwrite each other.

pub mod blob;
pub mod error;
pub mod shared;

pub use blob::{FileStore, MemoryStore, SnapshotStore};
pub use error::StoreError;
pub use shared::SharedStore;
