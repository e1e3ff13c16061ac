//! Store error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot blob parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("commit rejected: computed against version {expected} but store is at {found}")]
    Conflict { expected: u64, found: u64 },

    #[error("store lock poisoned")]
    Poisoned,
}
