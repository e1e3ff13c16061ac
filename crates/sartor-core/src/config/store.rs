//! Snapshot blob location.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Path of the JSON snapshot blob.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("crm.json")
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}
