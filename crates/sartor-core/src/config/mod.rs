//! Configuration types for the Sartor CRM.
//!
//! Configuration is loaded from a single YAML file (sartor.yaml) and every
//! section has working defaults, so a missing or empty file yields a usable
//! setup: Mon-Fri 10:00-18:30 hours, keep-wins merge policy, `crm.json`
//! snapshot blob.

pub mod hours;
pub mod merge;
pub mod store;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub use hours::BusinessHours;
pub use merge::{MergeSettings, ProfilePolicy};
pub use store::StoreSettings;

/// Complete shop configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Shop name, used in log output only.
    #[serde(default)]
    pub shop_name: Option<String>,

    /// Appointment business hours.
    #[serde(default)]
    pub hours: BusinessHours,

    /// Client-merge policy knobs.
    #[serde(default)]
    pub merge: MergeSettings,

    /// Snapshot blob location.
    #[serde(default)]
    pub store: StoreSettings,
}

impl ShopConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(ConfigError::from)
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_defaults() {
        let config = ShopConfig::from_yaml("{}").unwrap();
        assert!(config.shop_name.is_none());
        assert_eq!(config.merge.profile_policy, ProfilePolicy::KeepWins);
        assert_eq!(config.store.data_file.to_str(), Some("crm.json"));
    }

    #[test]
    fn sections_parse_from_yaml() {
        let config = ShopConfig::from_yaml(
            r#"
shop_name: Bespoke & Sons
hours:
  open: "09:00:00"
  latest_start: "17:00:00"
merge:
  profile_policy: merge_wins
store:
  data_file: /var/lib/sartor/crm.json
"#,
        )
        .unwrap();
        assert_eq!(config.shop_name.as_deref(), Some("Bespoke & Sons"));
        assert_eq!(config.merge.profile_policy, ProfilePolicy::MergeWins);
        assert_eq!(
            config.hours.open,
            chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
    }
}
