//! Client-merge policy configuration.

use serde::{Deserialize, Serialize};

/// Which side's Measurement / StylePreference record survives a merge when
/// both clients have one. The losing record is discarded so that at most
/// one profile per client remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfilePolicy {
    /// The kept client's record wins.
    #[default]
    KeepWins,
    /// The merged-away client's record wins.
    MergeWins,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeSettings {
    #[serde(default)]
    pub profile_policy: ProfilePolicy,
}
