//! Activity log entries, per-client measurement profiles, and fabric
//! reference data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// An append-only activity log entry. Never edited or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub activity_id: String,
    pub client_id: String,
    pub created_at: DateTime<Utc>,
    pub activity_type: String,
    pub subject: String,
}

/// A client's measurement profile: at most one per client, holding an open
/// attribute set (the shop defines its own measurement names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    pub client_id: String,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

/// A client's style preference profile: at most one per client, open
/// attribute set like [`Measurement`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StylePreference {
    pub client_id: String,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

/// Fabric reference data. Read-only from the engine's point of view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fabric {
    pub fabric_id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measurement_attributes_flatten_into_the_record() {
        let m: Measurement =
            serde_json::from_str(r#"{"client_id":"c1","chest":40,"waist":32.5}"#).unwrap();
        assert_eq!(m.attributes.len(), 2);
        assert_eq!(m.attributes["chest"], serde_json::json!(40));

        let back = serde_json::to_value(&m).unwrap();
        assert_eq!(back["client_id"], "c1");
        assert_eq!(back["waist"], serde_json::json!(32.5));
    }
}
