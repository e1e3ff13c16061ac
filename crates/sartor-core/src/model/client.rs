//! Client records and the referral relation.

use serde::{Deserialize, Serialize};

/// Postal address, all parts optional in legacy data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
}

impl Address {
    /// One-line rendering, skipping empty parts.
    pub fn display_line(&self) -> String {
        [&self.street, &self.city, &self.state, &self.zip]
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A shop client.
///
/// `referred_by_id` points at the client who referred this one; the edges
/// form a forest and must never cycle (enforced at the write site by the
/// engine).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub client_id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: Address,
    /// How the client found the shop (e.g. "Referral", "Walk-in").
    #[serde(default)]
    pub referral_source: String,
    #[serde(default)]
    pub referred_by_id: Option<String>,
    #[serde(default)]
    pub vip_status: bool,
    #[serde(default)]
    pub no_show_count: u32,
    /// Preferred contact channel (e.g. "Email", "Phone").
    #[serde(default)]
    pub communication_pref: String,
    #[serde(default)]
    pub notes: String,
}

impl Client {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
