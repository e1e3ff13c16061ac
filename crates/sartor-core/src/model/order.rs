//! Order records and the seven-stage status pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// The fixed, ordered garment order pipeline.
///
/// Serialized with the display strings the legacy snapshot blob uses
/// ("Fabric Selected", "Picked Up", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Consultation,
    #[serde(rename = "Fabric Selected")]
    FabricSelected,
    #[serde(rename = "In Production")]
    InProduction,
    #[serde(rename = "First Fitting")]
    FirstFitting,
    #[serde(rename = "Final Fitting")]
    FinalFitting,
    Ready,
    #[serde(rename = "Picked Up")]
    PickedUp,
}

impl OrderStatus {
    /// All stages in pipeline order.
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Consultation,
        OrderStatus::FabricSelected,
        OrderStatus::InProduction,
        OrderStatus::FirstFitting,
        OrderStatus::FinalFitting,
        OrderStatus::Ready,
        OrderStatus::PickedUp,
    ];

    /// The stage every new (or cloned) order starts in.
    pub const fn initial() -> OrderStatus {
        OrderStatus::Consultation
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Consultation => "Consultation",
            OrderStatus::FabricSelected => "Fabric Selected",
            OrderStatus::InProduction => "In Production",
            OrderStatus::FirstFitting => "First Fitting",
            OrderStatus::FinalFitting => "Final Fitting",
            OrderStatus::Ready => "Ready",
            OrderStatus::PickedUp => "Picked Up",
        }
    }

    /// Parse a display string. Unrecognized values return `None`; callers
    /// must reject them rather than coerce.
    pub fn parse(s: &str) -> Option<OrderStatus> {
        OrderStatus::ALL.iter().copied().find(|st| st.as_str() == s)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A custom garment order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub client_id: String,
    #[serde(default)]
    pub fabric_id: Option<String>,
    /// Garment category (e.g. "Suit", "Dress").
    #[serde(default)]
    pub order_type: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub deposit_paid: f64,
    /// Derived: always `total_price - deposit_paid`. Recomputed via
    /// [`Order::set_pricing`] whenever either input changes.
    #[serde(default)]
    pub balance_due: f64,
    #[serde(default)]
    pub photos: Vec<String>,
    pub due_date: NaiveDate,
    /// Shop-defined custom fields, open-ended by design.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub specifications: BTreeMap<String, Value>,
    /// Point-in-time copy of the client's measurement profile, taken when
    /// the order was created.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub measurements: BTreeMap<String, Value>,
}

impl Order {
    /// Set pricing inputs and recompute the derived balance.
    pub fn set_pricing(&mut self, total_price: f64, deposit_paid: f64) {
        self.total_price = total_price;
        self.deposit_paid = deposit_paid;
        self.balance_due = total_price - deposit_paid;
    }

    /// Whether the stored balance matches its derivation.
    pub fn balance_consistent(&self) -> bool {
        (self.balance_due - (self.total_price - self.deposit_paid)).abs() < 1e-9
    }
}
