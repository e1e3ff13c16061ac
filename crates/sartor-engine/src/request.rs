//! Mutation request types.
//!
//! These carry the caller's input into the engine. They are plain data;
//! all validation happens in the component that consumes them.

use chrono::{DateTime, NaiveDate, Utc};
use sartor_core::model::AppointmentType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Request to schedule a new appointment or edit an existing one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentRequest {
    pub client_id: String,
    pub kind: AppointmentType,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
    /// When present, the appointment being replaced in place. Its own prior
    /// interval is excluded from conflict detection and its status is
    /// preserved.
    #[serde(default)]
    pub editing_id: Option<String>,
}

/// Request to create a new client record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewClient {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub referral_source: String,
    #[serde(default)]
    pub referred_by_id: Option<String>,
    #[serde(default)]
    pub vip_status: bool,
    #[serde(default)]
    pub communication_pref: String,
    #[serde(default)]
    pub notes: String,
}

/// Request to create a new order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub client_id: String,
    pub order_type: String,
    #[serde(default)]
    pub fabric_id: Option<String>,
    pub total_price: f64,
    #[serde(default)]
    pub deposit_paid: f64,
    /// Defaults to today when absent.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub specifications: BTreeMap<String, Value>,
}
