//! Core data model for the Sartor tailoring-shop CRM.
//!
//! This crate holds the record types for the five linked collections
//! (clients, orders, appointments, activities, measurement profiles), the
//! [`Snapshot`] that bundles them into one persistable unit, and the YAML
//! configuration types shared across all Sartor crates.
//!
//! The snapshot is pure data: lookup helpers and integrity verification,
//! no mutation logic. All business rules live in `sartor-engine`.

pub mod config;
pub mod model;
pub mod snapshot;

// Re-export commonly used types for convenience
pub use config::{BusinessHours, ConfigError, MergeSettings, ProfilePolicy, ShopConfig, StoreSettings};
pub use model::{
    Activity, Address, Appointment, AppointmentStatus, AppointmentType, Client, Fabric,
    Measurement, Order, OrderStatus, StylePreference,
};
pub use snapshot::{IntegrityIssue, Snapshot};

/// Generate a fresh opaque record identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
