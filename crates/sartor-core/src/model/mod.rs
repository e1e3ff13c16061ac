//! Record types for the five linked CRM collections.
//!
//! All identifiers are opaque strings and foreign keys are always id
//! references, never embedded copies. Serialization names match the
//! legacy snapshot blob so existing data files load unchanged.

pub mod appointment;
pub mod client;
pub mod order;
pub mod records;

pub use appointment::{Appointment, AppointmentStatus, AppointmentType};
pub use client::{Address, Client};
pub use order::{Order, OrderStatus};
pub use records::{Activity, Fabric, Measurement, StylePreference};
