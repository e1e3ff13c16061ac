//! Sartor consistency engine
//!
//! The business-rule core of the tailoring-shop CRM: the logic that keeps
//! the five linked record collections coherent under mutation.
//!
//! Components:
//! - [`scheduler::AppointmentScheduler`] - business hours and global
//!   double-booking prevention
//! - [`pipeline::OrderPipeline`] - the seven-stage order lifecycle,
//!   in-stage reordering, and duplication
//! - [`referral::ReferralGraph`] - cycle-safe referral forest with revenue
//!   aggregation
//! - [`merge::merge_clients`] - atomic client consolidation with
//!   referential-integrity rewiring
//! - [`engine::CrmEngine`] - the facade a hosting layer wraps
//!
//! Every mutation is a pure function from one snapshot to the next: on
//! failure the input snapshot remains authoritative, so no invariant can be
//! observed half-applied.

pub mod clients;
pub mod engine;
pub mod error;
pub mod merge;
pub mod notify;
pub mod orders;
pub mod pipeline;
pub mod referral;
pub mod request;
pub mod scheduler;

pub use engine::CrmEngine;
pub use error::{ValidationError, ValidationErrorKind};
pub use notify::{LogSink, MemorySink, Notification, NotificationSink, NullSink};
pub use referral::{ReferralGraph, ReferralNode};
pub use request::{AppointmentRequest, NewClient, NewOrder};
