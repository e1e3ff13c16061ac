//! The engine facade that composes all components.
//!
//! `CrmEngine` is the entry point a hosting layer (CLI, HTTP server, ...)
//! wraps. Every mutation reads one snapshot and returns a complete
//! replacement; the caller commits it as a whole before it becomes visible
//! to subsequent reads. The engine holds no store of its own.

use crate::clients;
use crate::error::ValidationError;
use crate::merge;
use crate::notify::{LogSink, NotificationSink};
use crate::orders;
use crate::pipeline::OrderPipeline;
use crate::referral::ReferralGraph;
use crate::request::{AppointmentRequest, NewClient, NewOrder};
use crate::scheduler::AppointmentScheduler;
use chrono::Utc;
use sartor_core::config::ShopConfig;
use sartor_core::snapshot::Snapshot;
use std::sync::Arc;

/// The consistency engine for one shop.
pub struct CrmEngine {
    config: ShopConfig,
    notifier: Arc<dyn NotificationSink>,
}

impl CrmEngine {
    /// Create an engine that notifies through the log.
    pub fn new(config: ShopConfig) -> Self {
        Self {
            config,
            notifier: Arc::new(LogSink),
        }
    }

    /// Replace the notification sink.
    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    /// Schedule or edit an appointment.
    pub fn schedule_appointment(
        &self,
        request: &AppointmentRequest,
        snapshot: &Snapshot,
    ) -> Result<Snapshot, ValidationError> {
        AppointmentScheduler::new(&self.config.hours).schedule(request, snapshot, Utc::now())
    }

    /// Move an order to a new stage, notifying the client where the stage
    /// calls for it.
    pub fn move_order(
        &self,
        order_id: &str,
        destination: &str,
        snapshot: &Snapshot,
    ) -> Result<Snapshot, ValidationError> {
        OrderPipeline::move_order(order_id, destination, snapshot, self.notifier.as_ref())
    }

    /// Reposition an order within its stage.
    pub fn reorder_order(
        &self,
        order_id: &str,
        target_position: usize,
        snapshot: &Snapshot,
    ) -> Result<Snapshot, ValidationError> {
        OrderPipeline::reorder_order(order_id, target_position, snapshot)
    }

    /// Duplicate an order as a fresh one due today.
    pub fn clone_order(
        &self,
        order_id: &str,
        snapshot: &Snapshot,
    ) -> Result<Snapshot, ValidationError> {
        OrderPipeline::clone_order(order_id, snapshot, Utc::now().date_naive())
    }

    /// Create a new order in the initial stage.
    pub fn create_order(
        &self,
        request: &NewOrder,
        snapshot: &Snapshot,
    ) -> Result<Snapshot, ValidationError> {
        orders::create_order(request, snapshot, Utc::now().date_naive())
    }

    /// Update an order's pricing, recomputing the balance.
    pub fn set_order_pricing(
        &self,
        order_id: &str,
        total_price: f64,
        deposit_paid: f64,
        snapshot: &Snapshot,
    ) -> Result<Snapshot, ValidationError> {
        orders::set_order_pricing(order_id, total_price, deposit_paid, snapshot)
    }

    /// Create a new client record.
    pub fn create_client(
        &self,
        request: &NewClient,
        snapshot: &Snapshot,
    ) -> Result<Snapshot, ValidationError> {
        clients::create_client(request, snapshot)
    }

    /// Change or clear a client's referrer.
    pub fn set_referred_by(
        &self,
        client_id: &str,
        referrer: Option<&str>,
        snapshot: &Snapshot,
    ) -> Result<Snapshot, ValidationError> {
        clients::set_referred_by(client_id, referrer, snapshot)
    }

    /// Build the referral graph over a snapshot. Traverse it with
    /// [`ReferralGraph::iter`].
    pub fn referral_graph<'a>(&self, snapshot: &'a Snapshot) -> ReferralGraph<'a> {
        ReferralGraph::new(snapshot)
    }

    /// Merge one client into another, atomically across all collections.
    pub fn merge_clients(
        &self,
        keep_id: &str,
        merge_id: &str,
        snapshot: &Snapshot,
    ) -> Result<Snapshot, ValidationError> {
        merge::merge_clients(keep_id, merge_id, snapshot, &self.config.merge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MemorySink;
    use chrono::NaiveDate;
    use sartor_core::model::{Client, Order, OrderStatus};

    fn store() -> Snapshot {
        Snapshot {
            clients: vec![Client {
                client_id: "c1".into(),
                first_name: "Ada".into(),
                last_name: "Marsh".into(),
                email: String::new(),
                phone: String::new(),
                address: Default::default(),
                referral_source: String::new(),
                referred_by_id: None,
                vip_status: false,
                no_show_count: 0,
                communication_pref: String::new(),
                notes: String::new(),
            }],
            orders: vec![Order {
                order_id: "o1".into(),
                client_id: "c1".into(),
                fabric_id: None,
                order_type: "Suit".into(),
                status: OrderStatus::InProduction,
                total_price: 500.0,
                deposit_paid: 200.0,
                balance_due: 300.0,
                photos: vec![],
                due_date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
                specifications: Default::default(),
                measurements: Default::default(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn facade_wires_the_notifier_through_the_pipeline() {
        let sink = Arc::new(MemorySink::new());
        let engine = CrmEngine::new(ShopConfig::default()).with_notifier(sink.clone());

        let next = engine.move_order("o1", "Ready", &store()).unwrap();
        assert_eq!(next.order("o1").unwrap().status, OrderStatus::Ready);
        assert_eq!(sink.drain().len(), 1);
    }

    #[test]
    fn clone_through_the_facade_uses_today() {
        let engine = CrmEngine::new(ShopConfig::default());
        let next = engine.clone_order("o1", &store()).unwrap();
        assert_eq!(next.orders.len(), 2);
        assert_eq!(next.orders[1].due_date, Utc::now().date_naive());
    }
}
