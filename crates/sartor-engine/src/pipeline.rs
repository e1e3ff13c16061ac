//! Order lifecycle: cross-stage transitions, in-stage reordering, and
//! order duplication.

use crate::error::ValidationError;
use crate::notify::{Notification, NotificationSink};
use chrono::NaiveDate;
use sartor_core::model::{Order, OrderStatus};
use sartor_core::snapshot::Snapshot;

/// State machine over the seven-stage order status sequence.
pub struct OrderPipeline;

impl OrderPipeline {
    /// Move an order into a new stage.
    ///
    /// The destination is parsed against the seven defined stages; an
    /// unrecognized value is rejected, never coerced. Entering "First
    /// Fitting" or "Ready" notifies the client through `sink`; delivery is
    /// fire-and-forget and cannot fail the mutation.
    pub fn move_order(
        order_id: &str,
        destination: &str,
        snapshot: &Snapshot,
        sink: &dyn NotificationSink,
    ) -> Result<Snapshot, ValidationError> {
        let status = OrderStatus::parse(destination)
            .ok_or_else(|| ValidationError::invalid_status(destination))?;
        let order = snapshot
            .order(order_id)
            .ok_or_else(|| ValidationError::order_not_found(order_id))?;

        let message = match status {
            OrderStatus::FirstFitting => Some("Client notified: First fitting scheduled."),
            OrderStatus::Ready => Some("Client notified: Garment ready for pickup!"),
            _ => None,
        };

        let mut next = snapshot.clone();
        if let Some(slot) = next.order_mut(order_id) {
            slot.status = status;
        }

        if let Some(message) = message {
            sink.deliver(&Notification {
                order_id: order_id.to_string(),
                client_id: order.client_id.clone(),
                stage: status,
                message: message.to_string(),
            });
        }

        Ok(next)
    }

    /// Reposition an order among the orders sharing its stage.
    ///
    /// Stable insertion semantics: the order is lifted out of its current
    /// position and reinserted at `target_position` within the stage; every
    /// other order in the stage keeps its relative sequence, and orders in
    /// other stages are untouched.
    pub fn reorder_order(
        order_id: &str,
        target_position: usize,
        snapshot: &Snapshot,
    ) -> Result<Snapshot, ValidationError> {
        let status = snapshot
            .order(order_id)
            .ok_or_else(|| ValidationError::order_not_found(order_id))?
            .status;

        // Global indices of the stage's orders, in stored sequence.
        let slots: Vec<usize> = snapshot
            .orders
            .iter()
            .enumerate()
            .filter(|(_, o)| o.status == status)
            .map(|(i, _)| i)
            .collect();
        if target_position >= slots.len() {
            return Err(ValidationError::position_out_of_range(
                target_position,
                slots.len(),
            ));
        }

        let mut stage: Vec<Order> = slots.iter().map(|&i| snapshot.orders[i].clone()).collect();
        let from = stage
            .iter()
            .position(|o| o.order_id == order_id)
            .ok_or_else(|| ValidationError::order_not_found(order_id))?;
        let moved = stage.remove(from);
        stage.insert(target_position, moved);

        let mut next = snapshot.clone();
        for (slot, order) in slots.into_iter().zip(stage) {
            next.orders[slot] = order;
        }
        Ok(next)
    }

    /// Duplicate an order as a fresh one: new id, status reset to the
    /// initial stage, deposit zeroed, balance equal to the full price,
    /// photos cleared, due date set to `today`.
    pub fn clone_order(
        order_id: &str,
        snapshot: &Snapshot,
        today: NaiveDate,
    ) -> Result<Snapshot, ValidationError> {
        let source = snapshot
            .order(order_id)
            .ok_or_else(|| ValidationError::order_not_found(order_id))?;

        let mut cloned = source.clone();
        cloned.order_id = sartor_core::new_id();
        cloned.status = OrderStatus::initial();
        cloned.deposit_paid = 0.0;
        cloned.balance_due = cloned.total_price;
        cloned.photos.clear();
        cloned.due_date = today;

        let mut next = snapshot.clone();
        next.orders.push(cloned);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;
    use crate::notify::{MemorySink, NullSink};
    use sartor_core::model::Client;
    use std::collections::BTreeMap;

    fn order(id: &str, status: OrderStatus) -> Order {
        Order {
            order_id: id.into(),
            client_id: "c1".into(),
            fabric_id: None,
            order_type: "Suit".into(),
            status,
            total_price: 500.0,
            deposit_paid: 200.0,
            balance_due: 300.0,
            photos: vec!["https://example.com/1.jpg".into()],
            due_date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            specifications: BTreeMap::new(),
            measurements: BTreeMap::new(),
        }
    }

    fn store(orders: Vec<Order>) -> Snapshot {
        let mut snapshot = Snapshot::default();
        snapshot.clients.push(Client {
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
        });
        snapshot.orders = orders;
        snapshot
    }

    #[test]
    fn moving_to_ready_updates_status_and_notifies() {
        let snapshot = store(vec![order("o1", OrderStatus::InProduction)]);
        let sink = MemorySink::new();

        let next = OrderPipeline::move_order("o1", "Ready", &snapshot, &sink).unwrap();
        assert_eq!(next.order("o1").unwrap().status, OrderStatus::Ready);

        let sent = sink.drain();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].message, "Client notified: Garment ready for pickup!");
        assert_eq!(sent[0].client_id, "c1");
    }

    #[test]
    fn moving_to_first_fitting_notifies_but_fabric_selected_does_not() {
        let snapshot = store(vec![order("o1", OrderStatus::Consultation)]);
        let sink = MemorySink::new();

        let next =
            OrderPipeline::move_order("o1", "First Fitting", &snapshot, &sink).unwrap();
        assert_eq!(sink.drain().len(), 1);

        let next =
            OrderPipeline::move_order("o1", "Fabric Selected", &next, &sink).unwrap();
        assert_eq!(next.order("o1").unwrap().status, OrderStatus::FabricSelected);
        assert!(sink.drain().is_empty());
    }

    #[test]
    fn unrecognized_destination_is_rejected() {
        let snapshot = store(vec![order("o1", OrderStatus::Consultation)]);
        let err = OrderPipeline::move_order("o1", "Shipped", &snapshot, &NullSink).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidStatus);
    }

    #[test]
    fn reorder_is_stable_within_the_stage() {
        let snapshot = store(vec![
            order("a", OrderStatus::InProduction),
            order("x", OrderStatus::Ready),
            order("b", OrderStatus::InProduction),
            order("c", OrderStatus::InProduction),
        ]);

        let next = OrderPipeline::reorder_order("c", 0, &snapshot).unwrap();
        let in_production: Vec<&str> = next
            .orders
            .iter()
            .filter(|o| o.status == OrderStatus::InProduction)
            .map(|o| o.order_id.as_str())
            .collect();
        assert_eq!(in_production, vec!["c", "a", "b"]);
        // The other stage is untouched, and overall slots stay aligned.
        assert_eq!(next.orders[1].order_id, "x");
    }

    #[test]
    fn reorder_rejects_out_of_range_position() {
        let snapshot = store(vec![order("a", OrderStatus::Ready)]);
        let err = OrderPipeline::reorder_order("a", 3, &snapshot).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::PositionOutOfRange);
    }

    #[test]
    fn clone_resets_lifecycle_fields() {
        let snapshot = store(vec![order("o1", OrderStatus::Ready)]);
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();

        let next = OrderPipeline::clone_order("o1", &snapshot, today).unwrap();
        assert_eq!(next.orders.len(), 2);
        let clone = &next.orders[1];
        assert_ne!(clone.order_id, "o1");
        assert_eq!(clone.status, OrderStatus::Consultation);
        assert_eq!(clone.deposit_paid, 0.0);
        assert_eq!(clone.balance_due, 500.0);
        assert!(clone.photos.is_empty());
        assert_eq!(clone.due_date, today);
        // Shared fields are copied.
        assert_eq!(clone.client_id, "c1");
        assert_eq!(clone.total_price, 500.0);
    }
}
