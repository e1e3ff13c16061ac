//! Order creation and pricing.
//!
//! Creation mirrors the order wizard: it validates references, derives the
//! balance, defaults the due date, and snapshots the client's measurement
//! profile into the order.

use crate::error::ValidationError;
use crate::request::NewOrder;
use chrono::NaiveDate;
use sartor_core::model::{Order, OrderStatus};
use sartor_core::snapshot::Snapshot;

/// Create a new order in the initial stage.
pub fn create_order(
    request: &NewOrder,
    snapshot: &Snapshot,
    today: NaiveDate,
) -> Result<Snapshot, ValidationError> {
    if request.client_id.is_empty() {
        return Err(ValidationError::missing_field("client_id"));
    }
    if request.order_type.is_empty() {
        return Err(ValidationError::missing_field("order_type"));
    }
    if snapshot.client(&request.client_id).is_none() {
        return Err(ValidationError::client_not_found(&request.client_id));
    }
    if let Some(fabric_id) = &request.fabric_id {
        if snapshot.fabric(fabric_id).is_none() {
            return Err(ValidationError::fabric_not_found(fabric_id));
        }
    }
    if request.total_price <= 0.0 {
        return Err(ValidationError::invalid_amount(
            "total_price",
            request.total_price,
        ));
    }
    if request.deposit_paid < 0.0 {
        return Err(ValidationError::invalid_amount(
            "deposit_paid",
            request.deposit_paid,
        ));
    }

    // Point-in-time copy of the client's measurement profile.
    let measurements = snapshot
        .measurement_for(&request.client_id)
        .map(|m| m.attributes.clone())
        .unwrap_or_default();

    let mut order = Order {
        order_id: sartor_core::new_id(),
        client_id: request.client_id.clone(),
        fabric_id: request.fabric_id.clone(),
        order_type: request.order_type.clone(),
        status: OrderStatus::initial(),
        total_price: 0.0,
        deposit_paid: 0.0,
        balance_due: 0.0,
        photos: request.photos.clone(),
        due_date: request.due_date.unwrap_or(today),
        specifications: request.specifications.clone(),
        measurements,
    };
    order.set_pricing(request.total_price, request.deposit_paid);

    let mut next = snapshot.clone();
    next.orders.push(order);
    Ok(next)
}

/// Change an order's pricing inputs, recomputing the derived balance.
pub fn set_order_pricing(
    order_id: &str,
    total_price: f64,
    deposit_paid: f64,
    snapshot: &Snapshot,
) -> Result<Snapshot, ValidationError> {
    if total_price < 0.0 {
        return Err(ValidationError::invalid_amount("total_price", total_price));
    }
    if deposit_paid < 0.0 {
        return Err(ValidationError::invalid_amount("deposit_paid", deposit_paid));
    }
    snapshot
        .order(order_id)
        .ok_or_else(|| ValidationError::order_not_found(order_id))?;

    let mut next = snapshot.clone();
    if let Some(order) = next.order_mut(order_id) {
        order.set_pricing(total_price, deposit_paid);
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;
    use sartor_core::model::{Client, Fabric, Measurement};
    use serde_json::json;

    fn base_store() -> Snapshot {
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
        snapshot.fabrics.push(Fabric {
            fabric_id: "f1".into(),
            name: "Navy wool".into(),
        });
        snapshot.measurements.push(Measurement {
            client_id: "c1".into(),
            attributes: [("chest".to_string(), json!(40))].into_iter().collect(),
        });
        snapshot
    }

    fn new_order() -> NewOrder {
        NewOrder {
            client_id: "c1".into(),
            order_type: "Suit".into(),
            fabric_id: Some("f1".into()),
            total_price: 500.0,
            deposit_paid: 200.0,
            due_date: None,
            photos: vec![],
            specifications: Default::default(),
        }
    }

    #[test]
    fn create_derives_balance_and_snapshots_measurements() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let next = create_order(&new_order(), &base_store(), today).unwrap();

        let order = &next.orders[0];
        assert_eq!(order.status, OrderStatus::Consultation);
        assert_eq!(order.balance_due, 300.0);
        assert_eq!(order.due_date, today);
        assert_eq!(order.measurements["chest"], json!(40));
    }

    #[test]
    fn create_rejects_unknown_fabric() {
        let mut request = new_order();
        request.fabric_id = Some("ghost".into());
        let err = create_order(
            &request,
            &base_store(),
            NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
        )
        .unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::FabricNotFound);
    }

    #[test]
    fn create_rejects_non_positive_price() {
        let mut request = new_order();
        request.total_price = 0.0;
        let err = create_order(
            &request,
            &base_store(),
            NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
        )
        .unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidAmount);
    }

    #[test]
    fn pricing_update_recomputes_balance() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let next = create_order(&new_order(), &base_store(), today).unwrap();
        let order_id = next.orders[0].order_id.clone();

        let next = set_order_pricing(&order_id, 800.0, 100.0, &next).unwrap();
        let order = next.order(&order_id).unwrap();
        assert_eq!(order.balance_due, 700.0);
        assert!(next.verify().is_empty());
    }
}
