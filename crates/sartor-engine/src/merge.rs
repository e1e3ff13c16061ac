//! Client-record merging.
//!
//! Consolidates two clients and every dependent record into one. The whole
//! merge is a single transformation from one snapshot to the next, so a
//! half-applied merge is structurally impossible: either the caller commits
//! the returned snapshot or nothing happened.

use crate::error::ValidationError;
use sartor_core::config::{MergeSettings, ProfilePolicy};
use sartor_core::snapshot::Snapshot;

/// Merge client `merge_id` into client `keep_id`.
///
/// The kept client retains its identity and scalar fields; notes are
/// concatenated with a provenance line naming the merged client. Every
/// record referencing `merge_id` (orders, activities, appointments,
/// measurement and style-preference profiles, referral edges) is rewired to
/// `keep_id`, and `merge_id`'s client record is removed.
pub fn merge_clients(
    keep_id: &str,
    merge_id: &str,
    snapshot: &Snapshot,
    settings: &MergeSettings,
) -> Result<Snapshot, ValidationError> {
    if keep_id == merge_id {
        return Err(ValidationError::self_merge(keep_id));
    }
    snapshot
        .client(keep_id)
        .ok_or_else(|| ValidationError::client_not_found(keep_id))?;
    let merged = snapshot
        .client(merge_id)
        .ok_or_else(|| ValidationError::client_not_found(merge_id))?
        .clone();

    let mut next = snapshot.clone();

    next.clients.retain(|c| c.client_id != merge_id);
    for client in &mut next.clients {
        if client.referred_by_id.as_deref() == Some(merge_id) {
            // Rewiring the kept client's own referrer would create a
            // self-edge; clear it instead.
            client.referred_by_id = if client.client_id == keep_id {
                None
            } else {
                Some(keep_id.to_string())
            };
        }
        if client.client_id == keep_id {
            client.notes = format!(
                "{}\nMerged from {}: {}",
                client.notes,
                merged.full_name(),
                merged.notes
            );
        }
    }

    for order in &mut next.orders {
        if order.client_id == merge_id {
            order.client_id = keep_id.to_string();
        }
    }
    for activity in &mut next.activities {
        if activity.client_id == merge_id {
            activity.client_id = keep_id.to_string();
        }
    }
    for appointment in &mut next.appointments {
        if appointment.client_id == merge_id {
            appointment.client_id = keep_id.to_string();
        }
    }

    reassign_profiles(&mut next, keep_id, merge_id, settings.profile_policy);

    Ok(next)
}

/// Apply the configured profile policy to the one-per-client collections.
///
/// A profile on the merged side moves to the kept client when the kept
/// client has none; when both exist the policy picks the survivor and the
/// loser is discarded, preserving at-most-one-per-client.
fn reassign_profiles(
    next: &mut Snapshot,
    keep_id: &str,
    merge_id: &str,
    policy: ProfilePolicy,
) {
    let keep_has = next.measurement_for(keep_id).is_some();
    let merge_has = next.measurement_for(merge_id).is_some();
    match (keep_has, merge_has, policy) {
        (_, false, _) => {}
        (false, true, _) | (true, true, ProfilePolicy::MergeWins) => {
            next.measurements.retain(|m| m.client_id != keep_id);
            for m in &mut next.measurements {
                if m.client_id == merge_id {
                    m.client_id = keep_id.to_string();
                }
            }
        }
        (true, true, ProfilePolicy::KeepWins) => {
            next.measurements.retain(|m| m.client_id != merge_id);
        }
    }

    let keep_has = next.style_preference_for(keep_id).is_some();
    let merge_has = next.style_preference_for(merge_id).is_some();
    match (keep_has, merge_has, policy) {
        (_, false, _) => {}
        (false, true, _) | (true, true, ProfilePolicy::MergeWins) => {
            next.style_preferences.retain(|p| p.client_id != keep_id);
            for p in &mut next.style_preferences {
                if p.client_id == merge_id {
                    p.client_id = keep_id.to_string();
                }
            }
        }
        (true, true, ProfilePolicy::KeepWins) => {
            next.style_preferences.retain(|p| p.client_id != merge_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;
    use chrono::{NaiveDate, TimeZone, Utc};
    use sartor_core::model::{
        Appointment, AppointmentStatus, AppointmentType, Client, Measurement, Order, OrderStatus,
        StylePreference,
    };
    use serde_json::json;

    fn client(id: &str, referred_by: Option<&str>, notes: &str) -> Client {
        Client {
            client_id: id.into(),
            first_name: id.to_uppercase(),
            last_name: "Test".into(),
            email: format!("{id}@example.com"),
            phone: String::new(),
            address: Default::default(),
            referral_source: String::new(),
            referred_by_id: referred_by.map(String::from),
            vip_status: false,
            no_show_count: 0,
            communication_pref: String::new(),
            notes: notes.into(),
        }
    }

    fn order(id: &str, client_id: &str, total: f64) -> Order {
        Order {
            order_id: id.into(),
            client_id: client_id.into(),
            fabric_id: None,
            order_type: "Suit".into(),
            status: OrderStatus::Consultation,
            total_price: total,
            deposit_paid: 0.0,
            balance_due: total,
            photos: vec![],
            due_date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            specifications: Default::default(),
            measurements: Default::default(),
        }
    }

    fn measurement(client_id: &str, chest: i64) -> Measurement {
        Measurement {
            client_id: client_id.into(),
            attributes: [("chest".to_string(), json!(chest))].into_iter().collect(),
        }
    }

    fn store() -> Snapshot {
        Snapshot {
            clients: vec![
                client("a", None, "prefers wool"),
                client("b", None, "linen only"),
                client("c", Some("b"), ""),
            ],
            orders: vec![order("o1", "a", 200.0), order("o2", "b", 300.0)],
            appointments: vec![Appointment {
                appointment_id: "ap1".into(),
                client_id: "b".into(),
                kind: AppointmentType::Fitting,
                start_time: Utc.with_ymd_and_hms(2026, 9, 1, 10, 0, 0).unwrap(),
                duration_minutes: 30,
                status: AppointmentStatus::Scheduled,
                notes: None,
            }],
            measurements: vec![measurement("a", 40), measurement("b", 42)],
            style_preferences: vec![StylePreference {
                client_id: "b".into(),
                attributes: [("fit".to_string(), json!("slim"))].into_iter().collect(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn merge_consolidates_every_dependent_collection() {
        let next = merge_clients("a", "b", &store(), &MergeSettings::default()).unwrap();

        // B is gone, A keeps its identity.
        assert!(next.client("b").is_none());
        let kept = next.client("a").unwrap();
        assert!(kept.notes.starts_with("prefers wool"));
        assert!(kept.notes.contains("Merged from B Test: linen only"));

        // Orders: both now belong to A, revenue total preserved.
        let total: f64 = next.orders_for("a").map(|o| o.total_price).sum();
        assert_eq!(total, 500.0);
        assert_eq!(next.orders_for("a").count(), 2);

        // Appointment and referral edge rewired.
        assert_eq!(next.appointment("ap1").unwrap().client_id, "a");
        assert_eq!(
            next.client("c").unwrap().referred_by_id.as_deref(),
            Some("a")
        );

        // Keep-wins profile policy: A's measurement survives, B's style
        // preference (A had none) is reassigned.
        assert_eq!(next.measurements.len(), 1);
        assert_eq!(next.measurement_for("a").unwrap().attributes["chest"], json!(40));
        assert_eq!(
            next.style_preference_for("a").unwrap().attributes["fit"],
            json!("slim")
        );

        // The result upholds every store invariant.
        assert!(next.verify().is_empty());
    }

    #[test]
    fn merge_wins_policy_keeps_the_merged_profile() {
        let settings = MergeSettings {
            profile_policy: ProfilePolicy::MergeWins,
        };
        let next = merge_clients("a", "b", &store(), &settings).unwrap();
        assert_eq!(next.measurements.len(), 1);
        assert_eq!(next.measurement_for("a").unwrap().attributes["chest"], json!(42));
    }

    #[test]
    fn merging_a_client_into_its_referree_clears_the_edge() {
        // c is referred by b; merging b into c must not leave c referring
        // to itself.
        let next = merge_clients("c", "b", &store(), &MergeSettings::default()).unwrap();
        assert!(next.client("c").unwrap().referred_by_id.is_none());
        assert!(next.verify().is_empty());
    }

    #[test]
    fn unknown_ids_and_self_merge_are_rejected() {
        let snapshot = store();
        let err = merge_clients("a", "ghost", &snapshot, &MergeSettings::default()).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::ClientNotFound);

        let err = merge_clients("ghost", "a", &snapshot, &MergeSettings::default()).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::ClientNotFound);

        let err = merge_clients("a", "a", &snapshot, &MergeSettings::default()).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::SelfMerge);
    }
}
