//! The full-store snapshot: every record collection at one point in time,
//! persisted as a single unit.
//!
//! A snapshot is pure data. Mutations are performed by `sartor-engine`,
//! which reads one snapshot and produces a complete replacement; there is
//! no partial write. Missing arrays in a legacy blob default to empty so
//! old data files load without crashing.

use crate::model::{
    Activity, Appointment, Client, Fabric, Measurement, Order, StylePreference,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// All record collections, keyed by the legacy blob's array names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub measurements: Vec<Measurement>,
    #[serde(default)]
    pub style_preferences: Vec<StylePreference>,
    #[serde(default)]
    pub fabrics: Vec<Fabric>,
}

impl Snapshot {
    pub fn client(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.client_id == id)
    }

    pub fn client_mut(&mut self, id: &str) -> Option<&mut Client> {
        self.clients.iter_mut().find(|c| c.client_id == id)
    }

    pub fn order(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.order_id == id)
    }

    pub fn order_mut(&mut self, id: &str) -> Option<&mut Order> {
        self.orders.iter_mut().find(|o| o.order_id == id)
    }

    pub fn appointment(&self, id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.appointment_id == id)
    }

    pub fn fabric(&self, id: &str) -> Option<&Fabric> {
        self.fabrics.iter().find(|f| f.fabric_id == id)
    }

    pub fn measurement_for(&self, client_id: &str) -> Option<&Measurement> {
        self.measurements.iter().find(|m| m.client_id == client_id)
    }

    pub fn style_preference_for(&self, client_id: &str) -> Option<&StylePreference> {
        self.style_preferences
            .iter()
            .find(|p| p.client_id == client_id)
    }

    pub fn orders_for<'a>(&'a self, client_id: &'a str) -> impl Iterator<Item = &'a Order> {
        self.orders.iter().filter(move |o| o.client_id == client_id)
    }

    /// Walk the referral chain upward from `start` and report whether
    /// `target` appears on it. Bounded by a visited set so pre-existing bad
    /// data cannot loop the walk.
    pub fn referral_chain_contains(&self, start: &str, target: &str) -> bool {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut cursor = Some(start);
        while let Some(id) = cursor {
            if id == target {
                return true;
            }
            if !seen.insert(id) {
                return false;
            }
            cursor = self.client(id).and_then(|c| c.referred_by_id.as_deref());
        }
        false
    }

    /// Check every store invariant and report violations without mutating.
    ///
    /// Used by the CLI `check` command and by tests; an empty result means
    /// the snapshot is coherent.
    pub fn verify(&self) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();

        self.check_duplicate_ids(&mut issues);
        self.check_foreign_keys(&mut issues);
        self.check_referral_cycles(&mut issues);
        self.check_profile_uniqueness(&mut issues);
        self.check_balances(&mut issues);
        self.check_appointment_overlaps(&mut issues);

        issues
    }

    fn check_duplicate_ids(&self, issues: &mut Vec<IntegrityIssue>) {
        fn scan<'a>(
            collection: &'static str,
            ids: impl Iterator<Item = &'a str>,
            issues: &mut Vec<IntegrityIssue>,
        ) {
            let mut seen = HashSet::new();
            for id in ids {
                if !seen.insert(id) {
                    issues.push(IntegrityIssue::DuplicateId {
                        collection,
                        id: id.to_string(),
                    });
                }
            }
        }
        scan("clients", self.clients.iter().map(|c| c.client_id.as_str()), issues);
        scan("orders", self.orders.iter().map(|o| o.order_id.as_str()), issues);
        scan(
            "appointments",
            self.appointments.iter().map(|a| a.appointment_id.as_str()),
            issues,
        );
        scan(
            "activities",
            self.activities.iter().map(|a| a.activity_id.as_str()),
            issues,
        );
        scan("fabrics", self.fabrics.iter().map(|f| f.fabric_id.as_str()), issues);
    }

    fn check_foreign_keys(&self, issues: &mut Vec<IntegrityIssue>) {
        let client_ids: HashSet<&str> =
            self.clients.iter().map(|c| c.client_id.as_str()).collect();
        let fabric_ids: HashSet<&str> =
            self.fabrics.iter().map(|f| f.fabric_id.as_str()).collect();

        let mut check_client = |collection: &'static str, record_id: &str, client_id: &str| {
            if !client_ids.contains(client_id) {
                issues.push(IntegrityIssue::DanglingClientRef {
                    collection,
                    record_id: record_id.to_string(),
                    client_id: client_id.to_string(),
                });
            }
        };

        for o in &self.orders {
            check_client("orders", &o.order_id, &o.client_id);
        }
        for a in &self.appointments {
            check_client("appointments", &a.appointment_id, &a.client_id);
        }
        for a in &self.activities {
            check_client("activities", &a.activity_id, &a.client_id);
        }
        for m in &self.measurements {
            check_client("measurements", &m.client_id, &m.client_id);
        }
        for p in &self.style_preferences {
            check_client("style_preferences", &p.client_id, &p.client_id);
        }

        for o in &self.orders {
            if let Some(fabric_id) = &o.fabric_id {
                if !fabric_ids.contains(fabric_id.as_str()) {
                    issues.push(IntegrityIssue::DanglingFabricRef {
                        order_id: o.order_id.clone(),
                        fabric_id: fabric_id.clone(),
                    });
                }
            }
        }

        for c in &self.clients {
            if let Some(referrer) = &c.referred_by_id {
                if !client_ids.contains(referrer.as_str()) {
                    issues.push(IntegrityIssue::DanglingReferrer {
                        client_id: c.client_id.clone(),
                        referred_by_id: referrer.clone(),
                    });
                }
            }
        }
    }

    fn check_referral_cycles(&self, issues: &mut Vec<IntegrityIssue>) {
        for c in &self.clients {
            if let Some(referrer) = &c.referred_by_id {
                if self.referral_chain_contains(referrer, &c.client_id) {
                    issues.push(IntegrityIssue::ReferralCycle {
                        client_id: c.client_id.clone(),
                    });
                }
            }
        }
    }

    fn check_profile_uniqueness(&self, issues: &mut Vec<IntegrityIssue>) {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for m in &self.measurements {
            *counts.entry(m.client_id.as_str()).or_default() += 1;
        }
        for (client_id, n) in counts {
            if n > 1 {
                issues.push(IntegrityIssue::DuplicateProfile {
                    collection: "measurements",
                    client_id: client_id.to_string(),
                });
            }
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for p in &self.style_preferences {
            *counts.entry(p.client_id.as_str()).or_default() += 1;
        }
        for (client_id, n) in counts {
            if n > 1 {
                issues.push(IntegrityIssue::DuplicateProfile {
                    collection: "style_preferences",
                    client_id: client_id.to_string(),
                });
            }
        }
    }

    fn check_balances(&self, issues: &mut Vec<IntegrityIssue>) {
        for o in &self.orders {
            if !o.balance_consistent() {
                issues.push(IntegrityIssue::BalanceMismatch {
                    order_id: o.order_id.clone(),
                    expected: o.total_price - o.deposit_paid,
                    actual: o.balance_due,
                });
            }
        }
    }

    fn check_appointment_overlaps(&self, issues: &mut Vec<IntegrityIssue>) {
        for (i, a) in self.appointments.iter().enumerate() {
            for b in &self.appointments[i + 1..] {
                if a.overlaps(b) {
                    issues.push(IntegrityIssue::AppointmentOverlap {
                        first: a.appointment_id.clone(),
                        second: b.appointment_id.clone(),
                    });
                }
            }
        }
    }
}

/// A single invariant violation found by [`Snapshot::verify`].
#[derive(Debug, Clone, PartialEq)]
pub enum IntegrityIssue {
    DuplicateId {
        collection: &'static str,
        id: String,
    },
    DanglingClientRef {
        collection: &'static str,
        record_id: String,
        client_id: String,
    },
    DanglingFabricRef {
        order_id: String,
        fabric_id: String,
    },
    DanglingReferrer {
        client_id: String,
        referred_by_id: String,
    },
    ReferralCycle {
        client_id: String,
    },
    DuplicateProfile {
        collection: &'static str,
        client_id: String,
    },
    BalanceMismatch {
        order_id: String,
        expected: f64,
        actual: f64,
    },
    AppointmentOverlap {
        first: String,
        second: String,
    },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityIssue::DuplicateId { collection, id } => {
                write!(f, "duplicate id '{}' in {}", id, collection)
            }
            IntegrityIssue::DanglingClientRef {
                collection,
                record_id,
                client_id,
            } => write!(
                f,
                "{} record '{}' references missing client '{}'",
                collection, record_id, client_id
            ),
            IntegrityIssue::DanglingFabricRef { order_id, fabric_id } => write!(
                f,
                "order '{}' references missing fabric '{}'",
                order_id, fabric_id
            ),
            IntegrityIssue::DanglingReferrer {
                client_id,
                referred_by_id,
            } => write!(
                f,
                "client '{}' referred by missing client '{}'",
                client_id, referred_by_id
            ),
            IntegrityIssue::ReferralCycle { client_id } => {
                write!(f, "client '{}' is its own transitive referrer", client_id)
            }
            IntegrityIssue::DuplicateProfile {
                collection,
                client_id,
            } => write!(
                f,
                "client '{}' has more than one {} record",
                client_id, collection
            ),
            IntegrityIssue::BalanceMismatch {
                order_id,
                expected,
                actual,
            } => write!(
                f,
                "order '{}' balance_due is {} but total - deposit is {}",
                order_id, actual, expected
            ),
            IntegrityIssue::AppointmentOverlap { first, second } => {
                write!(f, "appointments '{}' and '{}' overlap", first, second)
            }
        }
    }
}
