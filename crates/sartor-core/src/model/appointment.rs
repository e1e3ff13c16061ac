//! Appointment records and their fixed per-type durations.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Appointment kind. Each kind has a fixed duration; the stored
/// `duration_minutes` is always derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentType {
    Consultation,
    Fitting,
    Pickup,
}

impl AppointmentType {
    pub const ALL: [AppointmentType; 3] = [
        AppointmentType::Consultation,
        AppointmentType::Fitting,
        AppointmentType::Pickup,
    ];

    pub fn duration_minutes(self) -> i64 {
        match self {
            AppointmentType::Consultation => 60,
            AppointmentType::Fitting => 30,
            AppointmentType::Pickup => 15,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentType::Consultation => "Consultation",
            AppointmentType::Fitting => "Fitting",
            AppointmentType::Pickup => "Pickup",
        }
    }

    pub fn parse(s: &str) -> Option<AppointmentType> {
        AppointmentType::ALL.iter().copied().find(|t| t.as_str() == s)
    }
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Appointment lifecycle. Completed, No-show, and Cancelled are terminal;
/// appointments are never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    #[serde(rename = "No-show")]
    NoShow,
    Cancelled,
}

/// A scheduled visit. The shop has a single scheduling capacity, so no two
/// appointments may overlap in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub appointment_id: String,
    pub client_id: String,
    #[serde(rename = "type")]
    pub kind: AppointmentType,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: i64,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Appointment {
    pub fn end_time(&self) -> DateTime<Utc> {
        self.start_time + Duration::minutes(self.duration_minutes)
    }

    /// Half-open interval intersection: an appointment ending exactly when
    /// another begins does not overlap it.
    pub fn overlaps(&self, other: &Appointment) -> bool {
        self.start_time < other.end_time() && other.start_time < self.end_time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn appt(id: &str, start: DateTime<Utc>, minutes: i64) -> Appointment {
        Appointment {
            appointment_id: id.into(),
            client_id: "c1".into(),
            kind: AppointmentType::Fitting,
            start_time: start,
            duration_minutes: minutes,
            status: AppointmentStatus::Scheduled,
            notes: None,
        }
    }

    #[test]
    fn durations_are_fixed_per_type() {
        assert_eq!(AppointmentType::Consultation.duration_minutes(), 60);
        assert_eq!(AppointmentType::Fitting.duration_minutes(), 30);
        assert_eq!(AppointmentType::Pickup.duration_minutes(), 15);
    }

    #[test]
    fn shared_boundary_does_not_overlap() {
        let t0 = Utc.with_ymd_and_hms(2026, 9, 1, 10, 0, 0).unwrap();
        let a = appt("a", t0, 60);
        let b = appt("b", t0 + Duration::minutes(60), 30);
        let c = appt("c", t0 + Duration::minutes(15), 30);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn no_show_status_uses_legacy_spelling() {
        let json = serde_json::to_string(&AppointmentStatus::NoShow).unwrap();
        assert_eq!(json, "\"No-show\"");
    }
}
