//! Appointment scheduling with global conflict detection.
//!
//! The shop has one scheduling capacity: no two appointments anywhere in
//! the store may overlap. Validation order is fixed and the first failure
//! wins: required fields, client existence, business hours, overlap.

use crate::error::ValidationError;
use crate::request::AppointmentRequest;
use chrono::{DateTime, Duration, Utc};
use sartor_core::config::BusinessHours;
use sartor_core::model::{Activity, Appointment, AppointmentStatus};
use sartor_core::snapshot::Snapshot;

/// Validates and places appointments against business hours and against
/// every existing appointment.
pub struct AppointmentScheduler<'a> {
    hours: &'a BusinessHours,
}

impl<'a> AppointmentScheduler<'a> {
    pub fn new(hours: &'a BusinessHours) -> Self {
        Self { hours }
    }

    /// Schedule a new appointment, or replace the one named by
    /// `request.editing_id` while preserving its identity and status.
    ///
    /// On success returns a full replacement snapshot containing the
    /// appointment and, for newly created appointments only, one
    /// "Appointment Scheduled" activity. Both land in the same snapshot, so
    /// the caller's single write commits them atomically.
    pub fn schedule(
        &self,
        request: &AppointmentRequest,
        snapshot: &Snapshot,
        now: DateTime<Utc>,
    ) -> Result<Snapshot, ValidationError> {
        if request.client_id.is_empty() {
            return Err(ValidationError::missing_field("client_id"));
        }
        if snapshot.client(&request.client_id).is_none() {
            return Err(ValidationError::client_not_found(&request.client_id));
        }

        let prior = match &request.editing_id {
            Some(id) => Some(
                snapshot
                    .appointment(id)
                    .ok_or_else(|| ValidationError::appointment_not_found(id))?,
            ),
            None => None,
        };

        if !self.hours.allows(request.start_time) {
            return Err(ValidationError::outside_business_hours(
                &self.hours.describe(),
            ));
        }

        let duration = request.kind.duration_minutes();
        let end = request.start_time + Duration::minutes(duration);
        for existing in &snapshot.appointments {
            if Some(existing.appointment_id.as_str()) == request.editing_id.as_deref() {
                continue;
            }
            if request.start_time < existing.end_time() && existing.start_time < end {
                return Err(ValidationError::scheduling_conflict(
                    &existing.appointment_id,
                ));
            }
        }

        let appointment = Appointment {
            appointment_id: prior
                .map(|p| p.appointment_id.clone())
                .unwrap_or_else(sartor_core::new_id),
            client_id: request.client_id.clone(),
            kind: request.kind,
            start_time: request.start_time,
            duration_minutes: duration,
            status: prior
                .map(|p| p.status)
                .unwrap_or(AppointmentStatus::Scheduled),
            notes: request.notes.clone(),
        };

        let mut next = snapshot.clone();
        match &request.editing_id {
            Some(id) => {
                if let Some(slot) = next
                    .appointments
                    .iter_mut()
                    .find(|a| a.appointment_id == *id)
                {
                    *slot = appointment;
                }
            }
            None => {
                next.activities.push(Activity {
                    activity_id: sartor_core::new_id(),
                    client_id: request.client_id.clone(),
                    created_at: now,
                    activity_type: "Appointment Scheduled".to_string(),
                    subject: format!(
                        "{} on {}",
                        request.kind,
                        request.start_time.format("%Y-%m-%d %H:%M")
                    ),
                });
                next.appointments.push(appointment);
            }
        }

        Ok(next)
    }
}
