//! Validation error types for the consistency engine.
//!
//! Every mutation entry point returns one of these on failure. The previous
//! snapshot remains authoritative: the engine never mutates its input, so a
//! failed mutation cannot leave the store violating an invariant.

use std::fmt;

/// Error type for rejected mutations.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The kind of validation error.
    pub kind: ValidationErrorKind,
    /// Human-readable error message.
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Whether this error is a referential failure (a foreign key that does
    /// not resolve, or a referral edge that would close a cycle).
    pub fn is_referential(&self) -> bool {
        self.kind.is_referential()
    }

    // =========================================================================
    // FIELD AND INPUT ERRORS
    // =========================================================================

    /// Create a missing required field error.
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ValidationErrorKind::MissingField,
            format!("Required field '{}' is missing or empty", field),
        )
    }

    /// Create an invalid order status error.
    pub fn invalid_status(value: &str) -> Self {
        Self::new(
            ValidationErrorKind::InvalidStatus,
            format!("'{}' is not one of the defined order stages", value),
        )
    }

    /// Create an invalid amount error.
    pub fn invalid_amount(field: &str, value: f64) -> Self {
        Self::new(
            ValidationErrorKind::InvalidAmount,
            format!("Value {} for '{}' is not a valid amount", value, field),
        )
    }

    /// Create a duplicate contact info error.
    pub fn duplicate_contact(field: &str, value: &str) -> Self {
        Self::new(
            ValidationErrorKind::DuplicateContact,
            format!("Another client already uses {} '{}'", field, value),
        )
    }

    /// Create a reorder position error.
    pub fn position_out_of_range(position: usize, len: usize) -> Self {
        Self::new(
            ValidationErrorKind::PositionOutOfRange,
            format!(
                "Target position {} is out of range for a stage with {} orders",
                position, len
            ),
        )
    }

    /// Create a self-merge error.
    pub fn self_merge(client_id: &str) -> Self {
        Self::new(
            ValidationErrorKind::SelfMerge,
            format!("Client '{}' cannot be merged into itself", client_id),
        )
    }

    // =========================================================================
    // SCHEDULING ERRORS
    // =========================================================================

    /// Create a business-hours violation error.
    pub fn outside_business_hours(window: &str) -> Self {
        Self::new(
            ValidationErrorKind::OutsideBusinessHours,
            format!("Appointments are only available {}", window),
        )
    }

    /// Create a scheduling conflict error.
    pub fn scheduling_conflict(other_id: &str) -> Self {
        Self::new(
            ValidationErrorKind::SchedulingConflict,
            format!(
                "This time conflicts with existing appointment '{}'",
                other_id
            ),
        )
    }

    // =========================================================================
    // REFERENTIAL ERRORS
    // =========================================================================

    /// Create a client not found error.
    pub fn client_not_found(id: &str) -> Self {
        Self::new(
            ValidationErrorKind::ClientNotFound,
            format!("Client '{}' does not exist", id),
        )
    }

    /// Create an order not found error.
    pub fn order_not_found(id: &str) -> Self {
        Self::new(
            ValidationErrorKind::OrderNotFound,
            format!("Order '{}' does not exist", id),
        )
    }

    /// Create an appointment not found error.
    pub fn appointment_not_found(id: &str) -> Self {
        Self::new(
            ValidationErrorKind::AppointmentNotFound,
            format!("Appointment '{}' does not exist", id),
        )
    }

    /// Create a fabric not found error.
    pub fn fabric_not_found(id: &str) -> Self {
        Self::new(
            ValidationErrorKind::FabricNotFound,
            format!("Fabric '{}' does not exist", id),
        )
    }

    /// Create a referral cycle error.
    pub fn referral_cycle(client_id: &str, referrer_id: &str) -> Self {
        Self::new(
            ValidationErrorKind::ReferralCycle,
            format!(
                "Making '{}' the referrer of '{}' would create a referral cycle",
                referrer_id, client_id
            ),
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    // =========================================================================
    // Field and input errors
    // =========================================================================
    /// A required field is missing or empty.
    MissingField,
    /// An order status value is not one of the seven stages.
    InvalidStatus,
    /// A price or deposit amount is out of range.
    InvalidAmount,
    /// Email or phone duplicates an existing client.
    DuplicateContact,
    /// A reorder target position does not exist in the stage.
    PositionOutOfRange,
    /// Keep and merge ids are the same client.
    SelfMerge,

    // =========================================================================
    // Scheduling errors
    // =========================================================================
    /// Start time falls outside business hours.
    OutsideBusinessHours,
    /// The requested slot overlaps another appointment.
    SchedulingConflict,

    // =========================================================================
    // Referential errors
    // =========================================================================
    /// client_id does not resolve.
    ClientNotFound,
    /// order_id does not resolve.
    OrderNotFound,
    /// appointment_id does not resolve.
    AppointmentNotFound,
    /// fabric_id does not resolve.
    FabricNotFound,
    /// A referred_by_id write would close a cycle.
    ReferralCycle,
}

impl ValidationErrorKind {
    /// Stable machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationErrorKind::MissingField => "missing_field",
            ValidationErrorKind::InvalidStatus => "invalid_status",
            ValidationErrorKind::InvalidAmount => "invalid_amount",
            ValidationErrorKind::DuplicateContact => "duplicate_contact",
            ValidationErrorKind::PositionOutOfRange => "position_out_of_range",
            ValidationErrorKind::SelfMerge => "self_merge",
            ValidationErrorKind::OutsideBusinessHours => "outside_business_hours",
            ValidationErrorKind::SchedulingConflict => "scheduling_conflict",
            ValidationErrorKind::ClientNotFound => "client_not_found",
            ValidationErrorKind::OrderNotFound => "order_not_found",
            ValidationErrorKind::AppointmentNotFound => "appointment_not_found",
            ValidationErrorKind::FabricNotFound => "fabric_not_found",
            ValidationErrorKind::ReferralCycle => "referral_cycle",
        }
    }

    pub fn is_referential(&self) -> bool {
        matches!(
            self,
            ValidationErrorKind::ClientNotFound
                | ValidationErrorKind::OrderNotFound
                | ValidationErrorKind::AppointmentNotFound
                | ValidationErrorKind::FabricNotFound
                | ValidationErrorKind::ReferralCycle
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable_snake_case() {
        assert_eq!(
            ValidationError::scheduling_conflict("ap1").kind.code(),
            "scheduling_conflict"
        );
        assert_eq!(
            ValidationError::client_not_found("c9").kind.code(),
            "client_not_found"
        );
    }

    #[test]
    fn referential_kinds_are_distinguished() {
        assert!(ValidationError::client_not_found("c9").is_referential());
        assert!(ValidationError::referral_cycle("a", "b").is_referential());
        assert!(!ValidationError::missing_field("client_id").is_referential());
    }
}
