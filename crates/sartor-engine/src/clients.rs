//! Client creation and the referral write site.
//!
//! Referral cycles are rejected here, where the edge is written. The
//! traversal-time truncation in the referral graph is a pure safety net
//! against data that predates this check.

use crate::error::ValidationError;
use crate::request::NewClient;
use sartor_core::model::Client;
use sartor_core::snapshot::Snapshot;

/// Create a new client record.
///
/// Email and phone must not duplicate an existing client's; a referrer,
/// when named, must exist. A brand-new id cannot close a referral cycle,
/// so no cycle check is needed here.
pub fn create_client(request: &NewClient, snapshot: &Snapshot) -> Result<Snapshot, ValidationError> {
    if request.first_name.is_empty() {
        return Err(ValidationError::missing_field("first_name"));
    }
    if request.last_name.is_empty() {
        return Err(ValidationError::missing_field("last_name"));
    }
    if !request.email.is_empty() && snapshot.clients.iter().any(|c| c.email == request.email) {
        return Err(ValidationError::duplicate_contact("email", &request.email));
    }
    if !request.phone.is_empty() && snapshot.clients.iter().any(|c| c.phone == request.phone) {
        return Err(ValidationError::duplicate_contact("phone", &request.phone));
    }
    if let Some(referrer) = &request.referred_by_id {
        if snapshot.client(referrer).is_none() {
            return Err(ValidationError::client_not_found(referrer));
        }
    }

    let mut next = snapshot.clone();
    next.clients.push(Client {
        client_id: sartor_core::new_id(),
        first_name: request.first_name.clone(),
        last_name: request.last_name.clone(),
        email: request.email.clone(),
        phone: request.phone.clone(),
        address: Default::default(),
        referral_source: request.referral_source.clone(),
        referred_by_id: request.referred_by_id.clone(),
        vip_status: request.vip_status,
        no_show_count: 0,
        communication_pref: request.communication_pref.clone(),
        notes: request.notes.clone(),
    });
    Ok(next)
}

/// Point a client's referral edge at a new referrer, or clear it.
///
/// Rejected when the referrer does not resolve, or when walking the
/// referrer's own chain reaches the client (the edge would make the client
/// its own transitive referrer).
pub fn set_referred_by(
    client_id: &str,
    referrer: Option<&str>,
    snapshot: &Snapshot,
) -> Result<Snapshot, ValidationError> {
    snapshot
        .client(client_id)
        .ok_or_else(|| ValidationError::client_not_found(client_id))?;

    if let Some(referrer_id) = referrer {
        if snapshot.client(referrer_id).is_none() {
            return Err(ValidationError::client_not_found(referrer_id));
        }
        if snapshot.referral_chain_contains(referrer_id, client_id) {
            return Err(ValidationError::referral_cycle(client_id, referrer_id));
        }
    }

    let mut next = snapshot.clone();
    if let Some(client) = next.client_mut(client_id) {
        client.referred_by_id = referrer.map(String::from);
    }
    Ok(next)
}
