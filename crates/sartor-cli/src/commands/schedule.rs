//! `sartor schedule` command implementation.

use super::Workspace;
use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use sartor_core::model::AppointmentType;
use sartor_engine::AppointmentRequest;

pub fn run(
    ws: &Workspace,
    client_id: &str,
    kind: &str,
    at: &str,
    notes: Option<String>,
    edit: Option<String>,
) -> Result<()> {
    let Some(kind) = AppointmentType::parse(kind) else {
        bail!("'{kind}' is not an appointment type (Consultation, Fitting, Pickup)");
    };
    let start_time = NaiveDateTime::parse_from_str(at, "%Y-%m-%d %H:%M")
        .with_context(|| format!("'{at}' is not a time in YYYY-MM-DD HH:MM form"))?
        .and_utc();

    let editing = edit.is_some();
    ws.mutate(|engine, snapshot| {
        engine.schedule_appointment(
            &AppointmentRequest {
                client_id: client_id.to_string(),
                kind,
                start_time,
                notes,
                editing_id: edit,
            },
            snapshot,
        )
    })?;

    let verb = if editing { "Rescheduled" } else { "Scheduled" };
    println!(
        "{verb} {kind} for {client_id} at {} ({} min)",
        start_time.format("%Y-%m-%d %H:%M"),
        kind.duration_minutes()
    );
    Ok(())
}
