//! `sartor order` subcommand implementations.

use super::Workspace;
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use sartor_engine::NewOrder;
use serde_json::Value;
use std::collections::BTreeMap;

pub fn new(
    ws: &Workspace,
    client_id: &str,
    order_type: &str,
    fabric: Option<String>,
    total: f64,
    deposit: f64,
    due: Option<&str>,
    specs: &[String],
) -> Result<()> {
    let due_date = due
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .with_context(|| format!("'{s}' is not a date in YYYY-MM-DD form"))
        })
        .transpose()?;
    let specifications = parse_specs(specs)?;

    ws.mutate(|engine, snapshot| {
        engine.create_order(
            &NewOrder {
                client_id: client_id.to_string(),
                order_type: order_type.to_string(),
                fabric_id: fabric,
                total_price: total,
                deposit_paid: deposit,
                due_date,
                photos: Vec::new(),
                specifications,
            },
            snapshot,
        )
    })?;
    println!("Created {order_type} order for {client_id} (total ${total:.2})");
    Ok(())
}

pub fn mv(ws: &Workspace, order_id: &str, stage: &str) -> Result<()> {
    ws.mutate(|engine, snapshot| engine.move_order(order_id, stage, snapshot))?;
    println!("Moved {order_id} to {stage}");
    Ok(())
}

pub fn reorder(ws: &Workspace, order_id: &str, position: usize) -> Result<()> {
    ws.mutate(|engine, snapshot| engine.reorder_order(order_id, position, snapshot))?;
    println!("Moved {order_id} to position {position} within its stage");
    Ok(())
}

pub fn clone(ws: &Workspace, order_id: &str) -> Result<()> {
    ws.mutate(|engine, snapshot| engine.clone_order(order_id, snapshot))?;
    println!("Cloned {order_id} as a new order due today");
    Ok(())
}

pub fn price(ws: &Workspace, order_id: &str, total: f64, deposit: f64) -> Result<()> {
    ws.mutate(|engine, snapshot| engine.set_order_pricing(order_id, total, deposit, snapshot))?;
    println!(
        "Updated {order_id}: total ${total:.2}, deposit ${deposit:.2}, balance ${:.2}",
        total - deposit
    );
    Ok(())
}

/// Parse repeated `key=value` flags. Values that read as JSON keep their
/// type; everything else becomes a string.
fn parse_specs(specs: &[String]) -> Result<BTreeMap<String, Value>> {
    let mut out = BTreeMap::new();
    for spec in specs {
        let Some((key, value)) = spec.split_once('=') else {
            bail!("'{spec}' is not a KEY=VALUE specification entry");
        };
        let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.into()));
        out.insert(key.to_string(), value);
    }
    Ok(out)
}
