//! `sartor client` subcommand implementations.

use super::Workspace;
use anyhow::{Result, bail};
use sartor_engine::NewClient;

pub fn new(ws: &Workspace, request: NewClient) -> Result<()> {
    let name = format!("{} {}", request.first_name, request.last_name);
    ws.mutate(|engine, snapshot| engine.create_client(&request, snapshot))?;
    println!("Created client {name}");
    Ok(())
}

pub fn refer(ws: &Workspace, client_id: &str, to: Option<&str>, clear: bool) -> Result<()> {
    if to.is_none() && !clear {
        bail!("pass --to <CLIENT_ID> or --clear");
    }
    ws.mutate(|engine, snapshot| engine.set_referred_by(client_id, to, snapshot))?;
    match to {
        Some(referrer) => println!("{client_id} is now referred by {referrer}"),
        None => println!("Cleared referrer of {client_id}"),
    }
    Ok(())
}

pub fn merge(ws: &Workspace, keep_id: &str, merge_id: &str) -> Result<()> {
    ws.mutate(|engine, snapshot| engine.merge_clients(keep_id, merge_id, snapshot))?;
    println!("Merged {merge_id} into {keep_id}");
    Ok(())
}
