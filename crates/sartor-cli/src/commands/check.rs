//! `sartor check` command implementation.
//!
//! Runs the snapshot integrity sweep and reports every violated invariant.
//! Exits non-zero when any issue is found, so it can gate scripts.

use super::Workspace;
use anyhow::Result;

pub fn run(ws: &Workspace) -> Result<()> {
    let snapshot = ws.snapshot()?;
    let issues = snapshot.verify();

    if issues.is_empty() {
        println!("OK: snapshot holds every invariant");
        return Ok(());
    }
    for issue in &issues {
        println!("ERROR: {issue}");
    }
    println!("{} issue(s) found", issues.len());
    std::process::exit(1);
}
