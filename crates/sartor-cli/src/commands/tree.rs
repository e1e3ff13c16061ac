//! `sartor tree` command implementation.

use super::Workspace;
use anyhow::Result;

pub fn run(ws: &Workspace) -> Result<()> {
    let snapshot = ws.snapshot()?;
    let graph = ws.engine().referral_graph(&snapshot);

    let mut count = 0usize;
    for node in graph.iter() {
        let indent = "  ".repeat(node.depth);
        let vip = if node.vip_status { " [VIP]" } else { "" };
        println!(
            "{indent}{}{vip}  direct ${:.2}  subtree ${:.2}",
            node.name, node.direct_revenue, node.subtree_revenue
        );
        count += 1;
    }
    if count == 0 {
        println!("No clients on record.");
    }
    Ok(())
}
