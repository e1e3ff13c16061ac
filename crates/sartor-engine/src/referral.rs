//! Referral network: a cycle-safe forest over the client referral relation
//! with per-node and aggregate revenue.
//!
//! `referred_by_id` edges point child -> parent; clients without a referrer
//! are roots. The engine rejects cycle creation at the write site, so the
//! truncation here is a safety net for malformed data: a branch that would
//! revisit one of its own ancestors is cut and logged, never traversed.

use sartor_core::snapshot::Snapshot;
use std::collections::{HashMap, HashSet};

/// One row of the referral tree, in depth-first pre-order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferralNode {
    pub client_id: String,
    pub name: String,
    pub vip_status: bool,
    /// 0 for roots.
    pub depth: usize,
    /// Sum of `total_price` over this client's own orders.
    pub direct_revenue: f64,
    /// Direct revenue plus the subtree revenue of every referral descendant.
    pub subtree_revenue: f64,
}

/// Precomputed adjacency and revenue over one snapshot.
///
/// Construction is O(clients + orders); [`ReferralGraph::iter`] then yields
/// a lazy, restartable traversal without materializing the whole tree.
pub struct ReferralGraph<'a> {
    snapshot: &'a Snapshot,
    direct: HashMap<&'a str, f64>,
    /// Child indices into `snapshot.clients`, in insertion order.
    children: HashMap<&'a str, Vec<usize>>,
    roots: Vec<usize>,
}

impl<'a> ReferralGraph<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        let mut direct: HashMap<&str, f64> = HashMap::new();
        for order in &snapshot.orders {
            *direct.entry(order.client_id.as_str()).or_insert(0.0) += order.total_price;
        }

        let mut children: HashMap<&str, Vec<usize>> = HashMap::new();
        let mut roots = Vec::new();
        for (i, client) in snapshot.clients.iter().enumerate() {
            match &client.referred_by_id {
                Some(parent) => children.entry(parent.as_str()).or_default().push(i),
                None => roots.push(i),
            }
        }

        Self {
            snapshot,
            direct,
            children,
            roots,
        }
    }

    pub fn direct_revenue(&self, client_id: &str) -> f64 {
        self.direct.get(client_id).copied().unwrap_or(0.0)
    }

    /// Start a traversal. Each call returns a fresh iterator, so a consumer
    /// can stop early and restart without recomputing the graph.
    pub fn iter(&self) -> ReferralTreeIter<'_, 'a> {
        let stack: Vec<Frame> = self
            .roots
            .iter()
            .rev()
            .map(|&idx| Frame {
                idx,
                depth: 0,
                ancestors: Vec::new(),
            })
            .collect();
        ReferralTreeIter {
            graph: self,
            stack,
            memo: HashMap::new(),
        }
    }
}

struct Frame {
    idx: usize,
    depth: usize,
    /// Ids already visited on this branch, root first.
    ancestors: Vec<String>,
}

/// Lazy depth-first pre-order traversal; siblings appear in Client
/// collection insertion order.
pub struct ReferralTreeIter<'g, 'a> {
    graph: &'g ReferralGraph<'a>,
    stack: Vec<Frame>,
    /// Subtree revenue memoized by client id for the life of this iterator.
    memo: HashMap<String, f64>,
}

impl ReferralTreeIter<'_, '_> {
    /// Bottom-up subtree revenue via an explicit two-phase stack, memoized
    /// so shared work is never redone within one traversal.
    fn subtree_revenue(&mut self, id: &str) -> f64 {
        if let Some(&v) = self.memo.get(id) {
            return v;
        }

        enum Phase {
            Enter,
            Exit,
        }
        let mut work = vec![(id.to_string(), Phase::Enter)];
        let mut on_path: HashSet<String> = HashSet::new();

        while let Some((node, phase)) = work.pop() {
            match phase {
                Phase::Enter => {
                    if self.memo.contains_key(&node) || !on_path.insert(node.clone()) {
                        continue;
                    }
                    work.push((node.clone(), Phase::Exit));
                    if let Some(kids) = self.graph.children.get(node.as_str()) {
                        for &k in kids {
                            let child = &self.graph.snapshot.clients[k].client_id;
                            if !on_path.contains(child) && !self.memo.contains_key(child) {
                                work.push((child.clone(), Phase::Enter));
                            }
                        }
                    }
                }
                Phase::Exit => {
                    on_path.remove(&node);
                    let mut total = self.graph.direct_revenue(&node);
                    if let Some(kids) = self.graph.children.get(node.as_str()) {
                        for &k in kids {
                            let child = &self.graph.snapshot.clients[k].client_id;
                            // A child still on the path is a truncated
                            // cyclic branch and contributes nothing.
                            total += self.memo.get(child).copied().unwrap_or(0.0);
                        }
                    }
                    self.memo.insert(node, total);
                }
            }
        }

        self.memo.get(id).copied().unwrap_or(0.0)
    }
}

impl Iterator for ReferralTreeIter<'_, '_> {
    type Item = ReferralNode;

    fn next(&mut self) -> Option<ReferralNode> {
        let frame = self.stack.pop()?;
        let client = &self.graph.snapshot.clients[frame.idx];
        let id = client.client_id.clone();

        if let Some(kids) = self.graph.children.get(id.as_str()) {
            let mut path = frame.ancestors.clone();
            path.push(id.clone());
            for &k in kids.iter().rev() {
                let child = &self.graph.snapshot.clients[k];
                if path.iter().any(|a| *a == child.client_id) {
                    tracing::warn!(
                        client_id = %child.client_id,
                        "referral cycle detected during traversal; branch truncated"
                    );
                    continue;
                }
                self.stack.push(Frame {
                    idx: k,
                    depth: frame.depth + 1,
                    ancestors: path.clone(),
                });
            }
        }

        let node = ReferralNode {
            name: client.full_name(),
            vip_status: client.vip_status,
            depth: frame.depth,
            direct_revenue: self.graph.direct_revenue(&id),
            subtree_revenue: self.subtree_revenue(&id),
            client_id: id,
        };
        Some(node)
    }
}
