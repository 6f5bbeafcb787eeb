//! Topology simplification and component filtering.
//!
//! A raw OSM graph has one node per way vertex, most of which only shape the
//! road's geometry.  [`simplify`] removes those interstitial nodes by merging
//! each chain `endpoint → … → endpoint` into one edge whose length is the sum
//! of the chain.  [`retain_largest_component`] then drops everything outside
//! the largest weakly connected component.

use rustc_hash::FxHashSet;
use tracing::debug;

use rg_core::{EdgeId, NodeId};

use crate::WorkingGraph;

// ── Endpoint detection ────────────────────────────────────────────────────────

/// Is `n` a node that must survive simplification?
///
/// A node is an endpoint if any of these hold:
/// - it has a self-loop;
/// - it has no incoming or no outgoing edges (dead end, source, sink);
/// - it does not have exactly two distinct neighbours with total degree 2
///   (one-way pass-through) or 4 (two-way pass-through).
pub fn is_endpoint(g: &WorkingGraph, n: NodeId) -> bool {
    let mut neighbors: FxHashSet<NodeId> = FxHashSet::default();
    let mut out_degree = 0usize;
    let mut in_degree = 0usize;

    for e in g.out_edges(n) {
        neighbors.insert(g.edge(e).to);
        out_degree += 1;
    }
    for e in g.in_edges(n) {
        neighbors.insert(g.edge(e).from);
        in_degree += 1;
    }

    if neighbors.contains(&n) {
        return true;
    }
    if out_degree == 0 || in_degree == 0 {
        return true;
    }
    let degree = out_degree + in_degree;
    !(neighbors.len() == 2 && (degree == 2 || degree == 4))
}

// ── Simplification ────────────────────────────────────────────────────────────

struct Chain {
    from:     NodeId,
    to:       NodeId,
    length_m: f64,
    edges:    Vec<EdgeId>,
    interior: Vec<NodeId>,
}

/// Merge every chain of interstitial nodes into a single edge.
///
/// Returns the number of nodes removed.  Closed rings made only of
/// interstitial nodes have no endpoint to start from and are left as they
/// are.
pub fn simplify(g: &mut WorkingGraph) -> usize {
    let endpoint: Vec<bool> = (0..g.node_alive.len())
        .map(|i| {
            let n = NodeId(i as u32);
            g.node_alive[i] && is_endpoint(g, n)
        })
        .collect();

    let mut consumed: FxHashSet<EdgeId> = FxHashSet::default();
    let mut chains: Vec<Chain> = Vec::new();

    for u in g.nodes().filter(|n| endpoint[n.index()]).collect::<Vec<_>>() {
        for first in g.out_edges(u).collect::<Vec<_>>() {
            if consumed.contains(&first) || endpoint[g.edge(first).to.index()] {
                continue;
            }
            if let Some(chain) = walk_chain(g, &endpoint, &consumed, u, first) {
                consumed.extend(chain.edges.iter().copied());
                chains.push(chain);
            }
        }
    }

    let mut interior: FxHashSet<NodeId> = FxHashSet::default();
    for chain in &chains {
        for &e in &chain.edges {
            g.remove_edge(e);
        }
        g.add_edge(chain.from, chain.to, chain.length_m);
        interior.extend(chain.interior.iter().copied());
    }

    // An interior node normally loses every edge to its chains.  One that
    // still has live edges (odd topology) stays, so no edge is orphaned.
    let mut removed = 0usize;
    let mut interior: Vec<NodeId> = interior.into_iter().collect();
    interior.sort_unstable();
    for n in interior {
        if g.out_edges(n).next().is_none() && g.in_edges(n).next().is_none() {
            g.remove_node(n);
            removed += 1;
        }
    }

    debug!(chains = chains.len(), removed, "simplified topology");
    removed
}

/// Follow a chain from endpoint `start` along edge `first` until the next
/// endpoint.  Returns `None` if the chain dead-ends or loops back on itself
/// without reaching an endpoint.
fn walk_chain(
    g:        &WorkingGraph,
    endpoint: &[bool],
    consumed: &FxHashSet<EdgeId>,
    start:    NodeId,
    first:    EdgeId,
) -> Option<Chain> {
    let mut edges = vec![first];
    let mut length_m = g.edge(first).length_m;
    let mut prev = start;
    let mut cur = g.edge(first).to;
    let mut interior = vec![cur];
    let mut visited: FxHashSet<NodeId> = FxHashSet::default();
    visited.insert(cur);

    loop {
        let usable = |e: &EdgeId| !consumed.contains(e) && !edges.contains(e);
        // Prefer continuing forward over doubling back on a two-way road.
        let next = g
            .out_edges(cur)
            .filter(usable)
            .find(|&e| g.edge(e).to != prev)
            .or_else(|| g.out_edges(cur).find(usable))?;

        edges.push(next);
        length_m += g.edge(next).length_m;
        let w = g.edge(next).to;

        if endpoint[w.index()] {
            return Some(Chain { from: start, to: w, length_m, edges, interior });
        }
        if !visited.insert(w) {
            return None;
        }
        prev = cur;
        cur = w;
        interior.push(w);
    }
}

// ── Components ────────────────────────────────────────────────────────────────

fn find(parent: &mut [usize], mut x: usize) -> usize {
    while parent[x] != x {
        parent[x] = parent[parent[x]];
        x = parent[x];
    }
    x
}

/// Keep only the largest weakly connected component.
///
/// Ties go to the component containing the earliest node.  Returns the
/// number of nodes removed.
pub fn retain_largest_component(g: &mut WorkingGraph) -> usize {
    let n = g.node_alive.len();
    let mut parent: Vec<usize> = (0..n).collect();

    for (i, edge) in g.edges.iter().enumerate() {
        if !g.edge_alive[i] {
            continue;
        }
        let a = find(&mut parent, edge.from.index());
        let b = find(&mut parent, edge.to.index());
        if a != b {
            parent[a.max(b)] = a.min(b);
        }
    }

    let mut size = vec![0usize; n];
    let mut best: Option<usize> = None;
    let live: Vec<NodeId> = g.nodes().collect();
    for &node in &live {
        let root = find(&mut parent, node.index());
        size[root] += 1;
    }
    for &node in &live {
        let root = find(&mut parent, node.index());
        if best.is_none_or(|b| size[root] > size[b]) {
            best = Some(root);
        }
    }

    let Some(best) = best else { return 0 };
    let mut removed = 0usize;
    for node in live {
        if find(&mut parent, node.index()) != best {
            g.remove_node(node);
            removed += 1;
        }
    }
    debug!(kept = size[best], removed, "retained largest weakly connected component");
    removed
}
