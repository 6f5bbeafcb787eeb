//! Mutable directed multigraph used between extraction and export.
//!
//! # Data layout
//!
//! Nodes are indexed by `NodeId` (insertion order) and edges by `EdgeId`.
//! Each node keeps its outgoing and incoming `EdgeId` lists.  Removal is by
//! tombstone: `node_alive` / `edge_alive` flags are cleared and the adjacency
//! lists are filtered on read.  Simplification removes far fewer elements
//! than it keeps, so tombstones are cheaper than compacting after every
//! merge.
//!
//! [`WorkingGraph::into_raw`] compacts the survivors into a `RawGraph`:
//! nodes in insertion order, edges grouped by source node in node order and
//! in insertion order within one source.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use rg_core::{EdgeId, GeoPoint, NetworkType, NodeId, RawGraph};

use crate::filter::{WayDirection, way_direction};
use crate::OsmExtract;

#[derive(Clone, Debug)]
pub struct WorkingEdge {
    pub from:     NodeId,
    pub to:       NodeId,
    /// Length in metres.
    pub length_m: f64,
}

/// Directed multigraph over OSM nodes.
///
/// All per-node `Vec`s are indexed by `NodeId`, all per-edge `Vec`s by
/// `EdgeId`.
#[derive(Clone, Debug, Default)]
pub struct WorkingGraph {
    // ── Node data ─────────────────────────────────────────────────────────
    /// OSM id of each node.
    pub osm_id:     Vec<i64>,
    pub node_pos:   Vec<GeoPoint>,
    pub node_alive: Vec<bool>,

    // ── Edge data ─────────────────────────────────────────────────────────
    pub edges:      Vec<WorkingEdge>,
    pub edge_alive: Vec<bool>,

    // ── Adjacency (includes dead edges; filter with `edge_alive`) ─────────
    out_edges: Vec<Vec<EdgeId>>,
    in_edges:  Vec<Vec<EdgeId>>,
}

impl WorkingGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph for `network_type` from the ways in `extract`.
    ///
    /// Only nodes referenced by a way become graph nodes; they keep the
    /// relative order they had in the extract.  Every consecutive pair of way
    /// nodes yields one edge per travel direction, with the great-circle
    /// distance between them as its length.  Segments touching a node that
    /// is missing from the extract are skipped.
    pub fn from_extract(extract: &OsmExtract, network_type: NetworkType) -> Self {
        let referenced: FxHashSet<i64> = extract
            .ways
            .iter()
            .flat_map(|w| w.refs.iter().copied())
            .collect();

        let mut g = WorkingGraph::new();
        let mut by_osm: FxHashMap<i64, NodeId> =
            FxHashMap::with_capacity_and_hasher(referenced.len(), Default::default());

        for node in &extract.nodes {
            if referenced.contains(&node.id) && !by_osm.contains_key(&node.id) {
                let id = g.add_node(node.id, node.pos);
                by_osm.insert(node.id, id);
            }
        }

        let mut skipped = 0usize;
        for way in &extract.ways {
            let direction = way_direction(network_type, |k| way.tag(k));
            for pair in way.refs.windows(2) {
                let (Some(&a), Some(&b)) = (by_osm.get(&pair[0]), by_osm.get(&pair[1])) else {
                    skipped += 1;
                    continue;
                };
                let length_m = g.node_pos[a.index()].distance_m(g.node_pos[b.index()]);
                match direction {
                    WayDirection::Forward => {
                        g.add_edge(a, b, length_m);
                    }
                    WayDirection::Reverse => {
                        g.add_edge(b, a, length_m);
                    }
                    WayDirection::Both => {
                        g.add_edge(a, b, length_m);
                        g.add_edge(b, a, length_m);
                    }
                }
            }
        }

        if skipped > 0 {
            warn!(skipped, "way segments reference nodes missing from the extract");
        }
        debug!(nodes = g.node_count(), edges = g.edge_count(), "built working graph");
        g
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, osm_id: i64, pos: GeoPoint) -> NodeId {
        let id = NodeId(self.osm_id.len() as u32);
        self.osm_id.push(osm_id);
        self.node_pos.push(pos);
        self.node_alive.push(true);
        self.out_edges.push(Vec::new());
        self.in_edges.push(Vec::new());
        id
    }

    /// Add a **directed** edge and return its `EdgeId`.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, length_m: f64) -> EdgeId {
        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(WorkingEdge { from, to, length_m });
        self.edge_alive.push(true);
        self.out_edges[from.index()].push(id);
        self.in_edges[to.index()].push(id);
        id
    }

    pub fn remove_edge(&mut self, e: EdgeId) {
        self.edge_alive[e.index()] = false;
    }

    /// Remove a node together with every edge touching it.
    pub fn remove_node(&mut self, n: NodeId) {
        self.node_alive[n.index()] = false;
        let touching: Vec<EdgeId> = self.out_edges(n).chain(self.in_edges(n)).collect();
        for e in touching {
            self.remove_edge(e);
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Live node count.
    pub fn node_count(&self) -> usize {
        self.node_alive.iter().filter(|&&a| a).count()
    }

    /// Live edge count.
    pub fn edge_count(&self) -> usize {
        self.edge_alive.iter().filter(|&&a| a).count()
    }

    /// Iterator over live `NodeId`s in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.node_alive
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(i, _)| NodeId(i as u32))
    }

    /// Live outgoing edges of `n`, in insertion order.
    pub fn out_edges(&self, n: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.out_edges[n.index()]
            .iter()
            .copied()
            .filter(|e| self.edge_alive[e.index()])
    }

    /// Live incoming edges of `n`, in insertion order.
    pub fn in_edges(&self, n: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.in_edges[n.index()]
            .iter()
            .copied()
            .filter(|e| self.edge_alive[e.index()])
    }

    pub fn edge(&self, e: EdgeId) -> &WorkingEdge {
        &self.edges[e.index()]
    }

    /// Look up a live node by OSM id.  Linear scan; intended for tests and
    /// diagnostics.
    pub fn find_osm(&self, osm_id: i64) -> Option<NodeId> {
        self.nodes().find(|n| self.osm_id[n.index()] == osm_id)
    }

    // ── Export ────────────────────────────────────────────────────────────

    /// Compact the live graph into a [`RawGraph`] keyed by OSM id.
    pub fn into_raw(self) -> RawGraph<i64> {
        let mut raw = RawGraph::with_capacity(self.node_count(), self.edge_count());
        for n in self.nodes() {
            let pos = self.node_pos[n.index()];
            raw.add_node(self.osm_id[n.index()], pos.lat, pos.lon);
        }
        for n in self.nodes() {
            for e in self.out_edges(n) {
                let edge = self.edge(e);
                raw.add_edge(
                    self.osm_id[edge.from.index()],
                    self.osm_id[edge.to.index()],
                    edge.length_m,
                );
            }
        }
        raw
    }
}
