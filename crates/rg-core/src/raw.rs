//! Raw road-network graph as produced by an acquisition source.
//!
//! Node identifiers are whatever the source uses (OSM node ids, strings in
//! tests, …) and need not be contiguous.  Both collections are ordered: the
//! exporter assigns canonical ids in node order and emits edges in edge
//! order, so two runs over identical input produce identical files.
//!
//! A `RawGraph` is directed and may hold parallel edges and self-loops.
//! Nothing here checks that edge endpoints exist; that is the exporter's job.

/// A node with its source identifier and position.
#[derive(Clone, Debug, PartialEq)]
pub struct RawNode<K> {
    pub id:  K,
    pub lat: f64,
    pub lon: f64,
}

/// A directed edge between two source identifiers.
#[derive(Clone, Debug, PartialEq)]
pub struct RawEdge<K> {
    pub source: K,
    pub target: K,
    /// Geometric length in metres.
    pub length: f64,
}

/// Ordered node and edge lists keyed by source identifier `K`.
#[derive(Clone, Debug, PartialEq)]
pub struct RawGraph<K> {
    pub nodes: Vec<RawNode<K>>,
    pub edges: Vec<RawEdge<K>>,
}

impl<K> RawGraph<K> {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), edges: Vec::new() }
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
        }
    }

    pub fn add_node(&mut self, id: K, lat: f64, lon: f64) {
        self.nodes.push(RawNode { id, lat, lon });
    }

    /// Append a **directed** edge.  Order of calls is the order of export.
    pub fn add_edge(&mut self, source: K, target: K, length: f64) {
        self.edges.push(RawEdge { source, target, length });
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.edges.len() }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<K> Default for RawGraph<K> {
    fn default() -> Self {
        Self::new()
    }
}
