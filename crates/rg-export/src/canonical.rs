//! Canonical (contiguously numbered) graph and the raw → canonical transform.

use std::fmt::{self, Display};
use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use tracing::debug;

use rg_core::{NodeId, RawGraph};

use crate::{ExportError, ExportResult};

// ── Records ───────────────────────────────────────────────────────────────────

/// One entry of the `"nodes"` mapping.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanonicalNode {
    pub id:  NodeId,
    pub lat: f64,
    pub lon: f64,
}

/// One entry of the `"edges"` sequence.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanonicalEdge {
    pub source: NodeId,
    pub target: NodeId,
    /// Length in metres, copied from the raw edge.
    pub weight: f64,
}

// ── OutputGraph ───────────────────────────────────────────────────────────────

/// The document written to disk.
///
/// `nodes[i].id == NodeId(i)` always holds, so `nodes` doubles as the
/// id → node mapping.  On disk the nodes become a JSON object keyed by the
/// decimal id.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(try_from = "WireGraph")]
pub struct OutputGraph {
    pub nodes: Vec<CanonicalNode>,
    pub edges: Vec<CanonicalEdge>,
}

impl OutputGraph {
    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.edges.len() }
}

/// Serializes the node list as a map in id order.
struct NodeTable<'a>(&'a [CanonicalNode]);

impl Serialize for NodeTable<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|n| (n.id.0, n)))
    }
}

impl Serialize for OutputGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut doc = serializer.serialize_struct("OutputGraph", 2)?;
        doc.serialize_field("nodes", &NodeTable(&self.nodes))?;
        doc.serialize_field("edges", &self.edges)?;
        doc.end()
    }
}

/// On-disk shape, validated into an [`OutputGraph`] on read.
#[derive(Deserialize)]
struct WireGraph {
    #[serde(deserialize_with = "node_entries")]
    nodes: Vec<(String, CanonicalNode)>,
    edges: Vec<CanonicalEdge>,
}

/// Reads the `"nodes"` object in document order.  A repeated key is an
/// error rather than a silent overwrite.
fn node_entries<'de, D>(deserializer: D) -> Result<Vec<(String, CanonicalNode)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct Entries;

    impl<'de> Visitor<'de> for Entries {
        type Value = Vec<(String, CanonicalNode)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map from node id to node")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut seen: FxHashSet<String> = FxHashSet::default();
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, node)) = map.next_entry::<String, CanonicalNode>()? {
                if !seen.insert(key.clone()) {
                    return Err(de::Error::custom(format!("duplicate node key {key:?}")));
                }
                entries.push((key, node));
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(Entries)
}

impl TryFrom<WireGraph> for OutputGraph {
    type Error = ExportError;

    fn try_from(wire: WireGraph) -> ExportResult<Self> {
        let mut nodes = Vec::with_capacity(wire.nodes.len());
        for (key, node) in wire.nodes {
            // Keys must be the exact decimal form: "00" or "+0" do not name node 0.
            if key != node.id.0.to_string() {
                return Err(ExportError::MalformedGraph(format!(
                    "key {key:?} holds node {}",
                    node.id.0
                )));
            }
            nodes.push(node);
        }
        // Document order is arbitrary.
        nodes.sort_unstable_by_key(|n| n.id);
        if let Some((i, n)) = nodes.iter().enumerate().find(|(i, n)| n.id.index() != *i) {
            return Err(ExportError::MalformedGraph(format!(
                "node ids are not contiguous: expected {i}, found {}",
                n.id.0
            )));
        }
        let count = nodes.len();
        if let Some((i, _)) = wire
            .edges
            .iter()
            .enumerate()
            .find(|(_, e)| e.source.index() >= count || e.target.index() >= count)
        {
            return Err(ExportError::MalformedGraph(format!(
                "edge #{i} references a node outside 0..{count}"
            )));
        }
        Ok(OutputGraph { nodes, edges: wire.edges })
    }
}

// ── canonicalize ──────────────────────────────────────────────────────────────

/// Renumber `raw` to contiguous ids and resolve every edge.
///
/// Nodes are numbered in input order starting at 0.  Edges keep their
/// input order, parallel edges and self-loops included, and carry their
/// length through unchanged as the weight.
///
/// # Errors
///
/// - [`ExportError::DuplicateNode`] if a raw id occurs twice.
/// - [`ExportError::DanglingEdgeReference`] if an edge endpoint is not a node.
/// - [`ExportError::InvalidEdgeWeight`] for negative or non-finite lengths.
/// - [`ExportError::TooManyNodes`] past `u32::MAX` nodes.
pub fn canonicalize<K>(raw: &RawGraph<K>) -> ExportResult<OutputGraph>
where
    K: Eq + Hash + Display,
{
    let count = raw.nodes.len();
    NodeId::try_from(count).map_err(|_| ExportError::TooManyNodes(count))?;

    let mut lookup: FxHashMap<&K, NodeId> =
        FxHashMap::with_capacity_and_hasher(count, Default::default());
    let mut nodes = Vec::with_capacity(count);

    for (i, node) in raw.nodes.iter().enumerate() {
        let id = NodeId(i as u32);
        if lookup.insert(&node.id, id).is_some() {
            return Err(ExportError::DuplicateNode { node: node.id.to_string() });
        }
        nodes.push(CanonicalNode { id, lat: node.lat, lon: node.lon });
    }

    let resolve = |edge: usize, key: &K| {
        lookup
            .get(key)
            .copied()
            .ok_or_else(|| ExportError::DanglingEdgeReference { edge, node: key.to_string() })
    };

    let mut edges = Vec::with_capacity(raw.edges.len());
    for (i, edge) in raw.edges.iter().enumerate() {
        let source = resolve(i, &edge.source)?;
        let target = resolve(i, &edge.target)?;
        if !(edge.length.is_finite() && edge.length >= 0.0) {
            return Err(ExportError::InvalidEdgeWeight { edge: i, weight: edge.length });
        }
        edges.push(CanonicalEdge { source, target, weight: edge.length });
    }

    debug!(nodes = nodes.len(), edges = edges.len(), "canonicalized graph");
    Ok(OutputGraph { nodes, edges })
}
