//! In-memory OSM extract and Overpass JSON parsing.
//!
//! An [`OsmExtract`] is the common intermediate produced by every source:
//! nodes in the order the provider delivered them and the ways that
//! reference them.  Graph construction only depends on this type, so the
//! HTTP, JSON file and PBF sources all share one code path from here on.

use std::collections::BTreeMap;
use std::io::Read;

use serde::Deserialize;
use tracing::debug;

use rg_core::{GeoPoint, NetworkType};

use crate::filter::NetworkFilter;
use crate::{OsmError, OsmResult};

// ── Extract types ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct OsmNode {
    pub id:  i64,
    pub pos: GeoPoint,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OsmWay {
    pub id:   i64,
    /// Node ids in way order.
    pub refs: Vec<i64>,
    pub tags: BTreeMap<String, String>,
}

impl OsmWay {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OsmExtract {
    pub nodes: Vec<OsmNode>,
    pub ways:  Vec<OsmWay>,
}

impl OsmExtract {
    /// Drop every way the network type does not admit.
    ///
    /// Overpass already filters server-side; running this again is harmless
    /// and makes file-based extracts behave the same as downloads.
    pub fn retain_network(&mut self, network_type: NetworkType) {
        let filter = NetworkFilter::for_network(network_type);
        let before = self.ways.len();
        self.ways.retain(|w| filter.admits(|k| w.tag(k)));
        debug!(
            kept = self.ways.len(),
            dropped = before - self.ways.len(),
            %network_type,
            "filtered ways"
        );
    }
}

// ── Overpass JSON ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<Element>,
    /// Set by Overpass when the query hit a runtime error (e.g. timeout).
    #[serde(default)]
    remark:   Option<String>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Element {
    Node {
        id:  i64,
        lat: f64,
        lon: f64,
    },
    Way {
        id:    i64,
        #[serde(default)]
        nodes: Vec<i64>,
        #[serde(default)]
        tags:  BTreeMap<String, String>,
    },
    #[serde(other)]
    Other,
}

/// Parse an Overpass `[out:json]` response.
///
/// Relations and any other element types are ignored.  A `remark` that
/// reports an error is treated as a failed query because Overpass returns
/// partial data in that case.
pub fn parse_overpass_json<R: Read>(reader: R) -> OsmResult<OsmExtract> {
    let response: OverpassResponse = serde_json::from_reader(reader)?;

    if let Some(remark) = response.remark {
        if remark.to_ascii_lowercase().contains("error") {
            return Err(OsmError::Overpass(remark));
        }
    }

    let mut extract = OsmExtract::default();
    for element in response.elements {
        match element {
            Element::Node { id, lat, lon } => {
                extract.nodes.push(OsmNode { id, pos: GeoPoint::new(lat, lon) });
            }
            Element::Way { id, nodes, tags } => {
                extract.ways.push(OsmWay { id, refs: nodes, tags });
            }
            Element::Other => {}
        }
    }
    debug!(nodes = extract.nodes.len(), ways = extract.ways.len(), "parsed Overpass response");
    Ok(extract)
}
