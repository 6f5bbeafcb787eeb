//! OSM PBF loader: enabled with the `pbf` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use rg_core::GraphSource;
//! use rg_osm::PbfSource;
//!
//! let raw = PbfSource::new("west-bengal-latest.osm.pbf").fetch(&config.request())?;
//! ```
//!
//! # What is loaded
//!
//! Ways admitted by the request's network type, and the nodes they
//! reference.  Place names are ignored: the extract defines the area, so cut
//! it to the region of interest beforehand (e.g. with `osmium extract`).
//!
//! # Memory note
//!
//! The loader buffers every OSM node of the file in the first pass because
//! ways reference node ids that are only known after the whole file has been
//! read.  Unreferenced nodes are dropped when the working graph is built.

use std::path::{Path, PathBuf};

use osmpbf::{Element, ElementReader};
use tracing::info;

use rg_core::{AcquisitionRequest, GeoPoint, GraphSource, NetworkType, RawGraph};

use crate::filter::NetworkFilter;
use crate::source::build_raw_graph;
use crate::{OsmError, OsmExtract, OsmNode, OsmResult, OsmWay};

/// Read an extract of the ways belonging to `network_type` from a PBF file.
pub fn read_pbf(path: &Path, network_type: NetworkType) -> OsmResult<OsmExtract> {
    let reader = ElementReader::from_path(path)?;
    let filter = NetworkFilter::for_network(network_type);
    let mut extract = OsmExtract::default();

    reader.for_each(|elem| match elem {
        Element::Node(n) => {
            extract.nodes.push(OsmNode { id: n.id(), pos: GeoPoint::new(n.lat(), n.lon()) });
        }
        Element::DenseNode(n) => {
            extract.nodes.push(OsmNode { id: n.id(), pos: GeoPoint::new(n.lat(), n.lon()) });
        }
        Element::Way(w) => {
            // Collect tags eagerly so &str lifetimes don't escape the closure.
            let tags: Vec<(&str, &str)> = w.tags().collect();
            let lookup = |k: &str| tags.iter().find(|(tk, _)| *tk == k).map(|(_, v)| *v);
            if filter.admits(lookup) {
                extract.ways.push(OsmWay {
                    id:   w.id(),
                    refs: w.refs().collect(),
                    tags: tags.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
                });
            }
        }
        _ => {}
    })?;

    info!(nodes = extract.nodes.len(), ways = extract.ways.len(), path = %path.display(), "read PBF");
    Ok(extract)
}

/// Reads a road network from a local `.osm.pbf` extract.
#[derive(Clone, Debug)]
pub struct PbfSource {
    path: PathBuf,
}

impl PbfSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl GraphSource for PbfSource {
    type Error = OsmError;

    fn describe(&self) -> String {
        format!("OSM PBF file {}", self.path.display())
    }

    fn fetch(&self, request: &AcquisitionRequest) -> OsmResult<RawGraph<i64>> {
        let extract = read_pbf(&self.path, request.network_type)?;
        build_raw_graph(extract, request)
    }
}
