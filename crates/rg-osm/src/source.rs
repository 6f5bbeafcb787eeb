//! Shared extract → `RawGraph` pipeline and the Overpass JSON file source.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use tracing::info;

use rg_core::{AcquisitionRequest, GraphSource, RawGraph};

use crate::extract::parse_overpass_json;
use crate::simplify::{retain_largest_component, simplify};
use crate::{OsmError, OsmExtract, OsmResult, WorkingGraph};

/// Turn an extract into the raw graph a request asks for.
///
/// Steps: filter ways by network type, build the directed multigraph,
/// simplify (if requested), keep the largest component (unless
/// `retain_all`).  An empty result is an error: there is nothing sensible
/// to export.
pub fn build_raw_graph(
    mut extract: OsmExtract,
    request:     &AcquisitionRequest,
) -> OsmResult<RawGraph<i64>> {
    extract.retain_network(request.network_type);

    let mut g = WorkingGraph::from_extract(&extract, request.network_type);
    drop(extract);

    if request.simplify {
        simplify(&mut g);
    }
    if !request.retain_all {
        retain_largest_component(&mut g);
    }

    if g.node_count() == 0 {
        return Err(OsmError::EmptyGraph { network_type: request.network_type });
    }
    info!(
        nodes = g.node_count(),
        edges = g.edge_count(),
        network_type = %request.network_type,
        "road graph ready"
    );
    Ok(g.into_raw())
}

// ── OverpassFileSource ────────────────────────────────────────────────────────

/// Reads a saved Overpass `[out:json]` response from disk.
///
/// Place names in the request are ignored; the file defines the area.
#[derive(Clone, Debug)]
pub struct OverpassFileSource {
    path: PathBuf,
}

impl OverpassFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl GraphSource for OverpassFileSource {
    type Error = OsmError;

    fn describe(&self) -> String {
        format!("Overpass JSON file {}", self.path.display())
    }

    fn fetch(&self, request: &AcquisitionRequest) -> OsmResult<RawGraph<i64>> {
        let reader = BufReader::new(File::open(&self.path)?);
        let extract = parse_overpass_json(reader)?;
        build_raw_graph(extract, request)
    }
}
