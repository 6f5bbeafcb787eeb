//! acquire → canonicalize → serialize.

use std::path::PathBuf;

use tracing::info;

use rg_core::{ExportConfig, GraphSource};

use crate::{ExportError, ExportResult, canonicalize, write_graph};

/// What a successful run produced.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportSummary {
    pub nodes:  usize,
    pub edges:  usize,
    pub output: PathBuf,
}

/// Run one export.
///
/// Nothing is written unless acquisition and canonicalization both succeed.
pub fn run<S: GraphSource>(source: &S, config: &ExportConfig) -> ExportResult<ExportSummary> {
    config.validate()?;

    info!(
        source = %source.describe(),
        places = ?config.places,
        network_type = %config.network_type,
        "acquiring road network"
    );
    let raw = source.fetch(&config.request()).map_err(|e| ExportError::Acquisition {
        from:   source.describe(),
        source: Box::new(e),
    })?;

    let graph = canonicalize(&raw)?;
    drop(raw);

    write_graph(&graph, &config.output, config.pretty)?;

    Ok(ExportSummary {
        nodes:  graph.node_count(),
        edges:  graph.edge_count(),
        output: config.output.clone(),
    })
}
