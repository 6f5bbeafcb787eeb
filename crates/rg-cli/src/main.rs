//! `roadgraph`: download a road network and write it as a node/edge JSON
//! graph for the map front-end.
//!
//! ```text
//! roadgraph --place "Kolkata, West Bengal, India" \
//!           --place "Howrah, West Bengal, India" \
//!           --output public/kolkata_graph.json
//! ```
//!
//! Logs go to stderr (`RUST_LOG` overrides the default `info` level); the
//! run summary goes to stdout.

mod args;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use rg_export::ExportSummary;
use rg_osm::OverpassFileSource;

use args::{Args, SourceKind};

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn export(args: &Args) -> Result<ExportSummary> {
    let config = args.export_config()?;
    debug!(?config, "resolved configuration");

    let summary = match args.source_kind()? {
        #[cfg(feature = "fetch")]
        SourceKind::Overpass => {
            anyhow::ensure!(
                !config.places.is_empty(),
                "nothing to download: pass --place, or --osm-file for a local extract"
            );
            println!("Downloading graph data for {}...", config.places.join(", "));
            let source = rg_osm::OverpassSource::new(args.overpass_settings());
            rg_export::run(&source, &config)?
        }
        #[cfg(not(feature = "fetch"))]
        SourceKind::Overpass => {
            anyhow::bail!("this build cannot download (feature `fetch` is off); pass --osm-file")
        }
        SourceKind::OverpassFile(path) => {
            rg_export::run(&OverpassFileSource::new(path), &config)?
        }
        #[cfg(feature = "pbf")]
        SourceKind::Pbf(path) => rg_export::run(&rg_osm::PbfSource::new(path), &config)?,
        #[cfg(not(feature = "pbf"))]
        SourceKind::Pbf(path) => {
            anyhow::bail!("cannot read {}: this build has no PBF support (feature `pbf`)", path.display())
        }
    };
    Ok(summary)
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let summary = export(&args)?;
    println!("Graph has {} nodes and {} edges.", summary.nodes, summary.edges);
    println!("Successfully saved graph to {}", summary.output.display());
    Ok(())
}
