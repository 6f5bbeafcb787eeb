//! `rg-osm`: OpenStreetMap acquisition for the `roadgraph` exporter.
//!
//! Turns place names (or a local OSM file) into a [`RawGraph`] keyed by OSM
//! node id, the way a routing-graph downloader would: geocode, download the
//! ways of one network type, build a directed multigraph with great-circle
//! edge lengths, simplify its topology, and keep the largest component.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`extract`]  | `OsmExtract`, `OsmNode`, `OsmWay`, Overpass JSON parsing    |
//! | [`filter`]   | Per-network-type tag filters and one-way rules              |
//! | [`graph`]    | `WorkingGraph`: mutable multigraph built from an extract    |
//! | [`simplify`] | Chain merging and largest-component retention               |
//! | [`source`]   | `build_raw_graph`, `OverpassFileSource`                     |
//! | [`overpass`] | `OverpassSource` (feature = `"fetch"` only)                 |
//! | [`pbf`]      | `PbfSource` (feature = `"pbf"` only)                        |
//! | [`error`]    | `OsmError`, `OsmResult<T>`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `fetch` | Nominatim + Overpass download via `reqwest` (default).       |
//! | `pbf`   | Enables OSM PBF loading via the `osmpbf` crate.              |
//!
//! [`RawGraph`]: rg_core::RawGraph

pub mod error;
pub mod extract;
pub mod filter;
pub mod graph;
pub mod simplify;
pub mod source;

#[cfg(feature = "fetch")]
pub mod overpass;

#[cfg(feature = "pbf")]
pub mod pbf;


pub use error::{OsmError, OsmResult};
pub use extract::{OsmExtract, OsmNode, OsmWay};
pub use filter::{NetworkFilter, WayDirection};
pub use graph::WorkingGraph;
pub use source::{OverpassFileSource, build_raw_graph};

#[cfg(feature = "fetch")]
pub use overpass::{OverpassSettings, OverpassSource};

#[cfg(feature = "pbf")]
pub use pbf::PbfSource;
