//! Acquisition error type.

use thiserror::Error;

use rg_core::NetworkType;

/// Errors produced while acquiring a road network.  All of them are fatal to
/// an export run.
#[derive(Debug, Error)]
pub enum OsmError {
    #[error("no place names given")]
    NoPlaces,

    #[error("place {0:?} did not geocode to an area")]
    UnknownPlace(String),

    #[error("no {network_type} network found in the requested area")]
    EmptyGraph { network_type: NetworkType },

    #[error("Overpass error: {0}")]
    Overpass(String),

    #[error("malformed OSM JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "fetch")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[cfg(feature = "pbf")]
    #[error("OSM PBF error: {0}")]
    Pbf(#[from] osmpbf::Error),
}

pub type OsmResult<T> = Result<T, OsmError>;
