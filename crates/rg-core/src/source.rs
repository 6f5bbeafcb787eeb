//! The `GraphSource` trait implemented by every acquisition backend.

use crate::{NetworkType, RawGraph};

/// What a source is asked to produce.
#[derive(Clone, Debug, PartialEq)]
pub struct AcquisitionRequest {
    pub places:       Vec<String>,
    pub network_type: NetworkType,
    pub simplify:     bool,
    pub retain_all:   bool,
}

/// A backend that produces a [`RawGraph`] keyed by OSM node id.
///
/// Implementations may block (network, disk).  They should fail fast rather
/// than retry; retry policy belongs to the caller.
pub trait GraphSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Short human-readable description used in log lines.
    fn describe(&self) -> String;

    fn fetch(&self, request: &AcquisitionRequest) -> Result<RawGraph<i64>, Self::Error>;
}
