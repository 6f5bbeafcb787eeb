//! Export configuration.
//!
//! Everything a run needs is carried in one [`ExportConfig`] value that the
//! application builds (from command-line flags and/or a JSON file) and passes
//! into the pipeline.  Nothing is read from process-wide state.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::{AcquisitionRequest, CoreError, CoreResult};

// ── NetworkType ───────────────────────────────────────────────────────────────

/// Routing-profile selector handed to the acquisition source.
///
/// The exporter never interprets this value; only sources decide which ways
/// belong to which network.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NetworkType {
    /// Public drivable streets, excluding service roads.
    #[default]
    Drive,
    /// Drivable streets including service roads.
    DriveService,
    /// Everything pedestrians can use, treated as bidirectional.
    Walk,
    /// Everything cyclists can use.
    Bike,
    /// All public ways.
    All,
    /// All ways, including private-access ones.
    AllPrivate,
}

impl NetworkType {
    pub const ALL: [NetworkType; 6] = [
        NetworkType::Drive,
        NetworkType::DriveService,
        NetworkType::Walk,
        NetworkType::Bike,
        NetworkType::All,
        NetworkType::AllPrivate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NetworkType::Drive        => "drive",
            NetworkType::DriveService => "drive_service",
            NetworkType::Walk         => "walk",
            NetworkType::Bike         => "bike",
            NetworkType::All          => "all",
            NetworkType::AllPrivate   => "all_private",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkType {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        NetworkType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownNetworkType(s.to_owned()))
    }
}

// ── ExportConfig ──────────────────────────────────────────────────────────────

/// Top-level configuration for one export run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExportConfig {
    /// Place names identifying the region(s) to fetch, e.g.
    /// `"Kolkata, West Bengal, India"`.  The union of all places is exported.
    pub places: Vec<String>,

    /// Destination of the JSON document.  Overwritten on success; left
    /// untouched on failure.
    pub output: PathBuf,

    /// Passed through to the source uninterpreted.
    pub network_type: NetworkType,

    /// Merge chains of interstitial nodes into single edges.  Default: true.
    pub simplify: bool,

    /// Keep every weakly connected component instead of only the largest.
    /// Default: false.
    pub retain_all: bool,

    /// Pretty-print the output document.  Default: false (compact).
    pub pretty: bool,
}

impl ExportConfig {
    /// Check the values that every source depends on.
    ///
    /// Whether `places` may be empty depends on the source (file sources
    /// ignore it), so only blank entries are rejected here.
    pub fn validate(&self) -> CoreResult<()> {
        if self.output.as_os_str().is_empty() {
            return Err(CoreError::Config("output path is empty".into()));
        }
        if self.output.file_name().is_none() {
            return Err(CoreError::Config(format!(
                "output path {} does not name a file",
                self.output.display()
            )));
        }
        if let Some(i) = self.places.iter().position(|p| p.trim().is_empty()) {
            return Err(CoreError::Config(format!("place #{} is blank", i + 1)));
        }
        Ok(())
    }

    /// The part of the configuration that the acquisition source sees.
    pub fn request(&self) -> AcquisitionRequest {
        AcquisitionRequest {
            places:       self.places.clone(),
            network_type: self.network_type,
            simplify:     self.simplify,
            retain_all:   self.retain_all,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            places:       Vec::new(),
            output:       PathBuf::from("graph.json"),
            network_type: NetworkType::Drive,
            simplify:     true,
            retain_all:   false,
            pretty:       false,
        }
    }
}
