//! Command-line arguments and their merge with an optional config file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;

use rg_core::{CoreError, ExportConfig, NetworkType};

#[cfg(feature = "fetch")]
use rg_osm::OverpassSettings;

#[derive(Debug, Parser)]
#[command(
    name = "roadgraph",
    version,
    about = "Download a road network and export it as a node/edge JSON graph"
)]
pub struct Args {
    /// Place to fetch, e.g. "Kolkata, West Bengal, India".  Repeat for
    /// several places; their union is exported.
    #[arg(long = "place", short = 'p', value_name = "NAME")]
    pub places: Vec<String>,

    /// Where to write the JSON graph [default: graph.json]
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// drive, drive_service, walk, bike, all or all_private [default: drive]
    #[arg(long, short = 'n', value_name = "TYPE", value_parser = parse_network_type)]
    pub network_type: Option<NetworkType>,

    /// Read a local OSM file instead of downloading: `.json` for a saved
    /// Overpass response, `.pbf` for a PBF extract
    #[arg(long, value_name = "PATH")]
    pub osm_file: Option<PathBuf>,

    /// JSON file holding export settings; flags given here override it
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Keep every OSM way vertex instead of merging chains into single edges
    #[arg(long)]
    pub no_simplify: bool,

    /// Keep all connected components, not only the largest
    #[arg(long)]
    pub retain_all: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Overpass API base URL
    #[arg(long, env = "ROADGRAPH_OVERPASS_URL", value_name = "URL")]
    pub overpass_url: Option<String>,

    /// Nominatim API base URL
    #[arg(long, env = "ROADGRAPH_NOMINATIM_URL", value_name = "URL")]
    pub nominatim_url: Option<String>,

    /// User-Agent sent to Nominatim and Overpass
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Overpass query timeout in seconds
    #[arg(long, default_value_t = 180)]
    pub timeout_secs: u64,
}

/// Where the road network comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceKind {
    Overpass,
    OverpassFile(PathBuf),
    Pbf(PathBuf),
}

fn parse_network_type(s: &str) -> Result<NetworkType, CoreError> {
    s.parse()
}

fn load_config(path: &Path) -> Result<ExportConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

impl Args {
    /// Build the run configuration: config file (if any), then flags.
    pub fn export_config(&self) -> Result<ExportConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ExportConfig::default(),
        };

        if !self.places.is_empty() {
            config.places = self.places.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(network_type) = self.network_type {
            config.network_type = network_type;
        }
        if self.no_simplify {
            config.simplify = false;
        }
        if self.retain_all {
            config.retain_all = true;
        }
        if self.pretty {
            config.pretty = true;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn source_kind(&self) -> Result<SourceKind> {
        let Some(path) = &self.osm_file else {
            return Ok(SourceKind::Overpass);
        };
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(SourceKind::OverpassFile(path.clone())),
            Some("pbf") => Ok(SourceKind::Pbf(path.clone())),
            _ => bail!(
                "cannot tell the format of {}: expected a .json or .pbf extension",
                path.display()
            ),
        }
    }

    #[cfg(feature = "fetch")]
    pub fn overpass_settings(&self) -> OverpassSettings {
        let mut settings = OverpassSettings::default();
        if let Some(url) = &self.overpass_url {
            settings.overpass_url = url.clone();
        }
        if let Some(url) = &self.nominatim_url {
            settings.nominatim_url = url.clone();
        }
        if let Some(ua) = &self.user_agent {
            settings.user_agent = ua.clone();
        }
        settings.timeout_secs = self.timeout_secs;
        settings
    }
}
