//! Nominatim + Overpass downloader: enabled with the `fetch` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use rg_core::{ExportConfig, GraphSource};
//! use rg_osm::{OverpassSettings, OverpassSource};
//!
//! let source = OverpassSource::new(OverpassSettings::default());
//! let raw = source.fetch(&config.request())?;
//! ```
//!
//! # What is downloaded
//!
//! Each place name is geocoded with Nominatim to an OSM relation or way,
//! which Overpass can use as an area.  One Overpass query then selects every
//! way inside the union of those areas that passes the network type's filter,
//! plus the nodes those ways reference.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info};

use rg_core::{AcquisitionRequest, GraphSource, NetworkType, RawGraph};

use crate::extract::parse_overpass_json;
use crate::filter::NetworkFilter;
use crate::source::build_raw_graph;
use crate::{OsmError, OsmResult};

/// Overpass area ids are the OSM id offset by element type.
const RELATION_AREA_OFFSET: i64 = 3_600_000_000;
const WAY_AREA_OFFSET:      i64 = 2_400_000_000;

// ── Settings ──────────────────────────────────────────────────────────────────

/// Endpoints and limits for the two web services.
#[derive(Clone, Debug)]
pub struct OverpassSettings {
    /// Base URL of the Overpass API, without the `/interpreter` suffix.
    pub overpass_url:  String,
    /// Base URL of the Nominatim API, without the `/search` suffix.
    pub nominatim_url: String,
    /// Sent as `User-Agent`; Nominatim's usage policy requires one that
    /// identifies the application.
    pub user_agent:    String,
    /// Overpass server-side timeout.  The HTTP client waits a little longer
    /// so the server can report its own timeout first.
    pub timeout_secs:  u64,
}

impl Default for OverpassSettings {
    fn default() -> Self {
        Self {
            overpass_url:  "https://overpass-api.de/api".into(),
            nominatim_url: "https://nominatim.openstreetmap.org".into(),
            user_agent:    concat!("roadgraph/", env!("CARGO_PKG_VERSION")).into(),
            timeout_secs:  180,
        }
    }
}

// ── Nominatim ─────────────────────────────────────────────────────────────────

/// The fields of a Nominatim search result that geocoding needs.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NominatimPlace {
    pub osm_type:     String,
    pub osm_id:       i64,
    #[serde(default)]
    pub display_name: String,
}

impl NominatimPlace {
    /// The Overpass area id for this result, if it can bound an area.
    pub fn area_id(&self) -> Option<i64> {
        match self.osm_type.as_str() {
            "relation" => Some(RELATION_AREA_OFFSET + self.osm_id),
            "way"      => Some(WAY_AREA_OFFSET + self.osm_id),
            _          => None,
        }
    }
}

/// Pick the first result that can bound an area.  Point results (`node`)
/// are skipped.
pub fn select_area(place: &str, results: &[NominatimPlace]) -> OsmResult<i64> {
    results
        .iter()
        .find_map(|r| {
            let id = r.area_id()?;
            debug!(place, matched = %r.display_name, area_id = id, "geocoded");
            Some(id)
        })
        .ok_or_else(|| OsmError::UnknownPlace(place.to_owned()))
}

// ── Overpass ──────────────────────────────────────────────────────────────────

/// Build the Overpass QL query for the union of `area_ids`.
pub fn build_query(area_ids: &[i64], network_type: NetworkType, timeout_secs: u64) -> String {
    let areas: String = area_ids.iter().map(|id| format!("area(id:{id});")).collect();
    let filter = NetworkFilter::for_network(network_type).to_overpass();
    format!(
        "[out:json][timeout:{timeout_secs}];({areas})->.searchArea;\
         (way{filter}(area.searchArea););(._;>;);out;"
    )
}

// ── OverpassSource ────────────────────────────────────────────────────────────

/// Downloads road networks over HTTP.  Blocking; one geocoding request per
/// place plus one Overpass request per fetch.  No retries.
pub struct OverpassSource {
    settings: OverpassSettings,
}

impl OverpassSource {
    pub fn new(settings: OverpassSettings) -> Self {
        Self { settings }
    }

    fn client(&self) -> OsmResult<Client> {
        let client = Client::builder()
            .user_agent(self.settings.user_agent.clone())
            .timeout(Duration::from_secs(self.settings.timeout_secs + 10))
            .build()?;
        Ok(client)
    }

    fn geocode(&self, client: &Client, place: &str) -> OsmResult<i64> {
        let url = format!("{}/search", self.settings.nominatim_url.trim_end_matches('/'));
        let results: Vec<NominatimPlace> = client
            .get(&url)
            .query(&[("q", place), ("format", "json"), ("limit", "50")])
            .send()?
            .error_for_status()?
            .json()?;
        select_area(place, &results)
    }
}

impl GraphSource for OverpassSource {
    type Error = OsmError;

    fn describe(&self) -> String {
        format!("Overpass API at {}", self.settings.overpass_url)
    }

    fn fetch(&self, request: &AcquisitionRequest) -> OsmResult<RawGraph<i64>> {
        if request.places.is_empty() {
            return Err(OsmError::NoPlaces);
        }
        let client = self.client()?;

        let area_ids = request
            .places
            .iter()
            .map(|place| self.geocode(&client, place))
            .collect::<OsmResult<Vec<_>>>()?;

        let query = build_query(&area_ids, request.network_type, self.settings.timeout_secs);
        let url = format!("{}/interpreter", self.settings.overpass_url.trim_end_matches('/'));
        info!(places = request.places.len(), network_type = %request.network_type, "querying Overpass");
        debug!(%query);

        let response = client
            .post(&url)
            .form(&[("data", query.as_str())])
            .send()?
            .error_for_status()?;
        let extract = parse_overpass_json(response)?;
        build_raw_graph(extract, request)
    }
}
