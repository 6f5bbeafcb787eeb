//! Network-type tag filters and one-way rules.
//!
//! Each [`NetworkType`] maps to a list of tag rules.  A rule excludes a way
//! when the way carries the rule's key and the value *contains* one of the
//! excluded alternatives.  Substring matching mirrors Overpass `!~` regex
//! filters, so the client-side check and the server-side query select the
//! same ways (e.g. `motor` also rejects `motorway` for walking).
//!
//! Ways without a `highway` tag are never admitted.

use std::fmt::Write as _;

use rg_core::NetworkType;

// ── Rules ─────────────────────────────────────────────────────────────────────

struct TagRule {
    key:      &'static str,
    excluded: &'static [&'static str],
}

const NOT_AREA: TagRule = TagRule { key: "area", excluded: &["yes"] };
const NOT_PRIVATE: TagRule = TagRule { key: "access", excluded: &["private"] };
const SERVICE_NOT_PRIVATE: TagRule = TagRule { key: "service", excluded: &["private"] };

const DRIVE: &[TagRule] = &[
    NOT_AREA,
    NOT_PRIVATE,
    TagRule {
        key: "highway",
        excluded: &[
            "abandoned", "bridleway", "bus_guideway", "construction", "corridor",
            "cycleway", "elevator", "escalator", "footway", "no", "path",
            "pedestrian", "planned", "platform", "proposed", "raceway", "razed",
            "service", "steps", "track",
        ],
    },
    TagRule { key: "motor_vehicle", excluded: &["no"] },
    TagRule { key: "motorcar", excluded: &["no"] },
    TagRule {
        key: "service",
        excluded: &[
            "alley", "driveway", "emergency_access", "parking", "parking_aisle", "private",
        ],
    },
];

const DRIVE_SERVICE: &[TagRule] = &[
    NOT_AREA,
    NOT_PRIVATE,
    TagRule {
        key: "highway",
        excluded: &[
            "abandoned", "bridleway", "bus_guideway", "construction", "corridor",
            "cycleway", "elevator", "escalator", "footway", "no", "path",
            "pedestrian", "planned", "platform", "proposed", "raceway", "razed",
            "steps", "track",
        ],
    },
    TagRule { key: "motor_vehicle", excluded: &["no"] },
    TagRule { key: "motorcar", excluded: &["no"] },
    TagRule {
        key: "service",
        excluded: &["emergency_access", "parking", "parking_aisle", "private"],
    },
];

const WALK: &[TagRule] = &[
    NOT_AREA,
    NOT_PRIVATE,
    TagRule {
        key: "highway",
        excluded: &[
            "abandoned", "bus_guideway", "construction", "cycleway", "motor", "no",
            "planned", "platform", "proposed", "raceway", "razed",
        ],
    },
    TagRule { key: "foot", excluded: &["no"] },
    SERVICE_NOT_PRIVATE,
];

const BIKE: &[TagRule] = &[
    NOT_AREA,
    NOT_PRIVATE,
    TagRule {
        key: "highway",
        excluded: &[
            "abandoned", "bus_guideway", "construction", "corridor", "elevator",
            "escalator", "footway", "motor", "no", "planned", "platform",
            "proposed", "raceway", "razed", "steps",
        ],
    },
    TagRule { key: "bicycle", excluded: &["no"] },
    SERVICE_NOT_PRIVATE,
];

const ALL: &[TagRule] = &[
    NOT_AREA,
    NOT_PRIVATE,
    TagRule {
        key: "highway",
        excluded: &[
            "abandoned", "construction", "no", "planned", "platform", "proposed",
            "raceway", "razed",
        ],
    },
    SERVICE_NOT_PRIVATE,
];

const ALL_PRIVATE: &[TagRule] = &[
    NOT_AREA,
    TagRule {
        key: "highway",
        excluded: &[
            "abandoned", "construction", "no", "planned", "platform", "proposed",
            "raceway", "razed",
        ],
    },
];

// ── NetworkFilter ─────────────────────────────────────────────────────────────

/// The way filter for one network type.
#[derive(Clone, Copy)]
pub struct NetworkFilter {
    rules: &'static [TagRule],
}

impl NetworkFilter {
    pub fn for_network(network_type: NetworkType) -> Self {
        let rules = match network_type {
            NetworkType::Drive        => DRIVE,
            NetworkType::DriveService => DRIVE_SERVICE,
            NetworkType::Walk         => WALK,
            NetworkType::Bike         => BIKE,
            NetworkType::All          => ALL,
            NetworkType::AllPrivate   => ALL_PRIVATE,
        };
        Self { rules }
    }

    /// Does a way with these tags belong to the network?
    ///
    /// `tag` looks up a tag value by key.
    pub fn admits<'a>(&self, tag: impl Fn(&str) -> Option<&'a str>) -> bool {
        if tag("highway").is_none() {
            return false;
        }
        self.rules.iter().all(|rule| match tag(rule.key) {
            Some(value) => !rule.excluded.iter().any(|x| value.contains(x)),
            None => true,
        })
    }

    /// The equivalent Overpass QL filter, e.g.
    /// `["highway"]["area"!~"yes"]…`.
    pub fn to_overpass(&self) -> String {
        let mut out = String::from("[\"highway\"]");
        for rule in self.rules {
            // Writing to a String cannot fail.
            let _ = write!(out, "[\"{}\"!~\"{}\"]", rule.key, rule.excluded.join("|"));
        }
        out
    }
}

// ── One-way handling ──────────────────────────────────────────────────────────

/// Which directed edges a way contributes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WayDirection {
    /// Edges in node order and in reverse.
    Both,
    /// Edges in node order only.
    Forward,
    /// Edges against node order only (`oneway=-1`).
    Reverse,
}

/// Determine the travel direction of a way for `network_type`.
///
/// Walking networks ignore one-way tags entirely.
pub fn way_direction<'a>(
    network_type: NetworkType,
    tag: impl Fn(&str) -> Option<&'a str>,
) -> WayDirection {
    if network_type == NetworkType::Walk {
        return WayDirection::Both;
    }
    match tag("oneway") {
        Some("yes" | "true" | "1" | "F") => WayDirection::Forward,
        Some("-1" | "reverse" | "T")     => WayDirection::Reverse,
        _ if tag("junction") == Some("roundabout") => WayDirection::Forward,
        _ => WayDirection::Both,
    }
}
