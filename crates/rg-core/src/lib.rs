//! `rg-core`: foundational types for the `roadgraph` exporter.
//!
//! This crate is a dependency of every other `rg-*` crate.  It intentionally
//! has no `rg-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`ids`]    | `NodeId`, `EdgeId`                                        |
//! | [`geo`]    | `GeoPoint`, haversine distance                            |
//! | [`raw`]    | `RawNode`, `RawEdge`, `RawGraph<K>`                       |
//! | [`config`] | `ExportConfig`, `NetworkType`                             |
//! | [`source`] | `GraphSource` trait, `AcquisitionRequest`                 |
//! | [`error`]  | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, points and config.  |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod raw;
pub mod source;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ExportConfig, NetworkType};
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{EdgeId, NodeId};
pub use raw::{RawEdge, RawGraph, RawNode};
pub use source::{AcquisitionRequest, GraphSource};
