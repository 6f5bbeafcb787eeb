//! `rg-export`: turn a raw road graph into the front-end's JSON file.
//!
//! The pipeline is linear: a [`GraphSource`] produces a
//! [`RawGraph`], [`canonicalize`] renumbers its nodes `0..N` and
//! checks that every edge resolves, and [`write_graph`] replaces the output
//! file in one step.  [`run`] chains the three.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`canonical`] | `CanonicalNode`, `CanonicalEdge`, `OutputGraph`, `canonicalize` |
//! | [`writer`]    | `write_graph`, `read_graph`                                |
//! | [`pipeline`]  | `run`, `ExportSummary`                                     |
//! | [`error`]     | `ExportError`, `ExportResult<T>`                           |
//!
//! # Output format
//!
//! ```text
//! {"nodes": {"0": {"id": 0, "lat": 22.57, "lon": 88.36}, …},
//!  "edges": [{"source": 0, "target": 1, "weight": 150.5}, …]}
//! ```
//!
//! Node keys appear in ascending numeric order; edges appear in source
//! order.
//!
//! [`GraphSource`]: rg_core::GraphSource
//! [`RawGraph`]: rg_core::RawGraph

pub mod canonical;
pub mod error;
pub mod pipeline;
pub mod writer;


pub use canonical::{CanonicalEdge, CanonicalNode, OutputGraph, canonicalize};
pub use error::{ExportError, ExportResult};
pub use pipeline::{ExportSummary, run};
pub use writer::{read_graph, write_graph};
