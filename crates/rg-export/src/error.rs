//! Error types for rg-export.

use std::path::PathBuf;

use thiserror::Error;

use rg_core::CoreError;

/// Errors that abort an export.  None of them leave a partial output file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("acquisition from {from} failed")]
    Acquisition {
        from:   String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("edge #{edge} references node {node}, which is not in the node set")]
    DanglingEdgeReference { edge: usize, node: String },

    #[error("node {node} appears more than once")]
    DuplicateNode { node: String },

    #[error("edge #{edge} has weight {weight}; weights must be finite and non-negative")]
    InvalidEdgeWeight { edge: usize, weight: f64 },

    #[error("{0} nodes exceed the canonical id range")]
    TooManyNodes(usize),

    #[error("malformed graph file: {0}")]
    MalformedGraph(String),

    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("cannot write {}", path.display())]
    Write {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias for `Result<T, ExportError>`.
pub type ExportResult<T> = Result<T, ExportError>;
