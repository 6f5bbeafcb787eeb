//! Core error type.
//!
//! Sub-crates define their own error enums; `CoreError` covers the few
//! failures that belong to the shared types themselves.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown network type {0:?} (expected one of drive, drive_service, walk, bike, all, all_private)")]
    UnknownNetworkType(String),
}

/// Shorthand result type for `rg-core`.
pub type CoreResult<T> = Result<T, CoreError>;
