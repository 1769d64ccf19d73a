//! Error types for asset lookups.

use sref_types::{AssetId, AssetPath, TypeError};
use thiserror::Error;

/// Errors that can occur while querying an asset store.
#[derive(Debug, Error)]
pub enum AssetError {
    /// No asset carries this identifier.
    #[error("asset not found for id {0}")]
    IdNotFound(AssetId),

    /// No asset lives at this path.
    #[error("asset not found at path {0}")]
    PathNotFound(AssetPath),

    /// A `.meta` sidecar exists but does not hold a usable identifier.
    #[error("malformed meta file {path}: {reason}")]
    MalformedMeta { path: String, reason: String },

    /// A path or identifier failed validation.
    #[error("invalid value: {0}")]
    Type(#[from] TypeError),

    /// The store's internal state could not be accessed.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// I/O error from a file-backed store.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl AssetError {
    /// Returns `true` for the "no such asset" variants.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::IdNotFound(_) | Self::PathNotFound(_))
    }
}

/// Convenience type alias for asset operations.
pub type AssetResult<T> = std::result::Result<T, AssetError>;
