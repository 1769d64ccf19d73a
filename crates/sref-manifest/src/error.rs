//! Error types for the manifest crate.

/// Errors that can occur while reading or writing the build manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// The backing store's contents could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The store's internal state could not be accessed.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// I/O error from a file-backed store.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for manifest results.
pub type ManifestResult<T> = Result<T, ManifestError>;
