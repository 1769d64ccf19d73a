/// Errors reported by lock-status providers.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// The provider could not answer the status query.
    #[error("provider error: {0}")]
    Provider(String),

    /// I/O error while inspecting the file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for gate results.
pub type GateResult<T> = Result<T, GateError>;
