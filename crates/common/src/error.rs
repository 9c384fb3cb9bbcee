use thiserror::Error;

/// Top-level error type for Mindtrace operations.
#[derive(Debug, Error)]
pub enum MindtraceError {
    // --- Hard dependency errors (analysis cannot complete) ---
    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Store error: {0}")]
    Store(String),

    // --- Soft dependency errors (response degrades) ---
    #[error("Explanation service error: {0}")]
    Explanation(String),

    // --- Operational errors ---
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("{0}")]
    Internal(String),
}

impl MindtraceError {
    /// Whether this error is from a hard dependency (aborts the whole analysis).
    pub fn is_hard_dependency(&self) -> bool {
        matches!(self, Self::Inference(_) | Self::Store(_))
    }

    /// Whether this error is from a soft dependency (captured, response degrades).
    pub fn is_soft_dependency(&self) -> bool {
        matches!(self, Self::Explanation(_))
    }
}

/// Result type alias for Mindtrace operations.
pub type Result<T> = std::result::Result<T, MindtraceError>;
