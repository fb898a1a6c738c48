//! Error types for modgate

/// Result type alias using modgate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for modgate operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Policy source malformed or structurally invalid
    #[error("load error: {0}")]
    Load(String),

    /// Caller input invalid
    #[error("validation error: {0}")]
    Validation(String),

    /// Referenced content id unknown
    #[error("not found: {0}")]
    NotFound(String),

    /// Operation conflicts with the current content state
    #[error("conflict: {0}")]
    Conflict(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new load error
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new not-found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
