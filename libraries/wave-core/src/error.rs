/// Core error types for Wave
use thiserror::Error;

/// Result type alias using `WaveError`
pub type Result<T> = std::result::Result<T, WaveError>;

/// Error raised at the collaborator boundary (catalog, auth, social store)
#[derive(Error, Debug)]
pub enum WaveError {
    /// Bad input, rejected before any state change
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Missing or invalid credentials; the caller must re-authenticate
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Referenced entity is absent
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Entity already exists (e.g. username taken)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Transport-level failure talking to a remote collaborator
    #[error("Network error: {0}")]
    Network(String),

    /// Storage errors (local persistence)
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl WaveError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an unauthorized error
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Whether the caller has to log in again
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}
