//! Error types for the Wave client.

use crate::types::ErrorBody;
use thiserror::Error;
use wave_core::{TrackId, WaveError};

/// Errors that can occur when talking to a Wave server.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an unexpected error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Authentication required but no token available
    #[error("Authentication required")]
    AuthRequired,

    /// Missing, invalid or expired credentials (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Token present but rejected (403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Request rejected by server-side validation (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Resource does not exist (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Track does not exist
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Resource already exists (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

impl ClientError {
    /// Map an error status and message to the matching variant.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 | 413 => Self::Validation(message),
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            _ => Self::ServerError { status, message },
        }
    }

    /// Whether the stored session is no longer valid.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized(_) | Self::AuthRequired)
    }
}

/// Classify a transport failure.
pub(crate) fn send_error(e: reqwest::Error) -> ClientError {
    if e.is_connect() || e.is_timeout() {
        ClientError::ServerUnreachable(e.to_string())
    } else {
        ClientError::Request(e)
    }
}

/// Build an error from a non-success response, reading the `{"error"}` body.
pub(crate) async fn response_error(response: reqwest::Response) -> ClientError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);

    ClientError::from_status(status, message)
}

impl From<ClientError> for WaveError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::AuthRequired => WaveError::unauthorized("not logged in"),
            ClientError::Unauthorized(msg) | ClientError::Forbidden(msg) => {
                WaveError::Unauthorized(msg)
            }
            ClientError::Validation(msg) | ClientError::InvalidUrl(msg) => {
                WaveError::Validation(msg)
            }
            ClientError::NotFound(msg) => WaveError::not_found("Resource", msg),
            ClientError::TrackNotFound(id) => WaveError::not_found("Track", id.as_str()),
            ClientError::Conflict(msg) => WaveError::Conflict(msg),
            ClientError::ServerUnreachable(msg) => WaveError::Network(msg),
            ClientError::Request(e) => WaveError::Network(e.to_string()),
            ClientError::ServerError { status, message } => {
                WaveError::Network(format!("server returned {status}: {message}"))
            }
            ClientError::ParseError(msg) => WaveError::Other(msg),
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
