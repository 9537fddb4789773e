//! Types for Wave server API requests and responses.

use serde::{Deserialize, Serialize};
use wave_core::{Track, User};

/// Configuration for connecting to a Wave server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the server (e.g., "https://wave.example.com")
    pub url: String,
    /// Bearer token (if authenticated)
    pub token: Option<String>,
}

impl ClientConfig {
    /// Create a new client config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: None,
        }
    }

    /// Create a config with a stored token.
    pub fn with_token(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: Some(token.into()),
        }
    }
}

/// Request body for register and login.
#[derive(Debug, Serialize)]
pub(crate) struct CredentialsRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// `{ "user": ... }`
#[derive(Debug, Deserialize)]
pub(crate) struct UserResponse {
    pub user: User,
}

/// `{ "track": ... }`
#[derive(Debug, Deserialize)]
pub(crate) struct TrackResponse {
    pub track: Track,
}

/// `{ "plays": n }`
#[derive(Debug, Deserialize)]
pub(crate) struct PlaysResponse {
    pub plays: u64,
}

/// Error body returned by the server for every failure.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
