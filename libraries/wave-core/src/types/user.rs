/// User domain type
use crate::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public view of a user account (never carries the password hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Login name, unique case-insensitively
    pub username: String,

    /// Name shown in the UI (defaults to the username)
    pub display_name: String,

    /// Avatar image URL
    #[serde(default)]
    pub avatar: Option<String>,

    /// Profile cover image URL
    #[serde(default)]
    pub cover: Option<String>,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub tracks_count: u64,

    #[serde(default)]
    pub followers_count: u64,

    #[serde(default)]
    pub following_count: u64,
}

impl User {
    /// Create a fresh account with zeroed counters
    pub fn new(username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            id: UserId::generate(),
            display_name: username.clone(),
            username,
            avatar: None,
            cover: None,
            created_at: Utc::now(),
            tracks_count: 0,
            followers_count: 0,
            following_count: 0,
        }
    }

    /// Compact form attached to tracks in API responses
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id.clone(),
            username: self.username.clone(),
            display_name: self.display_name.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// Uploader information embedded in track listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}
