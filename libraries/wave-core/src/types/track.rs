/// Track domain type
use crate::types::{TrackId, UserId, UserSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Uploaded audio track
///
/// Immutable from the player's point of view: the controller only reads
/// these fields and asks the catalog to bump `plays`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    #[serde(default)]
    pub genre: Option<String>,

    #[serde(default)]
    pub mood: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Listed in the public feed
    #[serde(default)]
    pub is_public: bool,

    /// Reference handed to the media sink
    pub audio_url: String,

    /// Cover image reference
    #[serde(default)]
    pub cover_url: Option<String>,

    /// Duration in seconds (0 until a client reports it)
    #[serde(default, rename = "duration")]
    pub duration_seconds: f64,

    /// Uploading user
    pub uploaded_by: UserId,

    pub uploaded_at: DateTime<Utc>,

    /// Play count
    #[serde(default)]
    pub plays: u64,

    /// Like count
    #[serde(default)]
    pub likes: u64,

    /// Uploader summary, attached to API responses only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploader: Option<UserSummary>,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        audio_url: impl Into<String>,
        uploaded_by: UserId,
    ) -> Self {
        Self {
            id: TrackId::generate(),
            title: title.into(),
            artist: artist.into(),
            genre: None,
            mood: None,
            description: None,
            is_public: false,
            audio_url: audio_url.into(),
            cover_url: None,
            duration_seconds: 0.0,
            uploaded_by,
            uploaded_at: Utc::now(),
            plays: 0,
            likes: 0,
            uploader: None,
        }
    }

    /// Get the track duration as a Duration
    pub fn duration(&self) -> Duration {
        // Negative, NaN and out-of-range values all read as unknown
        Duration::try_from_secs_f64(self.duration_seconds).unwrap_or(Duration::ZERO)
    }

    /// Ranking score for the "popular" feed
    pub fn popularity(&self) -> u64 {
        self.plays.saturating_add(self.likes)
    }

    /// Case-insensitive match against title, artist and description
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.artist.to_lowercase().contains(&needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
    }
}
