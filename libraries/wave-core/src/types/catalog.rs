/// Catalog request/response types
use crate::types::{Track, User, UserId};
use serde::{Deserialize, Serialize};

/// Feed ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackFilter {
    /// Newest upload first
    #[default]
    Recent,

    /// Highest plays + likes first
    Popular,
}

impl TrackFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackFilter::Recent => "recent",
            TrackFilter::Popular => "popular",
        }
    }
}

/// Track listing parameters (`GET /api/tracks` query string)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackQuery {
    #[serde(default)]
    pub filter: TrackFilter,

    #[serde(default = "default_limit")]
    pub limit: usize,

    #[serde(default)]
    pub offset: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Restrict to one uploader (includes their private tracks)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

fn default_limit() -> usize {
    20
}

impl Default for TrackQuery {
    fn default() -> Self {
        Self {
            filter: TrackFilter::default(),
            limit: default_limit(),
            offset: 0,
            search: None,
            user_id: None,
        }
    }
}

impl TrackQuery {
    pub fn new(filter: TrackFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

/// One page of a track listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackPage {
    pub tracks: Vec<Track>,
    pub total: usize,
    pub has_more: bool,
}

impl TrackPage {
    /// Slice an already filtered and sorted listing
    pub fn paginate(tracks: Vec<Track>, offset: usize, limit: usize) -> Self {
        let total = tracks.len();
        let end = offset.saturating_add(limit);
        let tracks = tracks.into_iter().skip(offset).take(limit).collect();

        Self {
            tracks,
            total,
            has_more: end < total,
        }
    }
}

/// Metadata fields sent alongside an upload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadMetadata {
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

impl UploadMetadata {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            ..Self::default()
        }
    }
}

/// In-memory file payload for uploads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// Result of register/login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}
