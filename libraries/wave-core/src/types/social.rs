/// Social (likes/follows) summary types
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counts reported by a social store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialStats {
    pub liked_tracks: usize,
    pub following: usize,
    pub last_activity: Option<DateTime<Utc>>,
}
