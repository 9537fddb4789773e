//! Local like/follow store.
//!
//! One JSON file per user (`social-<userId>.json`), rewritten after every
//! change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use wave_core::{Result, SocialStats, SocialStore, TrackId, UserId, WaveError};

/// Persisted like/follow state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialRecord {
    #[serde(default)]
    pub likes: BTreeSet<TrackId>,
    #[serde(default)]
    pub following: BTreeSet<UserId>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// [`SocialStore`] persisted to a JSON file
#[derive(Debug)]
pub struct LocalSocialStore {
    path: PathBuf,
    record: SocialRecord,
}

impl LocalSocialStore {
    /// Open (or start) the store for `user_id` under `dir`
    pub fn open(dir: impl AsRef<Path>, user_id: &UserId) -> Result<Self> {
        let path = dir.as_ref().join(format!("social-{}.json", user_id));

        let record = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                WaveError::storage(format!("corrupt social file {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => SocialRecord::default(),
            Err(e) => return Err(e.into()),
        };

        debug!(
            path = %path.display(),
            likes = record.likes.len(),
            following = record.following.len(),
            "Opened social store"
        );

        Ok(Self { path, record })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn liked_ids(&self) -> impl Iterator<Item = &TrackId> {
        self.record.likes.iter()
    }

    pub fn following_ids(&self) -> impl Iterator<Item = &UserId> {
        self.record.following.iter()
    }

    pub fn stats(&self) -> SocialStats {
        SocialStats {
            liked_tracks: self.record.likes.len(),
            following: self.record.following.len(),
            last_activity: self.record.updated_at,
        }
    }

    /// Forget all likes and follows
    pub fn clear(&mut self) -> Result<()> {
        self.record.likes.clear();
        self.record.following.clear();
        self.save()
    }

    /// Copy of the whole record
    pub fn export(&self) -> SocialRecord {
        self.record.clone()
    }

    /// Replace the whole record
    pub fn import(&mut self, record: SocialRecord) -> Result<()> {
        self.record = record;
        self.save()
    }

    fn save(&mut self) -> Result<()> {
        self.record.updated_at = Some(Utc::now());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&self.record)?)?;
        Ok(())
    }
}

/// Insert if absent, remove if present; returns membership afterwards
fn toggle<T: Ord + Clone>(set: &mut BTreeSet<T>, value: &T) -> bool {
    if set.remove(value) {
        false
    } else {
        set.insert(value.clone());
        true
    }
}

impl SocialStore for LocalSocialStore {
    fn toggle_like(&mut self, track_id: &TrackId) -> Result<bool> {
        let liked = toggle(&mut self.record.likes, track_id);
        if let Err(e) = self.save() {
            toggle(&mut self.record.likes, track_id);
            return Err(e);
        }
        Ok(liked)
    }

    fn toggle_follow(&mut self, user_id: &UserId) -> Result<bool> {
        let following = toggle(&mut self.record.following, user_id);
        if let Err(e) = self.save() {
            toggle(&mut self.record.following, user_id);
            return Err(e);
        }
        Ok(following)
    }

    fn is_liked(&self, track_id: &TrackId) -> bool {
        self.record.likes.contains(track_id)
    }

    fn is_following(&self, user_id: &UserId) -> bool {
        self.record.following.contains(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_membership() {
        let mut set = BTreeSet::new();
        assert!(toggle(&mut set, &1));
        assert!(!toggle(&mut set, &1));
        assert!(set.is_empty());
    }
}
