//! Read-only playlist view
//!
//! The caller that loads a playlist owns it; the controller only keeps a
//! shared handle and an index into it.

use std::sync::Arc;
use wave_core::{Track, TrackId};

/// Ordered sequence of tracks, insertion order is playback order
#[derive(Debug, Clone)]
pub struct Playlist {
    tracks: Arc<[Track]>,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks: Arc::from(tracks),
        }
    }

    /// Playlist holding a single track
    pub fn single(track: Track) -> Self {
        Self::new(vec![track])
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Index of the first track with this id
    pub fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    /// Following index, wrapping at the end
    pub fn next_index(&self, current: usize) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        Some((current + 1) % self.len())
    }

    /// Preceding index, wrapping at the start
    pub fn previous_index(&self, current: usize) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        Some(if current == 0 {
            self.len() - 1
        } else {
            (current - 1).min(self.len() - 1)
        })
    }
}

impl Default for Playlist {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<Track>> for Playlist {
    fn from(tracks: Vec<Track>) -> Self {
        Self::new(tracks)
    }
}

impl FromIterator<Track> for Playlist {
    fn from_iter<I: IntoIterator<Item = Track>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
