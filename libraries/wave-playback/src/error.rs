//! Error types for playback control

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wave_core::TrackId;

/// Playback errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Playlist is empty
    #[error("Playlist is empty")]
    EmptyPlaylist,

    /// Index out of bounds
    #[error("Index out of bounds: {index} (playlist length {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Track to load is not part of the given playlist
    #[error("Track {0} is not in the playlist")]
    TrackNotInPlaylist(TrackId),

    /// Media for the track could not be sourced
    #[error("Load failure: {0}")]
    LoadFailure(String),

    /// The media device refused to play
    #[error("Playback failure: {0}")]
    PlaybackFailure(String),

    /// A side effect (play-count recording, catalog call) failed
    #[error("Side effect failure: {0}")]
    SideEffectFailure(String),

    /// Seeking by percentage needs a known duration
    #[error("Track duration unknown")]
    UnknownDuration,
}

impl PlaybackError {
    /// Classification used in error events, `None` for caller mistakes
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::LoadFailure(_) => Some(ErrorKind::LoadFailure),
            Self::PlaybackFailure(_) => Some(ErrorKind::PlaybackFailure),
            Self::SideEffectFailure(_) => Some(ErrorKind::SideEffectFailure),
            _ => None,
        }
    }
}

/// Category of a reported runtime failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Triggers auto-advance
    LoadFailure,
    /// Reported, auto-advance when alternatives exist
    PlaybackFailure,
    /// Logged only
    SideEffectFailure,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_failures_have_a_kind() {
        assert_eq!(
            PlaybackError::LoadFailure("404".into()).kind(),
            Some(ErrorKind::LoadFailure)
        );
        assert_eq!(
            PlaybackError::PlaybackFailure("denied".into()).kind(),
            Some(ErrorKind::PlaybackFailure)
        );
        assert_eq!(PlaybackError::NoTrackLoaded.kind(), None);
    }

    #[test]
    fn index_error_message() {
        let err = PlaybackError::IndexOutOfBounds { index: 5, len: 3 };
        assert_eq!(err.to_string(), "Index out of bounds: 5 (playlist length 3)");
    }
}
