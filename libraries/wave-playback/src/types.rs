//! Core types for playback control

use serde::{Deserialize, Serialize};
use std::time::Duration;
use wave_core::Track;

/// Controller state machine
///
/// Cyclic: there is no terminal state while the session lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    /// Nothing playing (initial, or the queue ran out without repeat)
    #[default]
    Idle,

    /// Media is being sourced
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,

    /// End-of-track notification received, transition pending
    Ended,

    /// Media error notification received, recovery pending
    Errored,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatMode {
    /// Stop when the playlist ends
    #[default]
    #[serde(rename = "none")]
    Off,

    /// Loop entire playlist
    #[serde(rename = "all")]
    All,

    /// Loop current track only
    #[serde(rename = "one")]
    One,
}

impl RepeatMode {
    /// Next mode in the `Off -> All -> One -> Off` rotation
    pub fn cycle(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }
}

/// Identifies one `load` request issued to the media sink
///
/// Notifications tagged with anything but the latest id are stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LoadId(pub u64);

impl LoadId {
    pub(crate) fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Configuration for the playback controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial volume (0.0-1.0, default: 0.8)
    pub volume: f32,

    /// Initial shuffle flag (default: false)
    pub shuffle: bool,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// `previous_track` restarts the current track past this point (default: 3s)
    pub restart_threshold: Duration,

    /// Step for skip forward/backward (default: 10s)
    pub seek_step: Duration,

    /// Fixed seed for the shuffle picker
    pub shuffle_seed: Option<u64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 0.8,
            shuffle: false,
            repeat: RepeatMode::Off,
            restart_threshold: Duration::from_secs(3),
            seek_step: Duration::from_secs(10),
            shuffle_seed: None,
        }
    }
}

/// Serializable snapshot of the controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    pub state: PlayerState,
    pub current_track: Option<Track>,
    pub current_index: Option<usize>,
    pub playlist_len: usize,
    pub is_playing: bool,
    pub volume: f32,
    pub muted: bool,
    pub shuffle: bool,
    pub repeat_mode: RepeatMode,
    pub position_ms: u64,
    pub duration_ms: u64,
}
