//! Platform media output seam
//!
//! The environment owns the actual audio element/device. The controller
//! drives it through [`MediaSink`] and receives its notifications through
//! `PlaybackController::handle_media_event`.

use crate::types::LoadId;
use std::time::Duration;
use thiserror::Error;

/// Failure reported by a media sink
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct MediaError(pub String);

impl MediaError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Platform audio output
///
/// Implementors must tag every notification for a loaded source with the
/// `LoadId` passed to [`MediaSink::load`].
pub trait MediaSink: Send {
    /// Start sourcing `url`; completion arrives as `MediaEvent::CanPlay`
    fn load(&mut self, load_id: LoadId, url: &str) -> Result<(), MediaError>;

    /// Start or resume output
    fn play(&mut self) -> Result<(), MediaError>;

    fn pause(&mut self);

    fn seek(&mut self, position: Duration) -> Result<(), MediaError>;

    /// Audible level in [0, 1] (already 0 when muted)
    fn set_volume(&mut self, volume: f32);

    /// Current playback position
    fn position(&self) -> Duration;
}

/// Notification from the media sink
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Source loaded and ready
    CanPlay,

    /// Periodic progress
    TimeUpdate {
        position: Duration,
        duration: Duration,
    },

    /// Reached end of stream
    Ended,

    /// Source or device error
    Error { message: String },
}
