//! Play-count side effect

use wave_core::TrackId;

/// Records that a track started loading
///
/// Must return immediately. Implementations that talk to a remote catalog
/// do so in the background and only log failures; the controller never
/// learns whether recording succeeded.
pub trait PlayRecorder: Send {
    fn record_play(&self, track_id: &TrackId);
}

/// Recorder that does nothing (default)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecorder;

impl PlayRecorder for NoopRecorder {
    fn record_play(&self, _track_id: &TrackId) {}
}
