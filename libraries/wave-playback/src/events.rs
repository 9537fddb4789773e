//! Playback events
//!
//! Events go synchronously to registered listeners. With no listener
//! registered they are queued for [`EventBus::drain`] instead, so poll
//! consumers work and push consumers never accumulate a backlog.

use crate::error::ErrorKind;
use crate::types::{PlayerState, RepeatMode};
use serde::{Deserialize, Serialize};
use wave_core::TrackId;

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// State machine moved
    StateChanged { state: PlayerState },

    /// A different playlist entry became current
    TrackChanged {
        track_id: TrackId,
        previous_track_id: Option<TrackId>,
        index: usize,
    },

    /// Play intent flipped
    PlayingChanged { is_playing: bool },

    /// Volume or mute changed
    VolumeChanged { volume: f32, muted: bool },

    /// Shuffle or repeat changed
    ModeChanged { shuffle: bool, repeat: RepeatMode },

    /// Periodic progress, forwarded from the media sink
    PositionUpdate { position_ms: u64, duration_ms: u64 },

    /// Track reached its end naturally
    TrackFinished { track_id: TrackId },

    /// Runtime failure
    Error { kind: ErrorKind, message: String },
}

/// Handle returned by `on_state_change`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&PlaybackEvent) + Send>;

/// Listener registry plus pending event queue
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    pending: Vec<PlaybackEvent>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&PlaybackEvent) + Send + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the id was not registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: PlaybackEvent) {
        if self.listeners.is_empty() {
            self.pending.push(event);
            return;
        }
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }

    pub fn drain(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .field("pending", &self.pending.len())
            .finish()
    }
}
