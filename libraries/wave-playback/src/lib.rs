//! Wave - Playback Control
//!
//! Platform-agnostic playback and playlist navigation for Wave.
//!
//! This crate provides:
//! - Playlist navigation (next/previous with wraparound, restart rule)
//! - Shuffle (random without immediate repeat)
//! - Repeat modes (Off, All, One)
//! - Volume and mute
//! - Seek (time, percentage, fixed steps)
//! - Event listeners and a pollable event queue
//!
//! # Architecture
//!
//! `wave-playback` never touches audio hardware or the network:
//! - Audio output is a [`MediaSink`] provided by the platform
//! - Play-count recording is a fire-and-forget [`PlayRecorder`]
//! - Sink notifications come back through
//!   [`PlaybackController::handle_media_event`], tagged with the
//!   [`LoadId`] of the load they belong to
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use wave_core::{Track, UserId};
//! use wave_playback::{
//!     LoadId, MediaError, MediaEvent, MediaSink, PlaybackConfig, PlaybackController,
//!     PlayerState, Playlist,
//! };
//!
//! #[derive(Default)]
//! struct NullSink {
//!     position: Duration,
//! }
//!
//! impl MediaSink for NullSink {
//!     fn load(&mut self, _id: LoadId, _url: &str) -> Result<(), MediaError> {
//!         Ok(())
//!     }
//!     fn play(&mut self) -> Result<(), MediaError> {
//!         Ok(())
//!     }
//!     fn pause(&mut self) {}
//!     fn seek(&mut self, position: Duration) -> Result<(), MediaError> {
//!         self.position = position;
//!         Ok(())
//!     }
//!     fn set_volume(&mut self, _volume: f32) {}
//!     fn position(&self) -> Duration {
//!         self.position
//!     }
//! }
//!
//! let tracks: Playlist = ["Intro", "Outro"]
//!     .into_iter()
//!     .map(|title| Track::new(title, "Artist", "/uploads/tracks/x.mp3", UserId::new("u")))
//!     .collect();
//!
//! let mut player = PlaybackController::new(NullSink::default(), PlaybackConfig::default());
//! player
//!     .load_track(tracks.tracks()[0].clone(), Some(tracks.clone()), Some(0))
//!     .unwrap();
//! player.play();
//! player.handle_media_event(player.load_id(), MediaEvent::CanPlay);
//! assert_eq!(player.state(), PlayerState::Playing);
//!
//! player.next_track();
//! assert_eq!(player.current_index(), Some(1));
//! ```

mod controller;
mod error;
mod events;
mod format;
mod playlist;
mod recorder;
mod shuffle;
mod sink;
pub mod types;
mod volume;

// Public exports
pub use controller::PlaybackController;
pub use error::{ErrorKind, PlaybackError, Result};
pub use events::{EventBus, ListenerId, PlaybackEvent};
pub use format::format_time;
pub use playlist::Playlist;
pub use recorder::{NoopRecorder, PlayRecorder};
pub use shuffle::ShufflePicker;
pub use sink::{MediaError, MediaEvent, MediaSink};
pub use types::{LoadId, PlaybackConfig, PlaybackState, PlayerState, RepeatMode};
pub use volume::Volume;
