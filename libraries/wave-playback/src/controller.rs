//! Playback controller - core orchestration
//!
//! Owns the playlist position, shuffle/repeat mode, volume and play intent,
//! sequences track transitions, and reacts to media sink notifications.
//!
//! Everything happens on the caller's thread: user actions and media
//! notifications are processed one at a time through `&mut self`.

use crate::{
    error::{ErrorKind, PlaybackError, Result},
    events::{EventBus, ListenerId, PlaybackEvent},
    playlist::Playlist,
    recorder::{NoopRecorder, PlayRecorder},
    shuffle::ShufflePicker,
    sink::{MediaEvent, MediaSink},
    types::{LoadId, PlaybackConfig, PlaybackState, PlayerState, RepeatMode},
    volume::Volume,
};
use std::time::Duration;
use tracing::{debug, warn};
use wave_core::Track;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Next,
    Previous,
}

/// Playlist-aware playback controller
pub struct PlaybackController<S: MediaSink> {
    sink: S,
    recorder: Box<dyn PlayRecorder>,

    state: PlayerState,
    playlist: Playlist,
    current_index: Option<usize>,
    current_track: Option<Track>,

    // Play intent: true while playing, or while a load will start playing once ready
    is_playing: bool,

    volume: Volume,
    shuffle: bool,
    repeat: RepeatMode,
    picker: ShufflePicker,

    restart_threshold: Duration,
    seek_step: Duration,

    // Id of the latest load request; notifications for older ids are dropped
    load_id: LoadId,

    // Last known duration of the current track (ZERO if unknown)
    duration: Duration,

    consecutive_failures: usize,
    last_error: Option<PlaybackError>,

    events: EventBus,
}

impl<S: MediaSink> PlaybackController<S> {
    /// Create a controller driving `sink`
    pub fn new(mut sink: S, config: PlaybackConfig) -> Self {
        let volume = Volume::new(config.volume);
        sink.set_volume(volume.audible());

        Self {
            sink,
            recorder: Box::new(NoopRecorder),
            state: PlayerState::Idle,
            playlist: Playlist::default(),
            current_index: None,
            current_track: None,
            is_playing: false,
            volume,
            shuffle: config.shuffle,
            repeat: config.repeat,
            picker: ShufflePicker::new(config.shuffle_seed),
            restart_threshold: config.restart_threshold,
            seek_step: config.seek_step,
            load_id: LoadId::default(),
            duration: Duration::ZERO,
            consecutive_failures: 0,
            last_error: None,
            events: EventBus::new(),
        }
    }

    /// Replace the play-count recorder
    pub fn with_recorder(mut self, recorder: impl PlayRecorder + 'static) -> Self {
        self.recorder = Box::new(recorder);
        self
    }

    // ===== Loading =====

    /// Load a track, optionally replacing the held playlist
    ///
    /// With a playlist, `index` selects the entry to load (the playlist entry
    /// wins over `track`); without an index the track is looked up in the
    /// playlist by id. Without a playlist the track is looked up in the held
    /// playlist, falling back to a single-track playlist.
    ///
    /// The loaded track does not start playing until `play()` is called.
    /// Media failures are reported through events and auto-advance; the
    /// returned error only covers invalid arguments, which change nothing.
    pub fn load_track(
        &mut self,
        track: Track,
        playlist: Option<Playlist>,
        index: Option<usize>,
    ) -> Result<()> {
        let (playlist, index) = match playlist {
            Some(playlist) => {
                if playlist.is_empty() {
                    return Err(PlaybackError::EmptyPlaylist);
                }
                let index = match index {
                    Some(index) => index,
                    None => playlist
                        .position_of(&track.id)
                        .ok_or_else(|| PlaybackError::TrackNotInPlaylist(track.id.clone()))?,
                };
                if index >= playlist.len() {
                    return Err(PlaybackError::IndexOutOfBounds {
                        index,
                        len: playlist.len(),
                    });
                }
                (playlist, index)
            }
            None => match self.playlist.position_of(&track.id) {
                Some(index) => (self.playlist.clone(), index),
                None => (Playlist::single(track), 0),
            },
        };

        self.playlist = playlist;
        self.consecutive_failures = 0;
        self.load_index(index, false);
        Ok(())
    }

    /// Load the playlist entry at `index`
    fn load_index(&mut self, index: usize, autoplay: bool) {
        let Some(track) = self.playlist.get(index).cloned() else {
            return;
        };

        let previous_track_id = self.current_track.as_ref().map(|t| t.id.clone());

        self.load_id = self.load_id.next();
        self.current_index = Some(index);
        self.duration = track.duration();
        self.current_track = Some(track.clone());

        debug!(
            track_id = %track.id,
            index,
            load_id = self.load_id.0,
            autoplay,
            "Loading track"
        );

        self.set_playing(autoplay);
        self.set_state(PlayerState::Loading);
        self.events.emit(PlaybackEvent::TrackChanged {
            track_id: track.id.clone(),
            previous_track_id,
            index,
        });

        self.recorder.record_play(&track.id);

        if let Err(err) = self.sink.load(self.load_id, &track.audio_url) {
            self.fail(PlaybackError::LoadFailure(err.0));
            return;
        }

        if autoplay {
            if let Err(err) = self.sink.play() {
                self.fail(PlaybackError::PlaybackFailure(err.0));
            }
        }
    }

    // ===== Playback Control =====

    /// Start or resume playback
    ///
    /// Silently ignored if no track is loaded. After the playlist ran out
    /// (state `Idle` with a track loaded) the track restarts from zero.
    pub fn play(&mut self) {
        if self.current_track.is_none() {
            debug!("play() ignored: no track loaded");
            return;
        }

        match self.state {
            PlayerState::Playing => {}
            PlayerState::Loading => {
                if !self.is_playing {
                    self.set_playing(true);
                    if let Err(err) = self.sink.play() {
                        self.fail(PlaybackError::PlaybackFailure(err.0));
                    }
                }
            }
            PlayerState::Idle
            | PlayerState::Paused
            | PlayerState::Ended
            | PlayerState::Errored => {
                if self.state == PlayerState::Idle {
                    if let Err(err) = self.sink.seek(Duration::ZERO) {
                        warn!(error = %err, "Failed to rewind before replay");
                    }
                }

                self.set_playing(true);
                match self.sink.play() {
                    Ok(()) => self.set_state(PlayerState::Playing),
                    Err(err) => self.fail(PlaybackError::PlaybackFailure(err.0)),
                }
            }
        }
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if !self.is_playing && self.state != PlayerState::Playing {
            return;
        }

        self.sink.pause();
        self.set_playing(false);
        if self.state == PlayerState::Playing {
            self.set_state(PlayerState::Paused);
        }
    }

    pub fn toggle_play_pause(&mut self) {
        if self.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Pause and rewind to zero
    pub fn stop(&mut self) {
        if self.current_track.is_none() {
            return;
        }

        self.sink.pause();
        if let Err(err) = self.sink.seek(Duration::ZERO) {
            warn!(error = %err, "Failed to rewind on stop");
        }
        self.set_playing(false);

        if self.state != PlayerState::Loading {
            self.set_state(PlayerState::Paused);
        }
        self.emit_position(Duration::ZERO);
    }

    // ===== Navigation =====

    /// Skip to the next track (wraps at the end)
    pub fn next_track(&mut self) {
        self.consecutive_failures = 0;
        self.advance(Direction::Next, self.is_playing);
    }

    /// Go to the previous track
    ///
    /// Past the restart threshold the current track restarts instead.
    pub fn previous_track(&mut self) {
        if self.playlist.is_empty() {
            return;
        }

        if self.current_track.is_some() && self.sink.position() > self.restart_threshold {
            debug!("Restarting current track");
            match self.sink.seek(Duration::ZERO) {
                Ok(()) => self.emit_position(Duration::ZERO),
                Err(err) => warn!(error = %err, "Failed to restart track"),
            }
            return;
        }

        self.consecutive_failures = 0;
        self.advance(Direction::Previous, self.is_playing);
    }

    fn advance(&mut self, direction: Direction, autoplay: bool) {
        let len = self.playlist.len();
        if len == 0 {
            return;
        }

        let index = if self.shuffle {
            self.picker.pick(len, self.current_index)
        } else {
            match (direction, self.current_index) {
                (Direction::Next, Some(current)) => self.playlist.next_index(current),
                (Direction::Previous, Some(current)) => self.playlist.previous_index(current),
                (_, None) => Some(0),
            }
        };

        if let Some(index) = index {
            self.load_index(index, autoplay);
        }
    }

    // ===== Media Notifications =====

    /// Process a notification from the media sink
    ///
    /// Notifications tagged with an outdated `LoadId` are discarded.
    pub fn handle_media_event(&mut self, load_id: LoadId, event: MediaEvent) {
        if load_id != self.load_id || self.current_track.is_none() {
            debug!(
                load_id = load_id.0,
                current = self.load_id.0,
                ?event,
                "Discarding stale media event"
            );
            return;
        }

        match event {
            MediaEvent::CanPlay => {
                if self.state != PlayerState::Loading {
                    return;
                }
                self.consecutive_failures = 0;
                let next = if self.is_playing {
                    PlayerState::Playing
                } else {
                    PlayerState::Paused
                };
                self.set_state(next);
            }
            MediaEvent::TimeUpdate { position, duration } => {
                if duration > Duration::ZERO {
                    self.duration = duration;
                }
                self.emit_position(position);
            }
            MediaEvent::Ended => self.on_ended(),
            MediaEvent::Error { message } => {
                let error = if self.state == PlayerState::Loading {
                    PlaybackError::LoadFailure(message)
                } else {
                    PlaybackError::PlaybackFailure(message)
                };
                self.fail(error);
            }
        }
    }

    fn on_ended(&mut self) {
        let (Some(track_id), Some(index)) = (
            self.current_track.as_ref().map(|t| t.id.clone()),
            self.current_index,
        ) else {
            return;
        };

        self.events.emit(PlaybackEvent::TrackFinished { track_id });
        self.set_state(PlayerState::Ended);

        match self.repeat {
            RepeatMode::One => {
                if let Err(err) = self.sink.seek(Duration::ZERO) {
                    warn!(error = %err, "Failed to rewind for repeat");
                }
                self.set_playing(true);
                match self.sink.play() {
                    Ok(()) => self.set_state(PlayerState::Playing),
                    Err(err) => self.fail(PlaybackError::PlaybackFailure(err.0)),
                }
            }
            RepeatMode::All => self.advance(Direction::Next, true),
            RepeatMode::Off => {
                if index + 1 < self.playlist.len() {
                    self.advance(Direction::Next, true);
                } else {
                    self.set_playing(false);
                    self.set_state(PlayerState::Idle);
                }
            }
        }
    }

    /// Report a runtime failure and recover
    ///
    /// Skips ahead while the playlist has alternatives that have not all
    /// failed in a row, otherwise settles in `Paused`.
    fn fail(&mut self, error: PlaybackError) {
        warn!(error = %error, "Playback error");

        self.events.emit(PlaybackEvent::Error {
            kind: error.kind().unwrap_or(ErrorKind::PlaybackFailure),
            message: error.to_string(),
        });
        self.last_error = Some(error);
        self.set_state(PlayerState::Errored);
        self.consecutive_failures += 1;

        let len = self.playlist.len();
        if len > 1 && self.consecutive_failures < len {
            self.advance(Direction::Next, self.is_playing);
        } else {
            self.sink.pause();
            self.set_playing(false);
            self.set_state(PlayerState::Paused);
        }
    }

    // ===== Seek =====

    /// Seek within the current track, clamped to its duration when known
    pub fn seek(&mut self, position: Duration) -> Result<()> {
        if self.current_track.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }

        let position = if self.duration > Duration::ZERO {
            position.min(self.duration)
        } else {
            position
        };

        self.sink
            .seek(position)
            .map_err(|err| PlaybackError::PlaybackFailure(err.0))?;
        self.emit_position(position);
        Ok(())
    }

    /// Seek to a fraction (0.0-1.0) of the current track
    pub fn seek_to_percent(&mut self, percent: f32) -> Result<()> {
        if self.current_track.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }
        if self.duration == Duration::ZERO {
            return Err(PlaybackError::UnknownDuration);
        }

        let percent = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 1.0)
        };
        self.seek(self.duration.mul_f32(percent))
    }

    /// Jump forward by the configured seek step
    pub fn skip_forward(&mut self) -> Result<()> {
        let target = self.sink.position().saturating_add(self.seek_step);
        self.seek(target)
    }

    /// Jump backward by the configured seek step
    pub fn skip_backward(&mut self) -> Result<()> {
        let target = self.sink.position().saturating_sub(self.seek_step);
        self.seek(target)
    }

    // ===== Volume =====

    /// Set volume (clamped to 0.0-1.0)
    ///
    /// While muted only the stored preference changes.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume.set_level(volume);
        self.apply_volume();
    }

    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_volume();
    }

    fn apply_volume(&mut self) {
        self.sink.set_volume(self.volume.audible());
        self.events.emit(PlaybackEvent::VolumeChanged {
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
        });
    }

    // ===== Modes =====

    pub fn toggle_shuffle(&mut self) {
        self.set_shuffle(!self.shuffle);
    }

    pub fn set_shuffle(&mut self, shuffle: bool) {
        self.shuffle = shuffle;
        self.emit_mode_changed();
    }

    /// Rotate `Off -> All -> One -> Off`
    pub fn cycle_repeat_mode(&mut self) {
        self.set_repeat(self.repeat.cycle());
    }

    pub fn set_repeat(&mut self, repeat: RepeatMode) {
        self.repeat = repeat;
        self.emit_mode_changed();
    }

    // ===== State Queries =====

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Stored volume preference (0.0-1.0)
    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    /// Current position as reported by the sink
    pub fn position(&self) -> Duration {
        self.sink.position()
    }

    /// Duration of the current track (ZERO if unknown)
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Id of the latest load request
    pub fn load_id(&self) -> LoadId {
        self.load_id
    }

    /// Most recently reported runtime failure
    pub fn last_error(&self) -> Option<&PlaybackError> {
        self.last_error.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Serializable copy of the playback state
    pub fn snapshot(&self) -> PlaybackState {
        PlaybackState {
            state: self.state,
            current_track: self.current_track.clone(),
            current_index: self.current_index,
            playlist_len: self.playlist.len(),
            is_playing: self.is_playing,
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
            shuffle: self.shuffle,
            repeat_mode: self.repeat,
            position_ms: self.sink.position().as_millis() as u64,
            duration_ms: self.duration.as_millis() as u64,
        }
    }

    // ===== Events =====

    /// Register a listener called synchronously for every event
    ///
    /// While any listener is registered, events are not queued for
    /// [`drain_events`](Self::drain_events).
    pub fn on_state_change<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&PlaybackEvent) + Send + 'static,
    {
        self.events.subscribe(listener)
    }

    /// Returns false if the listener was not registered
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Drain all pending events
    ///
    /// Returns every event emitted since the last drain while no listener
    /// was registered, for consumers that poll instead of subscribing.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        self.events.drain()
    }

    pub fn has_pending_events(&self) -> bool {
        self.events.has_pending()
    }

    fn set_state(&mut self, state: PlayerState) {
        if self.state != state {
            self.state = state;
            self.events.emit(PlaybackEvent::StateChanged { state });
        }
    }

    fn set_playing(&mut self, is_playing: bool) {
        if self.is_playing != is_playing {
            self.is_playing = is_playing;
            self.events
                .emit(PlaybackEvent::PlayingChanged { is_playing });
        }
    }

    fn emit_position(&mut self, position: Duration) {
        self.events.emit(PlaybackEvent::PositionUpdate {
            position_ms: position.as_millis() as u64,
            duration_ms: self.duration.as_millis() as u64,
        });
    }

    fn emit_mode_changed(&mut self) {
        self.events.emit(PlaybackEvent::ModeChanged {
            shuffle: self.shuffle,
            repeat: self.repeat,
        });
    }
}

impl<S: MediaSink + std::fmt::Debug> std::fmt::Debug for PlaybackController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("sink", &self.sink)
            .field("state", &self.state)
            .field("current_index", &self.current_index)
            .field("playlist_len", &self.playlist.len())
            .field("is_playing", &self.is_playing)
            .field("load_id", &self.load_id)
            .finish_non_exhaustive()
    }
}
