//! Property-based tests for the playback controller
//!
//! Uses proptest to check navigation invariants across random playlists,
//! positions and seeds.

use proptest::prelude::*;
use std::time::Duration;
use wave_core::{Track, UserId};
use wave_playback::{
    LoadId, MediaError, MediaEvent, MediaSink, PlaybackConfig, PlaybackController, Playlist,
    RepeatMode,
};

// ===== Helpers =====

#[derive(Debug, Default)]
struct PositionSink {
    position: Duration,
}

impl MediaSink for PositionSink {
    fn load(&mut self, _load_id: LoadId, _url: &str) -> Result<(), MediaError> {
        self.position = Duration::ZERO;
        Ok(())
    }

    fn play(&mut self) -> Result<(), MediaError> {
        Ok(())
    }

    fn pause(&mut self) {}

    fn seek(&mut self, position: Duration) -> Result<(), MediaError> {
        self.position = position;
        Ok(())
    }

    fn set_volume(&mut self, _volume: f32) {}

    fn position(&self) -> Duration {
        self.position
    }
}

fn arbitrary_track() -> impl Strategy<Value = Track> {
    ("[A-Za-z ]{1,30}", "[A-Za-z ]{1,20}", 1u32..600).prop_map(|(title, artist, secs)| {
        let mut track = Track::new(title, artist, "/uploads/tracks/t.mp3", UserId::new("u"));
        track.duration_seconds = f64::from(secs);
        track
    })
}

fn arbitrary_playlist() -> impl Strategy<Value = Playlist> {
    prop::collection::vec(arbitrary_track(), 1..30).prop_map(Playlist::new)
}

fn loaded(
    list: &Playlist,
    start: usize,
    config: PlaybackConfig,
) -> PlaybackController<PositionSink> {
    let mut ctrl = PlaybackController::new(PositionSink::default(), config);
    ctrl.load_track(list.tracks()[start].clone(), Some(list.clone()), Some(start))
        .unwrap();
    ctrl
}

// ===== Property Tests =====

proptest! {
    /// Property: `len` calls to next_track return to the starting index
    #[test]
    fn next_is_cyclic(list in arbitrary_playlist(), start in any::<prop::sample::Index>()) {
        let start = start.index(list.len());
        let mut ctrl = loaded(&list, start, PlaybackConfig::default());

        for _ in 0..list.len() {
            ctrl.next_track();
        }

        prop_assert_eq!(ctrl.current_index(), Some(start));
    }

    /// Property: shuffle never picks the current index when there is a choice
    #[test]
    fn shuffle_never_repeats_immediately(
        list in arbitrary_playlist().prop_filter("needs two tracks", |l| l.len() > 1),
        seed in any::<u64>(),
        steps in 1usize..40,
    ) {
        let config = PlaybackConfig {
            shuffle: true,
            shuffle_seed: Some(seed),
            ..PlaybackConfig::default()
        };
        let mut ctrl = loaded(&list, 0, config);

        for _ in 0..steps {
            let before = ctrl.current_index();
            ctrl.next_track();
            prop_assert_ne!(ctrl.current_index(), before);
        }
    }

    /// Property: previous_track restarts past 3s and steps back otherwise
    #[test]
    fn previous_respects_restart_threshold(
        list in arbitrary_playlist(),
        start in any::<prop::sample::Index>(),
        elapsed_ms in 0u64..10_000,
    ) {
        let start = start.index(list.len());
        let mut ctrl = loaded(&list, start, PlaybackConfig::default());
        ctrl.sink_mut().position = Duration::from_millis(elapsed_ms);

        ctrl.previous_track();

        if elapsed_ms > 3_000 {
            prop_assert_eq!(ctrl.current_index(), Some(start));
            prop_assert_eq!(ctrl.position(), Duration::ZERO);
        } else {
            let expected = if start == 0 { list.len() - 1 } else { start - 1 };
            prop_assert_eq!(ctrl.current_index(), Some(expected));
        }
    }

    /// Property: repeat One never moves off the current track on end
    #[test]
    fn repeat_one_keeps_index(list in arbitrary_playlist(), start in any::<prop::sample::Index>()) {
        let start = start.index(list.len());
        let config = PlaybackConfig {
            repeat: RepeatMode::One,
            ..PlaybackConfig::default()
        };
        let mut ctrl = loaded(&list, start, config);
        ctrl.play();

        let id = ctrl.load_id();
        ctrl.handle_media_event(id, MediaEvent::CanPlay);
        ctrl.sink_mut().position = Duration::from_secs(100);
        ctrl.handle_media_event(id, MediaEvent::Ended);

        prop_assert_eq!(ctrl.current_index(), Some(start));
        prop_assert_eq!(ctrl.position(), Duration::ZERO);
        prop_assert!(ctrl.is_playing());
    }

    /// Property: stored volume always lies in [0, 1]
    #[test]
    fn volume_always_in_range(volume in any::<f32>()) {
        let mut ctrl = PlaybackController::new(PositionSink::default(), PlaybackConfig::default());
        ctrl.set_volume(volume);

        prop_assert!((0.0..=1.0).contains(&ctrl.volume()));
    }
}
