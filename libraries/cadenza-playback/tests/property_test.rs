//! Property-based tests for the playback controller
//!
//! Uses proptest to verify the now-playing invariants across random track
//! lists and operation sequences.

use cadenza_core::Track;
use cadenza_playback::{
    MediaElement, MediaEvent, PlaybackConfig, PlaybackController, SkipDirection,
};
use proptest::prelude::*;

// ===== Helpers =====

struct NullElement;

impl MediaElement for NullElement {
    fn load(&mut self, _url: &str) {}
    fn play(&mut self) {}
    fn pause(&mut self) {}
    fn seek(&mut self, _position_secs: f64) {}
    fn set_volume(&mut self, _volume: f64) {}
}

fn controller() -> PlaybackController {
    PlaybackController::new(Box::new(NullElement), PlaybackConfig::default())
}

/// Tracks with unique ids `0..n`
fn arbitrary_tracks() -> impl Strategy<Value = Vec<Track>> {
    prop::collection::vec(("[A-Za-z ]{1,30}", "[A-Za-z ]{1,20}"), 1..30).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (title, artist))| {
                Track::new(
                    i.to_string(),
                    title,
                    artist,
                    format!("https://cdn.example.com/{i}.mp3"),
                )
            })
            .collect()
    })
}

#[derive(Debug, Clone)]
enum Op {
    Select(usize),
    Toggle,
    Next,
    Prev,
    Seek(f64),
    Volume(f64),
    Time(f64),
    Metadata(f64),
    Ended,
    Stop,
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..64).prop_map(Op::Select),
        Just(Op::Toggle),
        Just(Op::Next),
        Just(Op::Prev),
        (-1.0f64..2.0).prop_map(Op::Seek),
        (-1.0f64..2.0).prop_map(Op::Volume),
        (0.0f64..600.0).prop_map(Op::Time),
        (0.0f64..600.0).prop_map(Op::Metadata),
        Just(Op::Ended),
        Just(Op::Stop),
    ]
}

fn apply(controller: &mut PlaybackController, tracks: &[Track], op: &Op) {
    match op {
        Op::Select(i) => controller.select_track(tracks[i % tracks.len()].clone()),
        Op::Toggle => {
            let _ = controller.toggle_play();
        }
        Op::Next => {
            let _ = controller.skip(SkipDirection::Next);
        }
        Op::Prev => {
            let _ = controller.skip(SkipDirection::Prev);
        }
        Op::Seek(f) => {
            let _ = controller.seek(*f);
        }
        Op::Volume(v) => controller.set_volume(*v),
        Op::Time(t) => controller.handle_media_event(MediaEvent::TimeUpdated(*t)),
        Op::Metadata(d) => controller.handle_media_event(MediaEvent::MetadataLoaded(*d)),
        Op::Ended => controller.handle_media_event(MediaEvent::Ended),
        Op::Stop => controller.stop(),
    }
}

// ===== Property Tests =====

proptest! {
    /// Property: Selecting the same track twice returns to the original play state
    #[test]
    fn select_twice_flips_back(tracks in arbitrary_tracks(), pick in 0usize..30) {
        let mut controller = controller();
        let track = tracks[pick % tracks.len()].clone();

        controller.select_track(track.clone());
        prop_assert!(controller.is_playing());

        controller.select_track(track.clone());
        prop_assert!(!controller.is_playing());

        controller.select_track(track.clone());
        prop_assert!(controller.is_playing());
        prop_assert_eq!(&controller.current_track().unwrap().id, &track.id);
    }

    /// Property: N skips in either direction over an N-track list return to the start
    #[test]
    fn skips_cycle_through_list(tracks in arbitrary_tracks(), start in 0usize..30, forward in any::<bool>()) {
        let mut controller = controller();
        controller.set_track_list(tracks.clone());
        let first = tracks[start % tracks.len()].clone();
        controller.select_track(first.clone());

        let direction = if forward { SkipDirection::Next } else { SkipDirection::Prev };
        for _ in 0..tracks.len() {
            controller.skip(direction).unwrap();
            prop_assert!(controller.is_playing());
        }

        prop_assert_eq!(&controller.current_track().unwrap().id, &first.id);
    }

    /// Property: Next then Prev lands back on an in-list track
    #[test]
    fn next_then_prev_is_identity(tracks in arbitrary_tracks(), start in 0usize..30) {
        let mut controller = controller();
        controller.set_track_list(tracks.clone());
        let first = tracks[start % tracks.len()].clone();
        controller.select_track(first.clone());

        controller.skip(SkipDirection::Next).unwrap();
        controller.skip(SkipDirection::Prev).unwrap();

        prop_assert_eq!(&controller.current_track().unwrap().id, &first.id);
    }

    /// Property: Seek lands at exactly fraction * duration
    #[test]
    fn seek_is_exact(duration in 1.0f64..36_000.0, fraction in 0.0f64..=1.0) {
        let mut controller = controller();
        controller.select_track(Track::new("1", "Song", "Artist", "https://cdn.example.com/1.mp3"));
        controller.handle_media_event(MediaEvent::MetadataLoaded(duration));

        controller.seek(fraction).unwrap();

        prop_assert_eq!(controller.state().current_time, fraction * duration);
    }

    /// Property: No operation sequence ever plays without a track or leaves
    /// volume and progress out of range
    #[test]
    fn invariants_hold_for_any_sequence(
        tracks in arbitrary_tracks(),
        use_list in any::<bool>(),
        ops in prop::collection::vec(arbitrary_op(), 0..100)
    ) {
        let mut controller = controller();
        if use_list {
            controller.set_track_list(tracks.clone());
        }

        for op in &ops {
            apply(&mut controller, &tracks, op);

            let state = controller.state();
            prop_assert!(!state.is_playing || state.current_track.is_some(), "Playing with no track after {:?}", op);
            prop_assert!((0.0..=1.0).contains(&state.volume));
            prop_assert!(state.current_time.is_finite() && state.current_time >= 0.0);
            prop_assert!(state.duration.is_finite() && state.duration >= 0.0);
        }
    }
}
