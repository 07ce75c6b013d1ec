//! Media element synchronization tests
//!
//! Records every command the controller issues and checks the exact sequence
//! against the element contract.

use cadenza_core::Track;
use cadenza_playback::{
    format_time, MediaElement, MediaEvent, PlaybackConfig, PlaybackController, PlaybackError,
    PlaybackEvent, SkipDirection,
};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Load(String),
    Play,
    Pause,
    Seek(f64),
    Volume(f64),
}

#[derive(Clone, Default)]
struct RecordingElement {
    commands: Arc<Mutex<Vec<Command>>>,
}

impl RecordingElement {
    fn take(&self) -> Vec<Command> {
        std::mem::take(&mut *self.commands.lock().unwrap())
    }

    fn push(&self, command: Command) {
        self.commands.lock().unwrap().push(command);
    }
}

impl MediaElement for RecordingElement {
    fn load(&mut self, url: &str) {
        self.push(Command::Load(url.to_string()));
    }

    fn play(&mut self) {
        self.push(Command::Play);
    }

    fn pause(&mut self) {
        self.push(Command::Pause);
    }

    fn seek(&mut self, position_secs: f64) {
        self.push(Command::Seek(position_secs));
    }

    fn set_volume(&mut self, volume: f64) {
        self.push(Command::Volume(volume));
    }
}

fn track(id: &str) -> Track {
    Track::new(
        id,
        format!("Track {id}"),
        "Artist",
        format!("https://cdn.example.com/{id}.mp3"),
    )
}

fn load(id: &str) -> Command {
    Command::Load(format!("https://cdn.example.com/{id}.mp3"))
}

fn setup(tracks: &[Track]) -> (PlaybackController, RecordingElement) {
    let element = RecordingElement::default();
    let mut controller =
        PlaybackController::new(Box::new(element.clone()), PlaybackConfig::default());
    controller.set_track_list(tracks.to_vec());
    element.take();
    (controller, element)
}

#[test]
fn initial_volume_is_applied_on_construction() {
    let element = RecordingElement::default();
    let controller = PlaybackController::new(Box::new(element.clone()), PlaybackConfig { volume: 0.3 });

    assert_eq!(element.take(), vec![Command::Volume(0.3)]);
    assert_eq!(controller.state().volume, 0.3);
}

#[test]
fn switching_tracks_loads_new_source_before_playing() {
    let tracks = vec![track("1"), track("2")];
    let (mut controller, element) = setup(&tracks);

    controller.select_track(tracks[0].clone());
    controller.select_track(tracks[1].clone());

    assert_eq!(
        element.take(),
        vec![load("1"), Command::Play, load("2"), Command::Play]
    );
}

#[test]
fn pause_and_resume_keep_source_and_position() {
    let tracks = vec![track("1")];
    let (mut controller, element) = setup(&tracks);

    controller.select_track(tracks[0].clone());
    controller.handle_media_event(MediaEvent::MetadataLoaded(200.0));
    controller.handle_media_event(MediaEvent::TimeUpdated(42.0));
    controller.toggle_play().unwrap();
    controller.toggle_play().unwrap();

    assert_eq!(
        element.take(),
        vec![load("1"), Command::Play, Command::Pause, Command::Play]
    );
    assert_eq!(controller.state().current_time, 42.0);
    assert_eq!(controller.state().duration, 200.0);
}

#[test]
fn skipping_from_paused_starts_playback() {
    let tracks = vec![track("1"), track("2"), track("3")];
    let (mut controller, element) = setup(&tracks);

    controller.select_track(tracks[0].clone());
    controller.toggle_play().unwrap();
    element.take();

    controller.skip(SkipDirection::Prev).unwrap();

    assert_eq!(element.take(), vec![load("3"), Command::Play]);
    assert!(controller.is_playing());
    assert_eq!(controller.current_track().unwrap().id, tracks[2].id);
}

#[test]
fn skipping_from_track_outside_list() {
    let tracks = vec![track("1"), track("2"), track("3")];
    let (mut controller, _element) = setup(&tracks);

    controller.select_track(track("99"));
    controller.skip(SkipDirection::Next).unwrap();
    assert_eq!(controller.current_track().unwrap().id, tracks[0].id);

    controller.select_track(track("99"));
    controller.skip(SkipDirection::Prev).unwrap();
    assert_eq!(controller.current_track().unwrap().id, tracks[2].id);
}

#[test]
fn skipping_with_no_current_track_starts_at_an_end() {
    let tracks = vec![track("1"), track("2")];
    let (mut controller, _element) = setup(&tracks);

    controller.skip(SkipDirection::Next).unwrap();
    assert_eq!(controller.current_track().unwrap().id, tracks[0].id);

    controller.stop();
    controller.skip(SkipDirection::Prev).unwrap();
    assert_eq!(controller.current_track().unwrap().id, tracks[1].id);
}

#[test]
fn skipping_empty_list_is_an_error_and_changes_nothing() {
    let (mut controller, element) = setup(&[]);

    assert_eq!(
        controller.skip(SkipDirection::Next),
        Err(PlaybackError::EmptyTrackList)
    );
    assert!(controller.current_track().is_none());
    assert!(element.take().is_empty());
}

#[test]
fn ended_advances_and_wraps() {
    let tracks = vec![track("1"), track("2")];
    let (mut controller, element) = setup(&tracks);

    controller.select_track(tracks[1].clone());
    controller.handle_media_event(MediaEvent::MetadataLoaded(120.0));
    controller.handle_media_event(MediaEvent::TimeUpdated(120.0));
    element.take();

    controller.handle_media_event(MediaEvent::Ended);

    assert_eq!(element.take(), vec![load("1"), Command::Play]);
    assert_eq!(controller.current_track().unwrap().id, tracks[0].id);
    assert_eq!(controller.state().current_time, 0.0);
    assert_eq!(controller.state().duration, 0.0);
}

#[test]
fn stream_with_unknown_length_reports_zero_duration() {
    let tracks = vec![track("1")];
    let (mut controller, _element) = setup(&tracks);

    controller.select_track(tracks[0].clone());
    controller.handle_media_event(MediaEvent::MetadataLoaded(f64::INFINITY));

    assert_eq!(controller.state().duration, 0.0);
    assert_eq!(controller.state().progress(), 0.0);
    controller.seek(0.8).unwrap();
    assert_eq!(controller.state().current_time, 0.0);
}

#[test]
fn seek_fraction_is_clamped() {
    let tracks = vec![track("1")];
    let (mut controller, element) = setup(&tracks);

    controller.select_track(tracks[0].clone());
    controller.handle_media_event(MediaEvent::MetadataLoaded(100.0));
    element.take();

    controller.seek(1.5).unwrap();
    controller.seek(-0.5).unwrap();

    assert_eq!(element.take(), vec![Command::Seek(100.0), Command::Seek(0.0)]);
    assert_eq!(format_time(controller.state().current_time), "0:00");
}

#[test]
fn stop_emits_single_stopped_event() {
    let tracks = vec![track("1")];
    let (mut controller, element) = setup(&tracks);

    controller.select_track(tracks[0].clone());
    controller.drain_events();
    element.take();

    controller.stop();

    assert_eq!(element.take(), vec![Command::Pause]);
    assert_eq!(controller.drain_events(), vec![PlaybackEvent::Stopped]);
    assert!(controller.current_track().is_none());
    assert_eq!(controller.state().volume, 1.0);
}

#[test]
fn volume_change_is_reported() {
    let (mut controller, element) = setup(&[]);

    controller.set_volume(0.25);

    assert_eq!(element.take(), vec![Command::Volume(0.25)]);
    assert_eq!(
        controller.drain_events(),
        vec![PlaybackEvent::VolumeChanged { volume: 0.25 }]
    );
}
