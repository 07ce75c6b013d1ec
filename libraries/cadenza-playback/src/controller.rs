//! Playback controller - the now-playing state machine
//!
//! Owns the single [`PlaybackState`] of a session, issues transport commands to
//! the media element, and folds the element's notifications back into state.

use crate::{
    error::{PlaybackError, Result},
    events::{MediaEvent, PlaybackEvent},
    media::MediaElement,
    types::{PlaybackConfig, PlaybackState, SkipDirection},
};
use cadenza_core::{Track, TrackId};
use tracing::{debug, warn};

/// Last play/pause command sent to the element
#[derive(Debug, Clone, PartialEq)]
struct Commanded {
    track_id: TrackId,
    playing: bool,
}

/// Central playback control
///
/// Every change to `is_playing` or `current_track` ends in exactly one
/// play/pause command for the (possibly new) track, preceded by a load when
/// the track changed. Commands that would repeat the element's last commanded
/// state are suppressed.
pub struct PlaybackController {
    state: PlaybackState,

    // Ordered list used for next/previous and auto-advance
    track_list: Vec<Track>,

    media: Box<dyn MediaElement>,
    commanded: Option<Commanded>,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackController {
    /// Create a controller driving `media`
    pub fn new(mut media: Box<dyn MediaElement>, config: PlaybackConfig) -> Self {
        let volume = clamp_unit(config.volume);
        media.set_volume(volume);

        Self {
            state: PlaybackState::idle(volume),
            track_list: Vec::new(),
            media,
            commanded: None,
            pending_events: Vec::new(),
        }
    }

    // ===== Track List =====

    /// Replace the ordered list used for skipping
    ///
    /// The current track keeps playing even if it is not in the new list.
    pub fn set_track_list(&mut self, tracks: Vec<Track>) {
        self.track_list = tracks;
    }

    pub fn track_list(&self) -> &[Track] {
        &self.track_list
    }

    // ===== Transport =====

    /// Select a track
    ///
    /// Selecting the current track toggles play/pause in place. Any other
    /// track replaces the slot and starts from the beginning.
    pub fn select_track(&mut self, track: Track) {
        if self.is_current(&track.id) {
            self.set_playing(!self.state.is_playing);
        } else {
            self.switch_to(track);
        }
    }

    /// Flip play/pause without touching track or position
    pub fn toggle_play(&mut self) -> Result<()> {
        if self.state.current_track.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }
        self.set_playing(!self.state.is_playing);
        Ok(())
    }

    /// Move to the neighbouring track in the list, wrapping at both ends
    ///
    /// A current track that is not in the list counts as index -1, so `Next`
    /// lands on the first track and `Prev` on the last. Playback always
    /// starts on the target.
    pub fn skip(&mut self, direction: SkipDirection) -> Result<()> {
        let len = self.track_list.len();
        if len == 0 {
            return Err(PlaybackError::EmptyTrackList);
        }

        let index = self.state.current_track.as_ref().and_then(|current| {
            self.track_list
                .iter()
                .position(|track| track.id == current.id)
        });

        let target = match direction {
            SkipDirection::Next => index.map_or(0, |i| (i + 1) % len),
            SkipDirection::Prev => match index {
                Some(i) if i > 0 => i - 1,
                _ => len - 1,
            },
        };

        debug!(?direction, from = ?index, to = target, "Skipping");
        let track = self.track_list[target].clone();
        self.switch_to(track);
        Ok(())
    }

    /// Jump to a fraction of the reported duration
    ///
    /// `fraction` is clamped to 0.0 - 1.0. State updates immediately instead of
    /// waiting for the element's next progress notification.
    pub fn seek(&mut self, fraction: f64) -> Result<()> {
        if self.state.current_track.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }

        let position = clamp_unit(fraction) * self.state.duration;
        self.media.seek(position);
        self.state.current_time = position;
        self.emit_position_update();
        Ok(())
    }

    /// Set output level (clamped to 0.0 - 1.0)
    pub fn set_volume(&mut self, volume: f64) {
        let volume = clamp_unit(volume);
        self.state.volume = volume;
        self.media.set_volume(volume);
        self.pending_events.push(PlaybackEvent::VolumeChanged { volume });
    }

    /// Clear the now-playing slot
    pub fn stop(&mut self) {
        let had_track = self.state.current_track.is_some();
        self.state = PlaybackState::idle(self.state.volume);
        self.sync_media();
        if had_track {
            self.pending_events.push(PlaybackEvent::Stopped);
        }
    }

    // ===== Media Element Notifications =====

    /// Single entry point for media element events
    ///
    /// Progress and metadata are pure state updates. `Ended` advances to the
    /// next track, which is the only case where an event leads to commands.
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdated(time) => {
                if self.state.current_track.is_none() {
                    debug!(time, "Ignoring progress with no track loaded");
                    return;
                }
                self.state.current_time = sanitize_seconds(time);
                self.emit_position_update();
            }
            MediaEvent::MetadataLoaded(duration) => {
                if self.state.current_track.is_none() {
                    debug!(duration, "Ignoring metadata with no track loaded");
                    return;
                }
                self.state.duration = sanitize_seconds(duration);
                self.emit_position_update();
            }
            MediaEvent::Ended => {
                if self.state.current_track.is_none() {
                    return;
                }
                if let Err(e) = self.skip(SkipDirection::Next) {
                    // Nothing to advance to; the element has stopped by itself
                    warn!(error = %e, "Track ended with nothing to advance to");
                    self.set_playing(false);
                }
            }
        }
    }

    // ===== State =====

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.state.current_track.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events that have been emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    fn is_current(&self, track_id: &TrackId) -> bool {
        self.state
            .current_track
            .as_ref()
            .is_some_and(|current| &current.id == track_id)
    }

    fn set_playing(&mut self, playing: bool) {
        if self.state.is_playing == playing {
            return;
        }
        self.state.is_playing = playing;
        self.pending_events
            .push(PlaybackEvent::StateChanged { is_playing: playing });
        self.sync_media();
    }

    /// Replace the slot with `track` from position zero and start playing
    ///
    /// Always reloads, even when `track` is already current (skip over a
    /// one-track list restarts it).
    fn switch_to(&mut self, track: Track) {
        let previous_track_id = self.state.current_track.as_ref().map(|t| t.id.clone());
        let was_playing = self.state.is_playing;

        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id: track.id.clone(),
            previous_track_id,
        });

        self.state.current_track = Some(track);
        self.state.current_time = 0.0;
        self.state.duration = 0.0;
        self.state.is_playing = true;
        if !was_playing {
            self.pending_events
                .push(PlaybackEvent::StateChanged { is_playing: true });
        }

        self.commanded = None;
        self.sync_media();
    }

    /// Bring the element in line with `current_track` / `is_playing`
    fn sync_media(&mut self) {
        let Some(track) = self.state.current_track.as_ref() else {
            if self.commanded.take().is_some_and(|c| c.playing) {
                self.media.pause();
            }
            return;
        };

        let playing = self.state.is_playing;
        let same_track = match &self.commanded {
            Some(c) if c.track_id == track.id && c.playing == playing => return,
            Some(c) => c.track_id == track.id,
            None => false,
        };

        if !same_track {
            self.media.load(&track.audio_url);
        }
        if playing {
            self.media.play();
        } else {
            self.media.pause();
        }

        self.commanded = Some(Commanded {
            track_id: track.id.clone(),
            playing,
        });
    }

    fn emit_position_update(&mut self) {
        self.pending_events.push(PlaybackEvent::PositionUpdate {
            current_time: self.state.current_time,
            duration: self.state.duration,
        });
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

// Live streams report an infinite duration
fn sanitize_seconds(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
