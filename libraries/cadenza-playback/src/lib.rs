//! Cadenza - Playback Control
//!
//! The single "now playing" slot of a Cadenza session and its synchronization
//! with one streaming media element.
//!
//! This crate provides:
//! - Track selection with in-place pause/resume for the current track
//! - Next/previous skipping with wraparound over an ordered track list
//! - Seek by fraction of the reported duration
//! - Volume control (0.0 - 1.0)
//! - Auto-advance when the media element reports the end of a track
//! - Outbound events for UI synchronization
//!
//! # Architecture
//!
//! `cadenza-playback` does no I/O of its own. The platform supplies a
//! [`MediaElement`] (a browser `<audio>` element, a native player, a test
//! double) and forwards the element's notifications as [`MediaEvent`]s to
//! [`PlaybackController::handle_media_event`]. Only the controller commands the
//! element; media events only update state.
//!
//! # Example
//!
//! ```rust
//! use cadenza_core::Track;
//! use cadenza_playback::{MediaElement, MediaEvent, PlaybackConfig, PlaybackController, SkipDirection};
//!
//! struct Silent;
//!
//! impl MediaElement for Silent {
//!     fn load(&mut self, _url: &str) {}
//!     fn play(&mut self) {}
//!     fn pause(&mut self) {}
//!     fn seek(&mut self, _position_secs: f64) {}
//!     fn set_volume(&mut self, _volume: f64) {}
//! }
//!
//! let tracks = vec![
//!     Track::new("1", "Chill Vibes", "Lofi Master", "https://cdn.example.com/1.wav"),
//!     Track::new("2", "Summer Breeze", "Acoustic Dreams", "https://cdn.example.com/2.wav"),
//! ];
//!
//! let mut controller = PlaybackController::new(Box::new(Silent), PlaybackConfig::default());
//! controller.set_track_list(tracks.clone());
//!
//! controller.select_track(tracks[0].clone());
//! controller.handle_media_event(MediaEvent::MetadataLoaded(200.0));
//! controller.seek(0.5).unwrap();
//! assert_eq!(controller.state().current_time, 100.0);
//!
//! controller.skip(SkipDirection::Next).unwrap();
//! assert_eq!(controller.state().current_track.as_ref().unwrap().id, tracks[1].id);
//! ```

mod controller;
mod display;
mod error;
mod events;
mod media;
pub mod types;

// Public exports
pub use controller::PlaybackController;
pub use display::format_time;
pub use error::{PlaybackError, Result};
pub use events::{MediaEvent, PlaybackEvent};
pub use media::MediaElement;
pub use types::{PlaybackConfig, PlaybackState, SkipDirection};
