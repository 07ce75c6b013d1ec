//! Core types for playback control

use cadenza_core::Track;
use serde::{Deserialize, Serialize};

/// The now-playing slot
///
/// Invariant: `current_track == None` implies `is_playing == false`.
/// `duration` stays 0 until the media element reports metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackState {
    /// Track in the slot, if any
    pub current_track: Option<Track>,

    /// Whether the element should be playing
    pub is_playing: bool,

    /// Elapsed seconds
    pub current_time: f64,

    /// Total seconds (0 = unknown)
    pub duration: f64,

    /// Output level, 0.0 - 1.0
    pub volume: f64,
}

impl PlaybackState {
    /// Empty slot at the given volume
    pub fn idle(volume: f64) -> Self {
        Self {
            current_track: None,
            is_playing: false,
            current_time: 0.0,
            duration: 0.0,
            volume,
        }
    }

    /// Elapsed fraction of the track, 0.0 while duration is unknown
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Skip direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipDirection {
    /// Following track, wrapping to the first
    Next,

    /// Preceding track, wrapping to the last
    Prev,
}

/// Configuration for the playback controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial volume (0.0 - 1.0, default: 1.0)
    pub volume: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { volume: 1.0 }
    }
}
