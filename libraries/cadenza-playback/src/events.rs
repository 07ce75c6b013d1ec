//! Playback Events
//!
//! Two directions of event traffic:
//! - [`MediaEvent`]: notifications from the media element into the controller
//! - [`PlaybackEvent`]: state changes from the controller out to the UI

use cadenza_core::TrackId;
use serde::{Deserialize, Serialize};

/// Notifications emitted by the media element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MediaEvent {
    /// Playback position advanced (seconds)
    TimeUpdated(f64),

    /// Metadata for the current source is available (duration in seconds)
    MetadataLoaded(f64),

    /// The current source played to the end
    Ended,
}

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PlaybackEvent {
    /// Play/pause state changed
    StateChanged {
        /// Whether playback is now active
        is_playing: bool,
    },

    /// A different track now occupies the now-playing slot
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Position or duration changed
    PositionUpdate {
        /// Elapsed seconds
        current_time: f64,
        /// Total seconds (0 = unknown)
        duration: f64,
    },

    /// Volume changed
    VolumeChanged {
        /// New level (0.0 - 1.0)
        volume: f64,
    },

    /// Now-playing slot was cleared
    Stopped,
}
