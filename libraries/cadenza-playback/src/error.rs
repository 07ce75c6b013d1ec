//! Error types for playback control

use thiserror::Error;

/// Playback errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Skip requested with nothing to skip to
    #[error("Track list is empty")]
    EmptyTrackList,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
