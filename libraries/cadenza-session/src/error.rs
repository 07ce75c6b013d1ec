//! Error types for session orchestration

use cadenza_core::PlaylistId;
use cadenza_playback::PlaybackError;
use cadenza_server_client::ServerClientError;
use thiserror::Error;

/// Errors surfaced to the UI by session-level operations
#[derive(Error, Debug)]
pub enum SessionError {
    /// Login or registration was rejected. The message is deliberately
    /// generic; backend detail only goes to the log.
    #[error("{0}")]
    AuthFailed(String),

    #[error("An authentication attempt is already in progress")]
    AuthInProgress,

    /// Logout happened while the attempt was in flight; its result was dropped
    #[error("Authentication cancelled by logout")]
    AuthCancelled,

    #[error("Playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),

    #[error(transparent)]
    Client(#[from] ServerClientError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
