//! Types for Cadenza API requests and responses.

use cadenza_core::{Credential, Playlist, PlaylistId, TrackId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for connecting to a Cadenza backend.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base URL of the backend (e.g., "http://localhost:8001")
    pub url: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
}

impl ServerConfig {
    /// Create a config with default timeouts.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// =============================================================================
// Authentication Types
// =============================================================================

/// Request body for the login endpoint.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for the registration endpoint.
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Response from a successful login or registration.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub username: String,
}

impl AuthResponse {
    /// The issued bearer credential.
    pub fn credential(&self) -> Credential {
        Credential::new(self.access_token.clone())
    }
}

// =============================================================================
// Playlist Types
// =============================================================================

/// Request body for playlist creation.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub track_ids: Vec<TrackId>,
}

impl CreatePlaylistRequest {
    /// New empty playlist with no description.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            track_ids: Vec::new(),
        }
    }
}

/// Request body for playlist updates. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdatePlaylistRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_ids: Option<Vec<TrackId>>,
}

impl UpdatePlaylistRequest {
    /// Replace the whole track list and nothing else.
    pub fn track_ids(track_ids: Vec<TrackId>) -> Self {
        Self {
            track_ids: Some(track_ids),
            ..Default::default()
        }
    }
}

/// Acknowledgement body returned by mutation endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Ack {
    pub message: String,
    #[serde(default)]
    pub playlist_id: Option<PlaylistId>,
}

/// Result of a playlist create/update.
///
/// Backends either echo the stored playlist or acknowledge with a message
/// (and, for creation, the generated id).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PlaylistMutation {
    Playlist(Playlist),
    Ack(Ack),
}

impl PlaylistMutation {
    /// Id of the affected playlist, when the backend reported one.
    pub fn playlist_id(&self) -> Option<&PlaylistId> {
        match self {
            PlaylistMutation::Playlist(playlist) => Some(&playlist.id),
            PlaylistMutation::Ack(ack) => ack.playlist_id.as_ref(),
        }
    }
}

// =============================================================================
// Health
// =============================================================================

/// Backend health probe response.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
