//! Playlist endpoints.

use crate::client::CadenzaClient;
use crate::error::Result;
use crate::types::{Ack, CreatePlaylistRequest, PlaylistMutation, UpdatePlaylistRequest};
use cadenza_core::{Playlist, PlaylistDetails, PlaylistId};
use reqwest::Method;
use tracing::debug;

/// Playlist client for the Cadenza backend.
pub struct PlaylistClient<'a> {
    client: &'a CadenzaClient,
}

impl<'a> PlaylistClient<'a> {
    pub(crate) fn new(client: &'a CadenzaClient) -> Self {
        Self { client }
    }

    fn endpoint(playlist_id: &PlaylistId) -> String {
        format!("/api/playlists/{}", urlencoding::encode(playlist_id.as_str()))
    }

    /// Playlists owned by the signed-in user.
    pub async fn list(&self) -> Result<Vec<Playlist>> {
        let playlists: Vec<Playlist> = self.client.get("/api/playlists").await?;
        debug!(playlists = playlists.len(), "Fetched playlists");
        Ok(playlists)
    }

    /// One playlist with its tracks resolved.
    pub async fn get(&self, playlist_id: &PlaylistId) -> Result<PlaylistDetails> {
        self.client.get(&Self::endpoint(playlist_id)).await
    }

    pub async fn create(&self, request: &CreatePlaylistRequest) -> Result<PlaylistMutation> {
        debug!(name = %request.name, "Creating playlist");
        self.client
            .call("/api/playlists", Method::POST, Some(request))
            .await
    }

    /// Update a playlist. Sending `track_ids` replaces the whole sequence.
    pub async fn update(
        &self,
        playlist_id: &PlaylistId,
        request: &UpdatePlaylistRequest,
    ) -> Result<PlaylistMutation> {
        debug!(playlist_id = %playlist_id, "Updating playlist");
        self.client
            .call(&Self::endpoint(playlist_id), Method::PUT, Some(request))
            .await
    }

    pub async fn delete(&self, playlist_id: &PlaylistId) -> Result<Ack> {
        debug!(playlist_id = %playlist_id, "Deleting playlist");
        self.client
            .call(&Self::endpoint(playlist_id), Method::DELETE, None::<&()>)
            .await
    }
}
