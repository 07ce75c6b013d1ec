//! Track catalog, search results and playlist caches
//!
//! Every cache is replaced wholesale by a successful fetch. A failed fetch is
//! logged and leaves the previous contents in place.

use crate::error::{Result, SessionError};
use cadenza_core::{Playlist, PlaylistDetails, PlaylistId, Track, TrackId};
use cadenza_server_client::{CadenzaClient, CreatePlaylistRequest, UpdatePlaylistRequest};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct SearchState {
    query: String,
    results: Vec<Track>,
}

/// Client-side view of the backend catalog and the user's playlists
pub struct CatalogSync {
    client: CadenzaClient,
    tracks: RwLock<Vec<Track>>,
    playlists: RwLock<Vec<Playlist>>,
    search: RwLock<SearchState>,
}

impl CatalogSync {
    pub fn new(client: CadenzaClient) -> Self {
        Self {
            client,
            tracks: RwLock::new(Vec::new()),
            playlists: RwLock::new(Vec::new()),
            search: RwLock::new(SearchState::default()),
        }
    }

    // ===== Cache Reads =====

    pub async fn tracks(&self) -> Vec<Track> {
        self.tracks.read().await.clone()
    }

    pub async fn playlists(&self) -> Vec<Playlist> {
        self.playlists.read().await.clone()
    }

    pub async fn playlist(&self, playlist_id: &PlaylistId) -> Option<Playlist> {
        self.playlists
            .read()
            .await
            .iter()
            .find(|p| &p.id == playlist_id)
            .cloned()
    }

    pub async fn search_results(&self) -> Vec<Track> {
        self.search.read().await.results.clone()
    }

    /// Query of the most recent search
    pub async fn last_query(&self) -> String {
        self.search.read().await.query.clone()
    }

    /// Look a track up in the catalog, then in the search results
    pub async fn cached_track(&self, track_id: &TrackId) -> Option<Track> {
        let found = self
            .tracks
            .read()
            .await
            .iter()
            .find(|t| &t.id == track_id)
            .cloned();
        match found {
            Some(track) => Some(track),
            None => self
                .search
                .read()
                .await
                .results
                .iter()
                .find(|t| &t.id == track_id)
                .cloned(),
        }
    }

    // ===== Refresh =====

    /// Refresh the track catalog. Returns whether the cache was replaced.
    pub async fn load_tracks(&self) -> bool {
        match self.client.library().tracks().await {
            Ok(tracks) => {
                debug!(tracks = tracks.len(), "Track catalog refreshed");
                *self.tracks.write().await = tracks;
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to load tracks; keeping previous catalog");
                false
            }
        }
    }

    /// Refresh the playlist cache. Returns whether the cache was replaced.
    pub async fn load_playlists(&self) -> bool {
        match self.client.playlists().list().await {
            Ok(playlists) => {
                debug!(playlists = playlists.len(), "Playlists refreshed");
                *self.playlists.write().await = playlists;
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to load playlists; keeping previous list");
                false
            }
        }
    }

    /// Search the catalog
    ///
    /// A blank query clears the results without contacting the backend. On
    /// failure the previous results stay.
    pub async fn search(&self, query: &str) -> Vec<Track> {
        if query.trim().is_empty() {
            let mut search = self.search.write().await;
            search.query = query.to_string();
            search.results.clear();
            return Vec::new();
        }

        self.search.write().await.query = query.to_string();

        match self.client.library().search(query).await {
            Ok(results) => {
                debug!(query = %query, results = results.len(), "Search completed");
                self.search.write().await.results = results.clone();
                results
            }
            Err(e) => {
                warn!(query = %query, error = %e, "Search failed; keeping previous results");
                self.search_results().await
            }
        }
    }

    // ===== Playlist Mutations =====

    /// Create an empty playlist
    ///
    /// Returns `Ok(false)` for a blank name without contacting the backend.
    /// Playlists are reloaded after the request whether or not it succeeded.
    pub async fn create_playlist(&self, name: &str) -> Result<bool> {
        if name.trim().is_empty() {
            debug!("Ignoring playlist with blank name");
            return Ok(false);
        }

        let outcome = self
            .client
            .playlists()
            .create(&CreatePlaylistRequest::named(name))
            .await;
        self.load_playlists().await;

        let created = outcome?;
        info!(name = %name, playlist_id = ?created.playlist_id(), "Playlist created");
        Ok(true)
    }

    /// Append a track to a cached playlist
    ///
    /// Sends the whole track sequence computed from the local copy, so an edit
    /// made elsewhere since the last reload is overwritten. Duplicates are
    /// kept.
    pub async fn add_track_to_playlist(
        &self,
        playlist_id: &PlaylistId,
        track_id: &TrackId,
    ) -> Result<()> {
        let playlist = self
            .playlist(playlist_id)
            .await
            .ok_or_else(|| SessionError::PlaylistNotFound(playlist_id.clone()))?;

        let request = UpdatePlaylistRequest::track_ids(playlist.appended(track_id.clone()));
        self.client
            .playlists()
            .update(playlist_id, &request)
            .await?;

        info!(playlist_id = %playlist_id, track_id = %track_id, "Track added to playlist");
        self.load_playlists().await;
        Ok(())
    }

    pub async fn delete_playlist(&self, playlist_id: &PlaylistId) -> Result<()> {
        self.client.playlists().delete(playlist_id).await?;

        info!(playlist_id = %playlist_id, "Playlist deleted");
        self.load_playlists().await;
        Ok(())
    }

    /// Fetch one playlist with its tracks resolved. Not cached.
    pub async fn playlist_details(&self, playlist_id: &PlaylistId) -> Result<PlaylistDetails> {
        Ok(self.client.playlists().get(playlist_id).await?)
    }

    /// Fetch a single track. Not cached.
    pub async fn track(&self, track_id: &TrackId) -> Result<Track> {
        Ok(self.client.library().track(track_id).await?)
    }

    /// Drop the playlist cache (on logout)
    pub async fn clear_playlists(&self) {
        self.playlists.write().await.clear();
    }
}

impl std::fmt::Debug for CatalogSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogSync")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}
