//! Application context
//!
//! One value owning everything a UI needs: the session, the catalog caches and
//! the now-playing slot. Each user action applies its state change under the
//! owning component's lock.

use crate::catalog::CatalogSync;
use crate::error::Result;
use crate::session::{SessionController, SessionStatus};
use cadenza_core::{Playlist, PlaylistDetails, PlaylistId, Track, TrackId, User};
use cadenza_playback::{
    MediaElement, MediaEvent, PlaybackConfig, PlaybackController, PlaybackEvent, PlaybackState,
    SkipDirection,
};
use cadenza_server_client::{CadenzaClient, TokenStore};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Sending half of the media event channel, held by the media element side
pub type MediaEventSender = mpsc::UnboundedSender<MediaEvent>;

/// Receiving half of the media event channel, consumed by
/// [`AppContext::run_media_events`]
pub type MediaEventReceiver = mpsc::UnboundedReceiver<MediaEvent>;

/// Everything a Cadenza UI drives
pub struct AppContext {
    session: SessionController,
    catalog: CatalogSync,
    playback: Mutex<PlaybackController>,
}

impl AppContext {
    /// `tokens` must be the same store `client` reads credentials from.
    pub fn new(
        client: CadenzaClient,
        tokens: Arc<dyn TokenStore>,
        media: Box<dyn MediaElement>,
        config: PlaybackConfig,
    ) -> Self {
        Self {
            session: SessionController::new(client.clone(), tokens),
            catalog: CatalogSync::new(client),
            playback: Mutex::new(PlaybackController::new(media, config)),
        }
    }

    pub fn session(&self) -> &SessionController {
        &self.session
    }

    pub fn catalog(&self) -> &CatalogSync {
        &self.catalog
    }

    // ===== Session =====

    /// Sign in, then load the catalog and playlists
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        let user = self.session.login(username, password).await?;
        self.reload().await;
        Ok(user)
    }

    /// Create an account, then load the catalog and playlists
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<User> {
        let user = self.session.register(username, email, password).await?;
        self.reload().await;
        Ok(user)
    }

    /// Resume a stored session; loads data only when the backend accepts it
    pub async fn restore_session(&self) -> Result<Option<User>> {
        let user = self.session.restore_session().await?;
        if user.is_some() {
            self.reload().await;
        }
        Ok(user)
    }

    /// Run [`AppContext::restore_session`] in the background
    ///
    /// The UI stays responsive and observes the outcome through
    /// [`SessionController::status`].
    pub fn spawn_restore(self: &Arc<Self>) -> JoinHandle<()> {
        let context = Arc::clone(self);
        tokio::spawn(async move {
            match context.restore_session().await {
                Ok(Some(user)) => debug!(username = %user.username, "Background restore finished"),
                Ok(None) => debug!("Background restore found no usable session"),
                Err(e) => warn!(error = %e, "Background restore skipped"),
            }
        })
    }

    /// Sign out: stop playback, drop playlists, forget the user
    ///
    /// The track catalog and search results stay cached.
    pub async fn logout(&self) {
        self.playback.lock().await.stop();
        self.catalog.clear_playlists().await;
        self.session.logout().await;
    }

    pub async fn status(&self) -> SessionStatus {
        self.session.status().await
    }

    pub async fn user(&self) -> Option<User> {
        self.session.user().await
    }

    // ===== Catalog =====

    /// Refresh the catalog and hand the result to playback as the skip order
    pub async fn load_tracks(&self) -> bool {
        let refreshed = self.catalog.load_tracks().await;
        let tracks = self.catalog.tracks().await;
        self.playback.lock().await.set_track_list(tracks);
        refreshed
    }

    pub async fn load_playlists(&self) -> bool {
        self.catalog.load_playlists().await
    }

    pub async fn tracks(&self) -> Vec<Track> {
        self.catalog.tracks().await
    }

    pub async fn playlists(&self) -> Vec<Playlist> {
        self.catalog.playlists().await
    }

    pub async fn search(&self, query: &str) -> Vec<Track> {
        self.catalog.search(query).await
    }

    pub async fn create_playlist(&self, name: &str) -> Result<bool> {
        self.catalog.create_playlist(name).await
    }

    pub async fn add_track_to_playlist(
        &self,
        playlist_id: &PlaylistId,
        track_id: &TrackId,
    ) -> Result<()> {
        self.catalog.add_track_to_playlist(playlist_id, track_id).await
    }

    pub async fn delete_playlist(&self, playlist_id: &PlaylistId) -> Result<()> {
        self.catalog.delete_playlist(playlist_id).await
    }

    pub async fn playlist_details(&self, playlist_id: &PlaylistId) -> Result<PlaylistDetails> {
        self.catalog.playlist_details(playlist_id).await
    }

    // ===== Playback =====

    pub async fn select_track(&self, track: Track) {
        self.playback.lock().await.select_track(track);
    }

    /// Select a track by id from the catalog or the current search results
    ///
    /// Returns `false` when the id is in neither.
    pub async fn select_track_by_id(&self, track_id: &TrackId) -> bool {
        match self.catalog.cached_track(track_id).await {
            Some(track) => {
                self.select_track(track).await;
                true
            }
            None => false,
        }
    }

    pub async fn toggle_play(&self) -> Result<()> {
        Ok(self.playback.lock().await.toggle_play()?)
    }

    pub async fn skip(&self, direction: SkipDirection) -> Result<()> {
        Ok(self.playback.lock().await.skip(direction)?)
    }

    pub async fn seek(&self, fraction: f64) -> Result<()> {
        Ok(self.playback.lock().await.seek(fraction)?)
    }

    pub async fn set_volume(&self, volume: f64) {
        self.playback.lock().await.set_volume(volume);
    }

    /// Snapshot of the now-playing slot
    pub async fn playback_state(&self) -> PlaybackState {
        self.playback.lock().await.state().clone()
    }

    pub async fn drain_playback_events(&self) -> Vec<PlaybackEvent> {
        self.playback.lock().await.drain_events()
    }

    // ===== Media Events =====

    /// Create the typed channel the media element reports through
    pub fn media_channel() -> (MediaEventSender, MediaEventReceiver) {
        mpsc::unbounded_channel()
    }

    pub async fn handle_media_event(&self, event: MediaEvent) {
        self.playback.lock().await.handle_media_event(event);
    }

    /// Feed media events into playback until every sender is dropped
    pub async fn run_media_events(&self, mut events: MediaEventReceiver) {
        while let Some(event) = events.recv().await {
            self.handle_media_event(event).await;
        }
        info!("Media event channel closed");
    }

    // ===== Internal =====

    async fn reload(&self) {
        self.load_tracks().await;
        self.load_playlists().await;
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("session", &self.session)
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}
