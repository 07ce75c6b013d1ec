//! Track catalog endpoints.

use crate::client::CadenzaClient;
use crate::error::Result;
use cadenza_core::{Track, TrackId};
use tracing::debug;

/// Catalog client for the Cadenza backend.
pub struct LibraryClient<'a> {
    client: &'a CadenzaClient,
}

impl<'a> LibraryClient<'a> {
    pub(crate) fn new(client: &'a CadenzaClient) -> Self {
        Self { client }
    }

    /// Full catalog in server order.
    pub async fn tracks(&self) -> Result<Vec<Track>> {
        let tracks: Vec<Track> = self.client.get("/api/tracks").await?;
        debug!(tracks = tracks.len(), "Fetched catalog");
        Ok(tracks)
    }

    /// A single track by id.
    pub async fn track(&self, track_id: &TrackId) -> Result<Track> {
        let endpoint = format!("/api/tracks/{}", urlencoding::encode(track_id.as_str()));
        self.client.get(&endpoint).await
    }

    /// Search title, artist, album and genre.
    ///
    /// The query travels as a single path segment, so it is percent-encoded.
    pub async fn search(&self, query: &str) -> Result<Vec<Track>> {
        let endpoint = format!("/api/tracks/search/{}", urlencoding::encode(query));
        debug!(query = %query, "Searching tracks");

        let tracks: Vec<Track> = self.client.get(&endpoint).await?;
        debug!(results = tracks.len(), "Search complete");
        Ok(tracks)
    }
}
