/// Playlist domain types
use crate::types::{PlaylistId, Track, TrackId};
use serde::{Deserialize, Serialize};

/// Playlist as cached by the client
///
/// `track_ids` is ordered and may contain the same track more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Ordered track references
    #[serde(default)]
    pub track_ids: Vec<TrackId>,
}

impl Playlist {
    /// Create an empty playlist
    pub fn new(id: PlaylistId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            track_ids: Vec::new(),
        }
    }

    /// Builder-style track list
    pub fn with_tracks(mut self, track_ids: Vec<TrackId>) -> Self {
        self.track_ids = track_ids;
        self
    }

    /// Track ids after appending `track_id`, leaving `self` untouched
    pub fn appended(&self, track_id: TrackId) -> Vec<TrackId> {
        let mut ids = self.track_ids.clone();
        ids.push(track_id);
        ids
    }
}

/// Playlist with its tracks resolved by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistDetails {
    /// The playlist itself
    #[serde(flatten)]
    pub playlist: Playlist,

    /// Tracks in playlist order (ids the backend could not resolve are absent)
    #[serde(default)]
    pub tracks: Vec<Track>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appended_allows_duplicates() {
        let playlist = Playlist::new(PlaylistId::new("p"), "Mix")
            .with_tracks(vec![TrackId::new("1"), TrackId::new("2")]);

        let ids = playlist.appended(TrackId::new("2"));

        assert_eq!(
            ids,
            vec![TrackId::new("1"), TrackId::new("2"), TrackId::new("2")]
        );
        assert_eq!(playlist.track_ids.len(), 2);
    }

    #[test]
    fn decodes_details_with_extra_fields() {
        let details: PlaylistDetails = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "name": "Focus",
            "description": "",
            "track_ids": ["1"],
            "username": "alice",
            "created_at": "2024-01-01T00:00:00",
            "tracks": [{
                "id": "1",
                "title": "Chill Vibes",
                "artist": "Lofi Master",
                "audio_url": "https://cdn.example.com/1.wav"
            }]
        }))
        .unwrap();

        assert_eq!(details.playlist.name, "Focus");
        assert_eq!(details.tracks.len(), 1);
    }
}
