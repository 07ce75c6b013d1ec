/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};

/// Streamable track from the backend catalog
///
/// `audio_url` is mandatory: a catalog entry without a stream cannot be played,
/// so it is rejected at decode time instead of surfacing later as a failed load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Cover image URL
    #[serde(default)]
    pub image: Option<String>,

    /// Stream URL handed to the media element
    pub audio_url: String,

    /// Album name
    #[serde(default)]
    pub album: Option<String>,

    /// Catalog duration in seconds
    #[serde(default)]
    pub duration: Option<u32>,

    /// Genre
    #[serde(default)]
    pub genre: Option<String>,
}

impl Track {
    /// Create a track with the fields required for playback
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        audio_url: impl Into<String>,
    ) -> Self {
        Self {
            id: TrackId::new(id),
            title: title.into(),
            artist: artist.into(),
            image: None,
            audio_url: audio_url.into(),
            album: None,
            duration: None,
            genre: None,
        }
    }
}
