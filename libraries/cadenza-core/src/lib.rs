//! Cadenza Core
//!
//! Domain types shared by every Cadenza crate.
//!
//! The core crate defines:
//! - **Catalog types**: `Track`, `Playlist`, `PlaylistDetails`
//! - **Identity types**: `User`, `Credential`
//! - **Identifiers**: `TrackId`, `PlaylistId`
//!
//! All types deserialize from the backend's JSON shapes and are never mutated
//! locally once received.
//!
//! # Example
//!
//! ```rust
//! use cadenza_core::{Playlist, PlaylistId, TrackId};
//!
//! let playlist = Playlist::new(PlaylistId::new("p1"), "Road trip")
//!     .with_tracks(vec![TrackId::new("1"), TrackId::new("2")]);
//!
//! assert_eq!(playlist.track_ids.len(), 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod types;

pub use types::{Credential, Playlist, PlaylistDetails, PlaylistId, Track, TrackId, User};
