//! Cadenza Server Client
//!
//! HTTP client library for the Cadenza backend API.
//!
//! # Features
//!
//! - **Authentication**: login, registration, identity check
//! - **Catalog**: list tracks, fetch a track, search
//! - **Playlists**: list, fetch with tracks, create, replace track list, delete
//! - **Credential storage**: in-memory and file-backed token stores
//!
//! The client reads the bearer credential from a [`TokenStore`] on every call
//! but never writes to it; storing and clearing credentials is the caller's job.
//!
//! # Example
//!
//! ```ignore
//! use cadenza_server_client::{CadenzaClient, MemoryTokenStore, ServerConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tokens = Arc::new(MemoryTokenStore::new());
//!     let client = CadenzaClient::new(ServerConfig::new("http://localhost:8001"), tokens.clone())?;
//!
//!     let auth = client.auth().login("alice", "secret").await?;
//!     tokens.set(&auth.credential())?;
//!
//!     let tracks = client.library().tracks().await?;
//!     println!("Found {} tracks", tracks.len());
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod error;
mod library;
mod playlists;
mod token_store;
mod types;

// Re-export main types
pub use client::CadenzaClient;
pub use error::{Result, ServerClientError};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore, TOKEN_STORAGE_KEY};
pub use types::{
    Ack, AuthResponse, CreatePlaylistRequest, HealthStatus, LoginRequest, PlaylistMutation,
    RegisterRequest, ServerConfig, UpdatePlaylistRequest,
};

// Re-export sub-clients for direct use if needed
pub use auth::AuthClient;
pub use library::LibraryClient;
pub use playlists::PlaylistClient;

pub use reqwest::Method;
