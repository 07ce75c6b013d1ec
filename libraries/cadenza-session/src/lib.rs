//! Cadenza - Session Orchestration
//!
//! Ties the backend client and the playback controller together into the
//! state a Cadenza UI works against.
//!
//! - [`SessionController`]: login, registration, session restore, logout
//! - [`CatalogSync`]: track catalog, search results and playlist caches
//! - [`AppContext`]: owns both plus the now-playing slot, reloads data after
//!   authentication and pumps media events into playback
//!
//! # Example
//!
//! ```ignore
//! use cadenza_session::AppContext;
//! use std::sync::Arc;
//!
//! let context = Arc::new(AppContext::new(client, tokens, Box::new(element), config));
//! let (sender, receiver) = AppContext::media_channel();
//!
//! let pump = Arc::clone(&context);
//! tokio::spawn(async move { pump.run_media_events(receiver).await });
//! context.spawn_restore();
//!
//! context.login("alice", "secret").await?;
//! ```

mod catalog;
mod context;
mod error;
mod session;

pub use catalog::CatalogSync;
pub use context::{AppContext, MediaEventReceiver, MediaEventSender};
pub use error::{Result, SessionError};
pub use session::{SessionController, SessionStatus};
