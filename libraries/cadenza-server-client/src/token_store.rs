//! Bearer credential persistence.
//!
//! The token store is the only component that touches persisted credential
//! storage. Values are opaque; nothing here validates them.

use crate::error::{Result, ServerClientError};
use cadenza_core::Credential;
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Fixed key under which the credential is persisted.
pub const TOKEN_STORAGE_KEY: &str = "authToken";

/// Persists, retrieves and clears the session credential.
pub trait TokenStore: Send + Sync {
    /// Current credential, if any.
    fn get(&self) -> Option<Credential>;

    /// Store a credential, replacing any previous one.
    fn set(&self, credential: &Credential) -> Result<()>;

    /// Forget the credential.
    fn clear(&self) -> Result<()>;
}

/// Process-lifetime credential storage.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<Credential>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a credential.
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            token: RwLock::new(Some(credential)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<Credential> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    fn set(&self, credential: &Credential) -> Result<()> {
        let mut token = self
            .token
            .write()
            .map_err(|_| ServerClientError::Storage("token lock poisoned".into()))?;
        *token = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut token = self
            .token
            .write()
            .map_err(|_| ServerClientError::Storage("token lock poisoned".into()))?;
        *token = None;
        Ok(())
    }
}

/// Credential storage backed by a JSON key/value file.
///
/// Behaves like browser local storage for a single origin: the file holds a
/// string map and the credential lives under [`TOKEN_STORAGE_KEY`]. Other keys
/// in the file are preserved. The file is re-read on every `get`, so a new
/// process sees what a previous one stored.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                ServerClientError::Storage(format!(
                    "Corrupt token file {}: {}",
                    self.path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(ServerClientError::Storage(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    /// Replace the file atomically
    ///
    /// Entries go to a temporary file in the same directory (owner-only
    /// permissions on unix), which is then renamed over the store.
    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| {
            ServerClientError::Storage(format!("Failed to create {}: {}", dir.display(), e))
        })?;

        let contents = serde_json::to_string_pretty(entries)
            .map_err(|e| ServerClientError::Storage(e.to_string()))?;

        let write_failed = |e: std::io::Error| {
            ServerClientError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        };

        let mut staged = NamedTempFile::new_in(dir).map_err(write_failed)?;
        staged.write_all(contents.as_bytes()).map_err(write_failed)?;
        staged.as_file().sync_all().map_err(write_failed)?;
        staged
            .persist(&self.path)
            .map_err(|e| write_failed(e.error))?;

        debug!(path = %self.path.display(), "Token file written");
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<Credential> {
        match self.read_entries() {
            Ok(mut entries) => entries.remove(TOKEN_STORAGE_KEY).map(Credential::new),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable token file");
                None
            }
        }
    }

    fn set(&self, credential: &Credential) -> Result<()> {
        // A corrupt file is replaced rather than blocking sign-in.
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(TOKEN_STORAGE_KEY.to_string(), credential.as_str().to_string());
        self.write_entries(&entries)?;
        debug!(path = %self.path.display(), "Stored credential");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut entries = self.read_entries().unwrap_or_default();
        if entries.remove(TOKEN_STORAGE_KEY).is_none() && !self.path.exists() {
            return Ok(());
        }
        self.write_entries(&entries)?;
        debug!(path = %self.path.display(), "Cleared credential");
        Ok(())
    }
}
