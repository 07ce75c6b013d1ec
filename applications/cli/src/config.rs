/// Client configuration
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_CONFIG_FILE: &str = "cadenza.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Key/value file holding the session credential
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_volume")]
    pub volume: f64,
}

impl ClientConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `cadenza.toml` in the working
    /// directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with CADENZA_)
        settings = settings.add_source(
            config::Environment::with_prefix("CADENZA")
                .separator("_")
                .try_parsing(true),
        );

        Ok(settings.build()?.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "server URL is required (set CADENZA_SERVER_URL)".to_string(),
            ));
        }

        if self.server.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "server timeout must be at least one second".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.playback.volume) {
            return Err(ConfigError::Invalid(format!(
                "playback volume {} is outside 0.0 - 1.0",
                self.playback.volume
            )));
        }

        Ok(())
    }

    pub fn server_config(&self) -> cadenza_server_client::ServerConfig {
        cadenza_server_client::ServerConfig::new(self.server.url.clone())
            .with_timeout(Duration::from_secs(self.server.timeout_secs))
    }

    pub fn playback_config(&self) -> cadenza_playback::PlaybackConfig {
        cadenza_playback::PlaybackConfig {
            volume: self.playback.volume,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            playback: default_playback(),
        }
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        url: default_url(),
        timeout_secs: default_timeout_secs(),
    }
}

fn default_url() -> String {
    "http://localhost:8001".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        token_file: default_token_file(),
    }
}

fn default_token_file() -> PathBuf {
    PathBuf::from("./data/session.json")
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        volume: default_volume(),
    }
}

fn default_volume() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = ClientConfig::default();
        assert_eq!(config.server.url, "http://localhost:8001");
        assert_eq!(config.server.timeout_secs, 30);
        assert_eq!(config.storage.token_file, PathBuf::from("./data/session.json"));
        assert_eq!(config.playback.volume, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nurl = \"https://music.example.com\"\n\n[playback]\nvolume = 0.4"
        )
        .unwrap();

        let config = ClientConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.server.url, "https://music.example.com");
        assert_eq!(config.playback.volume, 0.4);
        // Untouched sections fall back to defaults
        assert_eq!(config.server.timeout_secs, 30);
        assert_eq!(config.storage.token_file, PathBuf::from("./data/session.json"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(ClientConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = ClientConfig::default();
        config.server.url = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.playback.volume = 1.5;
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.server.timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
