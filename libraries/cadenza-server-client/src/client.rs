//! Main Cadenza backend client.

use crate::auth::AuthClient;
use crate::error::{Result, ServerClientError};
use crate::library::LibraryClient;
use crate::playlists::PlaylistClient;
use crate::token_store::TokenStore;
use crate::types::{HealthStatus, ServerConfig};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Client for the Cadenza backend.
///
/// Every request goes through [`CadenzaClient::call`], which attaches the
/// stored bearer credential (when there is one), sends JSON, and turns any
/// non-success status into [`ServerClientError::Api`]. Requests are attempted
/// exactly once.
///
/// # Example
///
/// ```ignore
/// use cadenza_server_client::{CadenzaClient, MemoryTokenStore, ServerConfig};
/// use std::sync::Arc;
///
/// let client = CadenzaClient::new(
///     ServerConfig::new("http://localhost:8001"),
///     Arc::new(MemoryTokenStore::new()),
/// )?;
///
/// let tracks = client.library().tracks().await?;
/// println!("Found {} tracks", tracks.len());
/// ```
#[derive(Clone)]
pub struct CadenzaClient {
    http: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl CadenzaClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerConfig, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        // Validate URL
        if config.url.trim().is_empty() {
            return Err(ServerClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let base_url = config.url.trim().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ServerClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&base_url)
            .map_err(|e| ServerClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("Cadenza/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            tokens,
        })
    }

    /// Normalized backend URL.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Whether a credential is currently available for requests.
    pub fn has_credential(&self) -> bool {
        self.tokens.get().is_some()
    }

    /// Issue one request against `endpoint` (a path such as `/api/tracks`).
    ///
    /// `body`, when present, is sent as JSON. The response body is decoded into
    /// `T`; a body that does not match yields [`ServerClientError::Decode`].
    pub async fn call<T, B>(&self, endpoint: &str, method: Method, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(method = %method, url = %url, "Sending request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(credential) = self.tokens.get() {
            request = request.bearer_auth(credential.as_str());
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(method = %method, url = %url, error = %e, "Request did not complete");
            ServerClientError::Network(e)
        })?;

        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await?;
            serde_json::from_slice(&bytes).map_err(|source| ServerClientError::Decode {
                endpoint: endpoint.to_string(),
                source,
            })
        } else {
            let error_text = response.text().await.unwrap_or_default();
            debug!(
                method = %method,
                url = %url,
                status = status.as_u16(),
                "Request rejected"
            );
            Err(ServerClientError::Api {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    /// `GET` shorthand for [`CadenzaClient::call`].
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.call(endpoint, Method::GET, None::<&()>).await
    }

    /// Probe the backend health endpoint. Needs no credential.
    pub async fn health(&self) -> Result<HealthStatus> {
        self.get("/api/health").await
    }

    /// Authentication endpoints.
    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(self)
    }

    /// Track catalog endpoints.
    pub fn library(&self) -> LibraryClient<'_> {
        LibraryClient::new(self)
    }

    /// Playlist endpoints.
    pub fn playlists(&self) -> PlaylistClient<'_> {
        PlaylistClient::new(self)
    }
}

impl std::fmt::Debug for CadenzaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CadenzaClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
