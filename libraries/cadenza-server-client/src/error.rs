//! Error types for the Cadenza server client.

use thiserror::Error;

/// Errors that can occur when talking to the Cadenza backend.
#[derive(Error, Debug)]
pub enum ServerClientError {
    /// The request could not complete (connection refused, timeout, TLS, ...)
    #[error("Network failure: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected schema
    #[error("Failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Credential storage could not be read or written
    #[error("Token storage error: {0}")]
    Storage(String),
}

impl ServerClientError {
    /// HTTP status for `Api` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ServerClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the server rejected the credential.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

/// Result type for server client operations.
pub type Result<T> = std::result::Result<T, ServerClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_detection() {
        let err = ServerClientError::Api {
            status: 401,
            message: "Could not validate credentials".into(),
        };
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(401));

        let err = ServerClientError::Api {
            status: 500,
            message: String::new(),
        };
        assert!(!err.is_unauthorized());

        assert_eq!(ServerClientError::Storage("disk full".into()).status(), None);
    }
}
