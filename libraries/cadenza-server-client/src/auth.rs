//! Authentication endpoints.

use crate::client::CadenzaClient;
use crate::error::Result;
use crate::types::{AuthResponse, LoginRequest, RegisterRequest};
use cadenza_core::User;
use reqwest::Method;
use tracing::{debug, info};

/// Authentication client for the Cadenza backend.
pub struct AuthClient<'a> {
    client: &'a CadenzaClient,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(client: &'a CadenzaClient) -> Self {
        Self { client }
    }

    /// Exchange username and password for a credential.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        debug!(username = %username, "Attempting login");

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response: AuthResponse = self
            .client
            .call("/api/auth/login", Method::POST, Some(&request))
            .await?;

        info!(username = %response.username, "Login accepted");
        Ok(response)
    }

    /// Create an account; the backend signs the new user in immediately.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse> {
        debug!(username = %username, "Attempting registration");

        let request = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        let response: AuthResponse = self
            .client
            .call("/api/auth/register", Method::POST, Some(&request))
            .await?;

        info!(username = %response.username, "Registration accepted");
        Ok(response)
    }

    /// Identity check for the stored credential.
    pub async fn me(&self) -> Result<User> {
        self.client.get("/api/auth/me").await
    }
}
