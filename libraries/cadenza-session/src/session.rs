//! Authentication state machine
//!
//! `Anonymous -> Authenticating -> Authenticated`, with a return to
//! `Anonymous` on failure or logout.

use crate::error::{Result, SessionError};
use cadenza_core::{Credential, User};
use cadenza_server_client::{AuthResponse, CadenzaClient, ServerClientError, TokenStore};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";

/// Where the session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Anonymous,
    Authenticating,
    Authenticated,
}

#[derive(Debug)]
struct SessionState {
    status: SessionStatus,
    user: Option<User>,

    // Held from the start of an attempt until its request settles, even if
    // logout abandons the attempt in between
    attempt_in_flight: bool,

    // Bumped by logout; an attempt whose generation no longer matches is
    // discarded when its response arrives
    generation: u64,
}

/// State to return to if an attempt fails
#[derive(Debug)]
struct Attempt {
    generation: u64,
    status: SessionStatus,
    user: Option<User>,
}

/// Owns the signed-in identity and the stored credential
///
/// At most one authentication attempt (login, register or restore) runs at a
/// time. The slot is claimed under the lock before any request is sent, so a
/// concurrent attempt sees it and is rejected. Logout abandons an attempt in
/// flight: its response is dropped and the slot is released only once it
/// settles.
pub struct SessionController {
    client: CadenzaClient,
    tokens: Arc<dyn TokenStore>,
    state: RwLock<SessionState>,
}

impl SessionController {
    /// `tokens` must be the same store `client` reads credentials from.
    pub fn new(client: CadenzaClient, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            client,
            tokens,
            state: RwLock::new(SessionState {
                status: SessionStatus::Anonymous,
                user: None,
                attempt_in_flight: false,
                generation: 0,
            }),
        }
    }

    pub fn client(&self) -> &CadenzaClient {
        &self.client
    }

    pub async fn status(&self) -> SessionStatus {
        self.state.read().await.status
    }

    pub async fn user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.status().await == SessionStatus::Authenticated
    }

    /// Sign in with username and password
    ///
    /// Calling this while already authenticated signs in again; the new
    /// credential replaces the old one.
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        let attempt = self.begin_attempt().await?;

        let outcome = self
            .client
            .auth()
            .login(username, password)
            .await
            .map(|response| (response, None));
        self.finish_attempt(outcome, attempt, LOGIN_FAILED).await
    }

    /// Create an account and sign in as the new user
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<User> {
        let attempt = self.begin_attempt().await?;

        let outcome = self
            .client
            .auth()
            .register(username, email, password)
            .await
            .map(|response| (response, Some(email.to_string())));
        self.finish_attempt(outcome, attempt, REGISTRATION_FAILED).await
    }

    /// Resume a session from a stored credential
    ///
    /// Returns `Ok(None)` when there is no credential, the backend no longer
    /// accepts it (the credential is then cleared), or logout happened while
    /// the check was in flight.
    pub async fn restore_session(&self) -> Result<Option<User>> {
        if self.tokens.get().is_none() {
            debug!("No stored credential; staying anonymous");
            return Ok(None);
        }

        let attempt = self.begin_attempt().await?;
        let outcome = self.client.auth().me().await;

        let mut state = self.state.write().await;
        state.attempt_in_flight = false;
        if state.generation != attempt.generation {
            debug!("Logged out during restore; discarding result");
            return Ok(None);
        }

        match outcome {
            Ok(user) => {
                info!(username = %user.username, "Session restored");
                state.status = SessionStatus::Authenticated;
                state.user = Some(user.clone());
                Ok(Some(user))
            }
            Err(e) => {
                warn!(error = %e, "Stored credential rejected; clearing it");
                self.clear_credential();
                state.status = SessionStatus::Anonymous;
                state.user = None;
                Ok(None)
            }
        }
    }

    /// Forget the credential and the user. Never touches the network.
    ///
    /// An attempt still in flight is abandoned; its outcome is ignored.
    pub async fn logout(&self) {
        let mut state = self.state.write().await;
        self.clear_credential();

        if let Some(user) = state.user.take() {
            info!(username = %user.username, "Logged out");
        }
        state.status = SessionStatus::Anonymous;
        state.generation += 1;
    }

    // ===== Internal =====

    /// Claim the single authentication slot
    async fn begin_attempt(&self) -> Result<Attempt> {
        let mut state = self.state.write().await;
        if state.attempt_in_flight {
            return Err(SessionError::AuthInProgress);
        }

        let attempt = Attempt {
            generation: state.generation,
            status: state.status,
            user: state.user.clone(),
        };
        state.attempt_in_flight = true;
        state.status = SessionStatus::Authenticating;
        Ok(attempt)
    }

    /// Apply the outcome of a login or registration
    ///
    /// The credential is stored under the state lock, so a concurrent logout
    /// either runs first (and the credential is never stored) or clears it
    /// afterwards.
    async fn finish_attempt(
        &self,
        outcome: std::result::Result<(AuthResponse, Option<String>), ServerClientError>,
        attempt: Attempt,
        failure: &str,
    ) -> Result<User> {
        let mut state = self.state.write().await;
        state.attempt_in_flight = false;
        if state.generation != attempt.generation {
            debug!("Logged out during authentication; discarding result");
            return Err(SessionError::AuthCancelled);
        }

        let stored = outcome.and_then(|(response, email)| {
            let credential: Credential = response.credential();
            self.tokens.set(&credential)?;
            Ok(User {
                username: response.username,
                email,
            })
        });

        match stored {
            Ok(user) => {
                info!(username = %user.username, "Authenticated");
                state.status = SessionStatus::Authenticated;
                state.user = Some(user.clone());
                Ok(user)
            }
            Err(e) => {
                // A failed attempt leaves the session as it was before it
                warn!(error = %e, "{}", failure);
                state.status = attempt.status;
                state.user = attempt.user;
                Err(SessionError::AuthFailed(failure.into()))
            }
        }
    }

    fn clear_credential(&self) {
        if let Err(e) = self.tokens.clear() {
            warn!(error = %e, "Failed to clear stored credential");
        }
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}
