//! Authentication endpoints.

use crate::error::{response_error, send_error, ClientError, Result};
use crate::types::{CredentialsRequest, UserResponse};
use reqwest::Client;
use tracing::{debug, info, warn};
use wave_core::{AuthSession, User};

/// Authentication client for a Wave server.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Create an account. The server answers 201 with a session.
    pub async fn register(&self, username: &str, password: &str) -> Result<AuthSession> {
        let url = format!("{}/api/auth/register", self.base_url);
        debug!(url = %url, username = %username, "Registering user");

        let session = self.post_credentials(&url, username, password).await?;
        info!(user_id = %session.user.id, username = %session.user.username, "Registered");
        Ok(session)
    }

    /// Login with username and password.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession> {
        let url = format!("{}/api/auth/login", self.base_url);
        debug!(url = %url, username = %username, "Attempting login");

        match self.post_credentials(&url, username, password).await {
            Ok(session) => {
                info!(user_id = %session.user.id, username = %session.user.username, "Login successful");
                Ok(session)
            }
            Err(ClientError::Unauthorized(msg)) => {
                warn!(error = %msg, "Login failed: invalid credentials");
                Err(ClientError::Unauthorized(msg))
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch the user behind `token`.
    pub async fn me(&self, token: &str) -> Result<User> {
        let url = format!("{}/api/auth/me", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(send_error)?;

        if !response.status().is_success() {
            return Err(response_error(response).await);
        }

        let body: UserResponse = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse user response: {}", e))
        })?;
        Ok(body.user)
    }

    async fn post_credentials(
        &self,
        url: &str,
        username: &str,
        password: &str,
    ) -> Result<AuthSession> {
        let request = CredentialsRequest { username, password };

        let response = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(send_error)?;

        if !response.status().is_success() {
            return Err(response_error(response).await);
        }

        response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse auth response: {}", e))
        })
    }
}
