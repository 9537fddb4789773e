//! Main Wave server client.

use crate::auth::AuthClient;
use crate::catalog::CatalogClient;
use crate::error::{ClientError, Result};
use crate::types::ClientConfig;
use crate::upload::UploadClient;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{info, warn};
use url::Url;
use wave_core::{
    AuthService, AuthSession, Track, TrackCatalog, TrackId, TrackPage, TrackQuery, UploadMetadata,
    UploadedFile, User,
};

/// Client for a Wave server.
///
/// Holds the bearer token for the current session. Any 401 answer clears
/// the token, so callers see the session as logged out afterwards.
pub struct WaveClient {
    http: Client,
    config: Arc<RwLock<ClientConfig>>,
}

impl WaveClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        Url::parse(&url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Wave/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(ClientConfig {
                url,
                token: config.token,
            })),
        })
    }

    /// Get the server URL.
    pub async fn url(&self) -> String {
        self.config.read().await.url.clone()
    }

    /// Check if the client holds a token.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.token.is_some()
    }

    /// Current bearer token.
    pub async fn token(&self) -> Option<String> {
        self.config.read().await.token.clone()
    }

    /// Set the token directly (e.g., restored from storage).
    pub async fn set_token(&self, token: impl Into<String>) {
        self.config.write().await.token = Some(token.into());
    }

    /// Clear the stored token.
    pub async fn logout(&self) {
        self.config.write().await.token = None;
        info!("Logged out");
    }

    /// Create an account and store its token.
    pub async fn register(&self, username: &str, password: &str) -> Result<AuthSession> {
        let url = self.url().await;
        let result = AuthClient::new(&self.http, &url)
            .register(username, password)
            .await;
        let session = self.check_session(result).await?;

        self.set_token(session.token.clone()).await;
        Ok(session)
    }

    /// Login and store the token.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession> {
        let url = self.url().await;
        let result = AuthClient::new(&self.http, &url)
            .login(username, password)
            .await;
        let session = self.check_session(result).await?;

        self.set_token(session.token.clone()).await;
        Ok(session)
    }

    /// User behind the stored token.
    pub async fn current_user(&self) -> Result<User> {
        let (url, token) = self.authenticated().await?;
        let result = AuthClient::new(&self.http, &url).me(&token).await;
        self.check_session(result).await
    }

    pub async fn list_tracks(&self, query: &TrackQuery) -> Result<TrackPage> {
        let url = self.url().await;
        CatalogClient::new(&self.http, &url).list_tracks(query).await
    }

    pub async fn get_track(&self, id: &TrackId) -> Result<Track> {
        let url = self.url().await;
        CatalogClient::new(&self.http, &url).get_track(id).await
    }

    /// Increment the play count of a track, returning the new count.
    pub async fn record_play(&self, id: &TrackId) -> Result<u64> {
        let url = self.url().await;
        CatalogClient::new(&self.http, &url).record_play(id).await
    }

    /// Upload a track. Requires a token.
    pub async fn upload_track(
        &self,
        metadata: &UploadMetadata,
        audio: UploadedFile,
        cover: Option<UploadedFile>,
    ) -> Result<Track> {
        let (url, token) = self.authenticated().await?;
        let result = UploadClient::new(&self.http, &url, &token)
            .upload_track(metadata, audio, cover)
            .await;
        self.check_session(result).await
    }

    async fn authenticated(&self) -> Result<(String, String)> {
        let config = self.config.read().await;
        let token = config.token.clone().ok_or(ClientError::AuthRequired)?;
        Ok((config.url.clone(), token))
    }

    /// Drop the token when the server rejected it.
    async fn check_session<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(ClientError::Unauthorized(msg)) = &result {
            let mut config = self.config.write().await;
            if config.token.take().is_some() {
                warn!(error = %msg, "Session expired, token cleared");
            }
        }
        result
    }
}

#[async_trait]
impl TrackCatalog for WaveClient {
    async fn list_tracks(&self, query: &TrackQuery) -> wave_core::Result<TrackPage> {
        Ok(WaveClient::list_tracks(self, query).await?)
    }

    async fn get_track(&self, id: &TrackId) -> wave_core::Result<Track> {
        Ok(WaveClient::get_track(self, id).await?)
    }

    async fn record_play(&self, id: &TrackId) -> wave_core::Result<u64> {
        Ok(WaveClient::record_play(self, id).await?)
    }

    async fn upload_track(
        &self,
        metadata: &UploadMetadata,
        audio: UploadedFile,
        cover: Option<UploadedFile>,
    ) -> wave_core::Result<Track> {
        Ok(WaveClient::upload_track(self, metadata, audio, cover).await?)
    }
}

#[async_trait]
impl AuthService for WaveClient {
    async fn register(&self, username: &str, password: &str) -> wave_core::Result<AuthSession> {
        Ok(WaveClient::register(self, username, password).await?)
    }

    async fn login(&self, username: &str, password: &str) -> wave_core::Result<AuthSession> {
        Ok(WaveClient::login(self, username, password).await?)
    }

    /// Resolves `token` without touching the stored session.
    async fn current_user(&self, token: &str) -> wave_core::Result<User> {
        let url = self.url().await;
        Ok(AuthClient::new(&self.http, &url).me(token).await?)
    }
}
