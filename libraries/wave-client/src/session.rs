//! Explicit composition root for a logged-in user.

use crate::client::WaveClient;
use crate::recorder::CatalogPlayRecorder;
use crate::social::LocalSocialStore;
use std::path::Path;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::info;
use wave_core::{Result, TrackCatalog, User};
use wave_playback::{MediaSink, PlaybackConfig, PlaybackController};

/// Everything a logged-in client needs, constructed once at startup
///
/// Components get what they need from here by handle; nothing is global.
pub struct Session {
    client: Arc<WaveClient>,
    user: User,
    social: LocalSocialStore,
}

impl Session {
    /// Log in and open the user's social store under `social_dir`
    pub async fn login(
        client: Arc<WaveClient>,
        username: &str,
        password: &str,
        social_dir: impl AsRef<Path>,
    ) -> Result<Self> {
        let auth = client.login(username, password).await?;
        Self::open(client, auth.user, social_dir)
    }

    /// Register and open an empty social store
    pub async fn register(
        client: Arc<WaveClient>,
        username: &str,
        password: &str,
        social_dir: impl AsRef<Path>,
    ) -> Result<Self> {
        let auth = client.register(username, password).await?;
        Self::open(client, auth.user, social_dir)
    }

    /// Resume from the token already held by `client`
    pub async fn restore(client: Arc<WaveClient>, social_dir: impl AsRef<Path>) -> Result<Self> {
        let user = client.current_user().await?;
        Self::open(client, user, social_dir)
    }

    fn open(client: Arc<WaveClient>, user: User, social_dir: impl AsRef<Path>) -> Result<Self> {
        let social = LocalSocialStore::open(social_dir, &user.id)?;
        info!(user_id = %user.id, username = %user.username, "Session started");

        Ok(Self {
            client,
            user,
            social,
        })
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn client(&self) -> &Arc<WaveClient> {
        &self.client
    }

    /// The client as a catalog collaborator
    pub fn catalog(&self) -> Arc<dyn TrackCatalog> {
        Arc::clone(&self.client) as Arc<dyn TrackCatalog>
    }

    pub fn social(&self) -> &LocalSocialStore {
        &self.social
    }

    pub fn social_mut(&mut self) -> &mut LocalSocialStore {
        &mut self.social
    }

    /// Playback controller whose plays are recorded through this session
    pub fn controller<S: MediaSink>(
        &self,
        sink: S,
        config: PlaybackConfig,
        handle: Handle,
    ) -> PlaybackController<S> {
        PlaybackController::new(sink, config)
            .with_recorder(CatalogPlayRecorder::new(self.catalog(), handle))
    }

    /// Drop the server token and end the session
    pub async fn logout(self) {
        self.client.logout().await;
    }
}
