/// Collaborator traits for Wave
///
/// The playback controller never talks to the network itself; these are the
/// seams the client crate implements over HTTP and the server mirrors.
use crate::error::Result;
use crate::types::{
    AuthSession, Track, TrackId, TrackPage, TrackQuery, UploadMetadata, UploadedFile, User,
    UserId,
};
use async_trait::async_trait;

/// Track listing, lookup and upload
#[async_trait]
pub trait TrackCatalog: Send + Sync {
    /// List tracks matching the query
    async fn list_tracks(&self, query: &TrackQuery) -> Result<TrackPage>;

    /// Get a single track by id
    ///
    /// # Errors
    /// Returns `WaveError::NotFound` if the track does not exist
    async fn get_track(&self, id: &TrackId) -> Result<Track>;

    /// Increment the play count, returning the new count
    async fn record_play(&self, id: &TrackId) -> Result<u64>;

    /// Upload a track with its audio file and optional cover image
    async fn upload_track(
        &self,
        metadata: &UploadMetadata,
        audio: UploadedFile,
        cover: Option<UploadedFile>,
    ) -> Result<Track>;
}

/// User identity
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account and return a logged-in session
    ///
    /// # Errors
    /// `WaveError::Validation` on bad input, `WaveError::Conflict` if taken
    async fn register(&self, username: &str, password: &str) -> Result<AuthSession>;

    /// Exchange credentials for a session
    async fn login(&self, username: &str, password: &str) -> Result<AuthSession>;

    /// Resolve the user behind a token
    ///
    /// # Errors
    /// Returns `WaveError::Unauthorized` on a bad or expired token
    async fn current_user(&self, token: &str) -> Result<User>;
}

/// Like/follow state for the current session
///
/// Local and synchronous; each toggle persists before returning.
pub trait SocialStore: Send {
    /// Flip the like flag, returning whether the track is liked now
    fn toggle_like(&mut self, track_id: &TrackId) -> Result<bool>;

    /// Flip the follow flag, returning whether the user is followed now
    fn toggle_follow(&mut self, user_id: &UserId) -> Result<bool>;

    fn is_liked(&self, track_id: &TrackId) -> bool;

    fn is_following(&self, user_id: &UserId) -> bool;
}
