/// Flat JSON file store - one array file per collection
///
/// Every mutation reads the whole collection, changes it and rewrites the
/// file. A single async mutex serializes these read-modify-write cycles
/// within the process; nothing guards against other writers.
use crate::error::{Result, ServerError};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::{fs, sync::Mutex};
use wave_core::{Track, TrackId, User, UserId};

const USERS: &str = "users.json";
const TRACKS: &str = "tracks.json";
const LIKES: &str = "likes.json";
const STATS: &str = "stats.json";

/// Persisted user: the public view plus the bcrypt hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(flatten)]
    pub user: User,
    pub password: String,
}

/// One entry of the play log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayRecord {
    pub track_id: TrackId,
    pub played_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct JsonStore {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl JsonStore {
    /// Open the store, creating the directory and empty collections as needed
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;

        for name in [USERS, TRACKS, LIKES, STATS] {
            let path = dir.join(name);
            if !fs::try_exists(&path).await? {
                fs::write(&path, b"[]").await?;
                tracing::debug!(file = %path.display(), "Created empty collection");
            }
        }

        Ok(Self {
            dir,
            lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    // ===== Users =====

    pub async fn users(&self) -> Result<Vec<UserRecord>> {
        let _guard = self.lock.lock().await;
        self.read(USERS).await
    }

    /// Case-insensitive username lookup
    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let _guard = self.lock.lock().await;
        let users: Vec<UserRecord> = self.read(USERS).await?;
        Ok(users
            .into_iter()
            .find(|r| r.user.username.eq_ignore_ascii_case(username)))
    }

    pub async fn find_user(&self, id: &UserId) -> Result<Option<User>> {
        let _guard = self.lock.lock().await;
        let users: Vec<UserRecord> = self.read(USERS).await?;
        Ok(users.into_iter().find(|r| &r.user.id == id).map(|r| r.user))
    }

    /// Insert a new account; the username must be free case-insensitively
    pub async fn create_user(&self, username: &str, password_hash: String) -> Result<User> {
        let _guard = self.lock.lock().await;
        let mut users: Vec<UserRecord> = self.read(USERS).await?;

        if users
            .iter()
            .any(|r| r.user.username.eq_ignore_ascii_case(username))
        {
            return Err(ServerError::Conflict(format!(
                "Username '{username}' is already taken"
            )));
        }

        let user = User::new(username);
        users.push(UserRecord {
            user: user.clone(),
            password: password_hash,
        });
        self.write(USERS, &users).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User created");
        Ok(user)
    }

    // ===== Tracks =====

    pub async fn tracks(&self) -> Result<Vec<Track>> {
        let _guard = self.lock.lock().await;
        self.read(TRACKS).await
    }

    pub async fn find_track(&self, id: &TrackId) -> Result<Option<Track>> {
        let _guard = self.lock.lock().await;
        let tracks: Vec<Track> = self.read(TRACKS).await?;
        Ok(tracks.into_iter().find(|t| &t.id == id))
    }

    /// Append a track and recompute the uploader's `tracksCount`
    pub async fn insert_track(&self, mut track: Track) -> Result<Track> {
        let _guard = self.lock.lock().await;
        track.uploader = None;

        let mut tracks: Vec<Track> = self.read(TRACKS).await?;
        tracks.push(track.clone());
        self.write(TRACKS, &tracks).await?;

        let owned = tracks
            .iter()
            .filter(|t| t.uploaded_by == track.uploaded_by)
            .count() as u64;

        let mut users: Vec<UserRecord> = self.read(USERS).await?;
        if let Some(record) = users.iter_mut().find(|r| r.user.id == track.uploaded_by) {
            record.user.tracks_count = owned;
            self.write(USERS, &users).await?;
        }

        Ok(track)
    }

    /// Increment a track's play count and append to the play log
    pub async fn record_play(&self, id: &TrackId) -> Result<u64> {
        let _guard = self.lock.lock().await;
        let mut tracks: Vec<Track> = self.read(TRACKS).await?;

        let track = tracks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| ServerError::NotFound("Track not found".to_string()))?;
        track.plays += 1;
        let plays = track.plays;
        self.write(TRACKS, &tracks).await?;

        let mut stats: Vec<PlayRecord> = self.read(STATS).await?;
        stats.push(PlayRecord {
            track_id: id.clone(),
            played_at: Utc::now(),
        });
        self.write(STATS, &stats).await?;

        Ok(plays)
    }

    pub async fn plays(&self) -> Result<Vec<PlayRecord>> {
        let _guard = self.lock.lock().await;
        self.read(STATS).await
    }

    // ===== File access =====

    async fn read<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        let path = self.dir.join(name);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            ServerError::Storage(format!("{} is corrupt: {}", path.display(), e))
        })
    }

    async fn write<T: Serialize>(&self, name: &str, items: &[T]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(items)?;
        fs::write(self.dir.join(name), bytes).await?;
        Ok(())
    }
}
