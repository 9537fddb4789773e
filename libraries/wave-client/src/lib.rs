//! Wave Client
//!
//! HTTP client for the Wave server API, plus the pieces that connect it to
//! the playback controller.
//!
//! # Features
//!
//! - **Authentication**: register, login, current user; a 401 clears the token
//! - **Catalog**: list/search tracks, fetch one, record plays
//! - **Upload**: multipart track upload with optional cover
//! - **Playback wiring**: [`CatalogPlayRecorder`] and [`Session`]
//! - **Social**: likes and follows persisted locally ([`LocalSocialStore`])
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wave_client::{ClientConfig, Session, WaveClient};
//! use wave_core::{TrackFilter, TrackQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(WaveClient::new(ClientConfig::new("http://localhost:3000"))?);
//!
//!     let popular = client
//!         .list_tracks(&TrackQuery::new(TrackFilter::Popular).with_limit(10))
//!         .await?;
//!     println!("{} tracks", popular.total);
//!
//!     let session = Session::login(client, "listener", "secret", "./data").await?;
//!     println!("Logged in as {}", session.user().display_name);
//!     Ok(())
//! }
//! ```

mod auth;
mod catalog;
mod client;
mod error;
mod recorder;
mod session;
mod social;
mod types;
mod upload;

pub use client::WaveClient;
pub use error::{ClientError, Result};
pub use recorder::CatalogPlayRecorder;
pub use session::Session;
pub use social::{LocalSocialStore, SocialRecord};
pub use types::ClientConfig;

// Sub-clients for direct use
pub use auth::AuthClient;
pub use catalog::CatalogClient;
pub use upload::UploadClient;
