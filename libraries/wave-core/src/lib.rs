//! Wave Core
//!
//! Domain types, error handling and collaborator traits shared by every
//! Wave crate (playback controller, HTTP client and server).
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `User`, ids, catalog query/page types
//! - **Collaborator Traits**: `TrackCatalog`, `AuthService`, `SocialStore`
//! - **Error Handling**: Unified `WaveError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use wave_core::types::{TrackFilter, TrackQuery, UserId};
//!
//! let query = TrackQuery::new(TrackFilter::Popular)
//!     .with_limit(10)
//!     .with_user(UserId::new("user-1"));
//!
//! assert_eq!(query.limit, 10);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, WaveError};
pub use traits::{AuthService, SocialStore, TrackCatalog};

pub use types::{
    AuthSession, SocialStats, Track, TrackFilter, TrackId, TrackPage, TrackQuery, UploadMetadata,
    UploadedFile, User, UserId, UserSummary,
};
