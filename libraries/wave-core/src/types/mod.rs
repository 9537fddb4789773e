//! Domain types for Wave

mod catalog;
mod ids;
mod social;
mod track;
mod user;

pub use catalog::{AuthSession, TrackFilter, TrackPage, TrackQuery, UploadMetadata, UploadedFile};
pub use ids::{TrackId, UserId};
pub use social::SocialStats;
pub use track::Track;
pub use user::{User, UserSummary};
