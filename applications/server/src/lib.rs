//! Wave Server Library
//!
//! Accounts, track catalog and uploads over a flat JSON file store.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod router;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use router::create_router;
pub use services::{auth::AuthService, file_storage::FileStorage, json_store::JsonStore};
pub use state::AppState;

use std::sync::Arc;

/// Open the stores named by `config` and assemble the handler state
pub async fn build_state(config: &ServerConfig) -> Result<AppState> {
    let store = JsonStore::open(&config.storage.data_dir).await?;
    tracing::info!(dir = %config.storage.data_dir.display(), "Data store ready");

    let file_storage = FileStorage::new(config.storage.upload_dir.clone());
    file_storage.initialize().await?;
    tracing::info!(dir = %config.storage.upload_dir.display(), "File storage initialized");

    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.token_lifetime_days,
        config.auth.bcrypt_cost,
    );

    Ok(AppState::new(
        Arc::new(store),
        Arc::new(auth_service),
        Arc::new(file_storage),
        config.storage.max_upload_bytes,
    ))
}
