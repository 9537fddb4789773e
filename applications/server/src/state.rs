/// Shared application state
use crate::services::{AuthService, FileStorage, JsonStore};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JsonStore>,
    pub auth_service: Arc<AuthService>,
    pub file_storage: Arc<FileStorage>,
    /// Upper bound on a multipart upload body
    pub max_upload_bytes: u64,
}

impl AppState {
    pub fn new(
        store: Arc<JsonStore>,
        auth_service: Arc<AuthService>,
        file_storage: Arc<FileStorage>,
        max_upload_bytes: u64,
    ) -> Self {
        Self {
            store,
            auth_service,
            file_storage,
            max_upload_bytes,
        }
    }
}
