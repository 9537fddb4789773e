/// Server services
pub mod auth;
pub mod file_storage;
pub mod json_store;

pub use auth::AuthService;
pub use file_storage::{FileStorage, StoredFile, UploadKind};
pub use json_store::{JsonStore, PlayRecord, UserRecord};
