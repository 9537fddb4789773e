/// File storage service - manages uploaded files on disk
use crate::error::{Result, ServerError};
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// Kind of uploaded file, each kept in its own subdirectory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Audio,
    Cover,
}

impl UploadKind {
    pub fn subdirectory(&self) -> &'static str {
        match self {
            UploadKind::Audio => "tracks",
            UploadKind::Cover => "covers",
        }
    }

    /// Top-level MIME type accepted for this kind
    pub fn mime_prefix(&self) -> &'static str {
        match self {
            UploadKind::Audio => "audio/",
            UploadKind::Cover => "image/",
        }
    }
}

/// A file written under the upload directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub path: PathBuf,
    /// Public URL, `/uploads/<subdirectory>/<name>`
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Initialize storage directories
    pub async fn initialize(&self) -> Result<()> {
        for kind in [UploadKind::Audio, UploadKind::Cover] {
            fs::create_dir_all(self.base_path.join(kind.subdirectory())).await?;
        }
        Ok(())
    }

    /// Store an uploaded file as `<uuid><extension>`.
    ///
    /// The extension comes from the client's file name, or from the
    /// content type when the name has none.
    pub async fn store(
        &self,
        kind: UploadKind,
        original_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<StoredFile> {
        let extension = file_extension(original_name, content_type);
        let filename = format!("{}{}", Uuid::new_v4(), extension);
        let path = self.base_path.join(kind.subdirectory()).join(&filename);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&path, data).await?;
        tracing::debug!(path = %path.display(), size = data.len(), "Stored upload");

        Ok(StoredFile {
            path,
            url: format!("/uploads/{}/{}", kind.subdirectory(), filename),
        })
    }

    /// Remove a stored file (used to roll back a failed upload)
    pub async fn remove(&self, file: &StoredFile) -> Result<()> {
        self.validate_path(&file.path)?;
        fs::remove_file(&file.path).await?;
        Ok(())
    }

    /// Validate that a path is within the storage directory (prevent directory traversal)
    pub fn validate_path(&self, path: &Path) -> Result<()> {
        let canonical_base = self
            .base_path
            .canonicalize()
            .map_err(|e| ServerError::Storage(format!("Invalid base path: {}", e)))?;

        let canonical_path = path
            .canonicalize()
            .map_err(|e| ServerError::Storage(format!("Invalid path: {}", e)))?;

        if !canonical_path.starts_with(&canonical_base) {
            return Err(ServerError::Unauthorized(
                "Path traversal attempt detected".to_string(),
            ));
        }

        Ok(())
    }
}

/// `.ext` of the original name, falling back to the first extension known
/// for the content type, or nothing
fn file_extension(original_name: &str, content_type: &str) -> String {
    let from_name = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()));

    let ext = from_name.or_else(|| {
        mime_guess::get_mime_extensions_str(content_type)
            .and_then(|exts| exts.first())
            .copied()
    });

    ext.map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default()
}
