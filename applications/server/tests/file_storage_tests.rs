/// File storage service tests
/// Tests upload directories, file naming and path validation
use tempfile::TempDir;
use wave_server::{
    services::{FileStorage, UploadKind},
    ServerError,
};

async fn storage() -> (FileStorage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileStorage::new(temp_dir.path().to_path_buf());
    storage.initialize().await.unwrap();
    (storage, temp_dir)
}

/// Test file storage initialization creates directory structure
#[tokio::test]
async fn test_file_storage_initialization() {
    let (_storage, temp_dir) = storage().await;

    for kind in [UploadKind::Audio, UploadKind::Cover] {
        let path = temp_dir.path().join(kind.subdirectory());
        assert!(path.is_dir(), "{} should be created", kind.subdirectory());
    }
}

#[tokio::test]
async fn test_store_audio_file() {
    let (storage, temp_dir) = storage().await;
    let data = b"fake audio data for testing";

    let stored = storage
        .store(UploadKind::Audio, "My Song.mp3", "audio/mpeg", data)
        .await
        .unwrap();

    // Verify file contents
    assert_eq!(std::fs::read(&stored.path).unwrap(), data);
    assert!(stored.path.starts_with(temp_dir.path().join("tracks")));

    // <uuid>.mp3, the client's name is not reused
    let name = stored.path.file_name().unwrap().to_str().unwrap();
    let stem = name.strip_suffix(".mp3").unwrap();
    assert!(uuid::Uuid::parse_str(stem).is_ok(), "{name}");
    assert_eq!(stored.url, format!("/uploads/tracks/{name}"));
}

#[tokio::test]
async fn test_same_name_gets_unique_files() {
    let (storage, _temp_dir) = storage().await;

    let first = storage
        .store(UploadKind::Cover, "cover.jpg", "image/jpeg", b"a")
        .await
        .unwrap();
    let second = storage
        .store(UploadKind::Cover, "cover.jpg", "image/jpeg", b"b")
        .await
        .unwrap();

    assert_ne!(first.path, second.path);
    assert_eq!(std::fs::read(&first.path).unwrap(), b"a");
}

#[tokio::test]
async fn test_validate_path_rejects_outside_files() {
    let (storage, _temp_dir) = storage().await;
    let outside = TempDir::new().unwrap();
    let foreign = outside.path().join("foreign.mp3");
    std::fs::write(&foreign, b"x").unwrap();

    assert!(matches!(
        storage.validate_path(&foreign),
        Err(ServerError::Unauthorized(_))
    ));
}
