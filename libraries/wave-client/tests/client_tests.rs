//! Tests for the Wave client library.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a real server connection.

use serde_json::json;
use wave_client::{ClientConfig, ClientError, WaveClient};
use wave_core::{TrackFilter, TrackId, TrackQuery, UploadMetadata, UploadedFile};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_json(id: &str, username: &str) -> serde_json::Value {
    json!({
        "id": id,
        "username": username,
        "displayName": username,
        "avatar": null,
        "cover": null,
        "createdAt": "2024-05-01T12:00:00Z",
        "tracksCount": 0,
        "followersCount": 0,
        "followingCount": 0
    })
}

fn track_json(id: &str, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "artist": "Neon",
        "genre": "synthwave",
        "mood": null,
        "description": null,
        "isPublic": true,
        "audioUrl": format!("/uploads/tracks/{id}.mp3"),
        "coverUrl": null,
        "duration": 0,
        "uploadedBy": "user-1",
        "uploadedAt": "2024-05-01T12:00:00Z",
        "plays": 3,
        "likes": 1,
        "uploader": {
            "id": "user-1",
            "username": "neon",
            "displayName": "neon",
            "avatar": null
        }
    })
}

async fn client_for(server: &MockServer) -> WaveClient {
    WaveClient::new(ClientConfig::new(server.uri())).unwrap()
}

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn test_empty_url_rejected() {
        match WaveClient::new(ClientConfig::new("")) {
            Err(ClientError::InvalidUrl(msg)) => assert!(msg.contains("empty")),
            other => panic!("Expected InvalidUrl error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_url_without_scheme_rejected() {
        match WaveClient::new(ClientConfig::new("example.com")) {
            Err(ClientError::InvalidUrl(msg)) => {
                assert!(msg.contains("http://") || msg.contains("https://"));
            }
            other => panic!("Expected InvalidUrl error, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_trailing_slashes_removed() {
        let client = WaveClient::new(ClientConfig::new("https://example.com///")).unwrap();
        assert_eq!(client.url().await, "https://example.com");
    }

    #[tokio::test]
    async fn test_stored_token_is_kept() {
        let client =
            WaveClient::new(ClientConfig::with_token("https://example.com", "abc")).unwrap();
        assert!(client.is_authenticated().await);
        assert_eq!(client.token().await.as_deref(), Some("abc"));
    }
}

// =============================================================================
// Authentication Tests
// =============================================================================

mod authentication {
    use super::*;

    #[tokio::test]
    async fn test_register_stores_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .and(body_json(json!({"username": "neo", "password": "pass1"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "user": user_json("user-1", "neo"),
                "token": "jwt-1"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let session = client.register("neo", "pass1").await.unwrap();

        assert_eq!(session.user.username, "neo");
        assert_eq!(session.token, "jwt-1");
        assert_eq!(client.token().await.as_deref(), Some("jwt-1"));
    }

    #[tokio::test]
    async fn test_register_duplicate_is_conflict() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(json!({"error": "Username already taken"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        match client.register("neo", "pass1").await {
            Err(ClientError::Conflict(msg)) => assert_eq!(msg, "Username already taken"),
            other => panic!("Expected Conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_login_invalid_credentials() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"error": "Invalid username or password"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.login("neo", "wrong").await.unwrap_err();

        assert!(err.is_auth_failure());
        assert!(!client.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_current_user_sends_bearer_token() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .and(header("authorization", "Bearer jwt-1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"user": user_json("user-1", "neo")})),
            )
            .mount(&server)
            .await;

        let client =
            WaveClient::new(ClientConfig::with_token(server.uri(), "jwt-1")).unwrap();
        let user = client.current_user().await.unwrap();

        assert_eq!(user.id.as_str(), "user-1");
    }

    #[tokio::test]
    async fn test_current_user_without_token() {
        let server = MockServer::start().await;
        let client = client_for(&server).await;

        assert!(matches!(
            client.current_user().await,
            Err(ClientError::AuthRequired)
        ));
    }

    #[tokio::test]
    async fn test_unauthorized_clears_token() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"error": "Access token required"})),
            )
            .mount(&server)
            .await;

        let client =
            WaveClient::new(ClientConfig::with_token(server.uri(), "expired")).unwrap();
        let err = client.current_user().await.unwrap_err();

        assert!(matches!(err, ClientError::Unauthorized(_)));
        assert!(!client.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_forbidden_token_maps_to_unauthorized_core_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({"error": "Invalid token"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = wave_core::AuthService::current_user(&client, "garbage")
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_logout_clears_token() {
        let client =
            WaveClient::new(ClientConfig::with_token("http://localhost:3000", "jwt")).unwrap();
        client.logout().await;
        assert!(client.token().await.is_none());
    }
}

// =============================================================================
// Catalog Tests
// =============================================================================

mod catalog {
    use super::*;

    #[tokio::test]
    async fn test_list_tracks_sends_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tracks"))
            .and(query_param("filter", "popular"))
            .and(query_param("limit", "5"))
            .and(query_param("offset", "10"))
            .and(query_param("search", "night"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tracks": [track_json("t1", "Night Drive")],
                "total": 11,
                "hasMore": false
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let query = TrackQuery::new(TrackFilter::Popular)
            .with_limit(5)
            .with_offset(10)
            .with_search("night");
        let page = client.list_tracks(&query).await.unwrap();

        assert_eq!(page.total, 11);
        assert!(!page.has_more);
        assert_eq!(page.tracks[0].title, "Night Drive");
        assert_eq!(
            page.tracks[0].uploader.as_ref().map(|u| u.username.as_str()),
            Some("neon")
        );
    }

    #[tokio::test]
    async fn test_get_track_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tracks/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"error": "Track not found"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.get_track(&TrackId::new("missing")).await.unwrap_err();

        assert!(matches!(err, ClientError::TrackNotFound(ref id) if id.as_str() == "missing"));
        let core: wave_core::WaveError = err.into();
        assert!(matches!(core, wave_core::WaveError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_track() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tracks/t1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"track": track_json("t1", "Intro")})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let track = client.get_track(&TrackId::new("t1")).await.unwrap();

        assert_eq!(track.title, "Intro");
        assert_eq!(track.plays, 3);
    }

    #[tokio::test]
    async fn test_record_play_returns_count() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/tracks/t1/play"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"plays": 42})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(client.record_play(&TrackId::new("t1")).await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tracks"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(matches!(
            client.list_tracks(&TrackQuery::default()).await,
            Err(ClientError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn test_server_error_keeps_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tracks"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        match client.list_tracks(&TrackQuery::default()).await {
            Err(ClientError::ServerError { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("Expected ServerError, got {:?}", other),
        }
    }
}

// =============================================================================
// Upload Tests
// =============================================================================

mod upload {
    use super::*;

    fn audio() -> UploadedFile {
        UploadedFile::new("song.mp3", "audio/mpeg", b"ID3fake".to_vec())
    }

    #[tokio::test]
    async fn test_upload_requires_token() {
        let server = MockServer::start().await;
        let client = client_for(&server).await;

        let result = client
            .upload_track(&UploadMetadata::new("Song", "Artist"), audio(), None)
            .await;

        assert!(matches!(result, Err(ClientError::AuthRequired)));
    }

    #[tokio::test]
    async fn test_upload_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/tracks/upload"))
            .and(header("authorization", "Bearer jwt-1"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({"track": track_json("t9", "Song")})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client =
            WaveClient::new(ClientConfig::with_token(server.uri(), "jwt-1")).unwrap();
        let mut metadata = UploadMetadata::new("Song", "Artist");
        metadata.is_public = true;
        let cover = UploadedFile::new("cover.png", "image/png", vec![0x89, b'P', b'N', b'G']);

        let track = client
            .upload_track(&metadata, audio(), Some(cover))
            .await
            .unwrap();

        assert_eq!(track.id.as_str(), "t9");
    }

    #[tokio::test]
    async fn test_upload_validation_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/tracks/upload"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"error": "Title and artist are required"})),
            )
            .mount(&server)
            .await;

        let client =
            WaveClient::new(ClientConfig::with_token(server.uri(), "jwt-1")).unwrap();
        let result = client
            .upload_track(&UploadMetadata::new("", ""), audio(), None)
            .await;

        match result {
            Err(ClientError::Validation(msg)) => assert!(msg.contains("required")),
            other => panic!("Expected Validation, got {:?}", other),
        }
        assert!(client.is_authenticated().await);
    }
}
