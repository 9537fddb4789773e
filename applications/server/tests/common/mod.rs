//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;
use wave_server::{create_router, AppState, AuthService, FileStorage, JsonStore};

pub const BOUNDARY: &str = "wave-test-boundary";

/// Fast bcrypt cost for tests
pub fn test_auth_service() -> AuthService {
    AuthService::new(fixtures::JWT_SECRET.to_string(), 30, 4)
}

/// Router over temporary data and upload directories
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub data_dir: TempDir,
    pub upload_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_upload_limit(50 * 1024 * 1024).await
    }

    pub async fn with_upload_limit(max_upload_bytes: u64) -> Self {
        let data_dir = TempDir::new().unwrap();
        let upload_dir = TempDir::new().unwrap();

        let store = JsonStore::open(data_dir.path()).await.unwrap();
        let file_storage = FileStorage::new(upload_dir.path().to_path_buf());
        file_storage.initialize().await.unwrap();

        let state = AppState::new(
            Arc::new(store),
            Arc::new(test_auth_service()),
            Arc::new(file_storage),
            max_upload_bytes,
        );

        Self {
            router: create_router(state.clone()),
            state,
            data_dir,
            upload_dir,
        }
    }

    /// Send a request and decode the JSON answer (Null for empty bodies)
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// Send a request and return the raw body
    pub async fn send_raw(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    /// Register an account and return its token and id
    pub async fn register(&self, username: &str, password: &str) -> (String, String) {
        let (status, body) = self
            .send(post_json(
                "/api/auth/register",
                &serde_json::json!({ "username": username, "password": password }),
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");

        (
            body["token"].as_str().unwrap().to_string(),
            body["user"]["id"].as_str().unwrap().to_string(),
        )
    }

    /// Upload a public or private track and return the created track JSON
    pub async fn upload(&self, token: &str, title: &str, public: bool) -> Value {
        let body = MultipartBuilder::new()
            .text("title", title)
            .text("artist", "Test Artist")
            .text("isPublic", if public { "true" } else { "false" })
            .file("audio", "song.mp3", "audio/mpeg", b"ID3 fake audio")
            .build();

        let (status, json) = self.send(upload_request(Some(token), body)).await;
        assert_eq!(status, StatusCode::CREATED, "upload failed: {json}");
        json["track"].clone()
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_token(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

pub fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .body(Body::empty())
        .unwrap()
}

pub fn upload_request(token: Option<&str>, body: Vec<u8>) -> Request<Body> {
    let mut builder = Request::builder()
        .uri("/api/tracks/upload")
        .method("POST")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body)).unwrap()
}

/// Hand-built multipart/form-data body
#[derive(Default)]
pub struct MultipartBuilder {
    body: Vec<u8>,
}

impl MultipartBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}

/// Test user credentials
pub mod fixtures {
    pub const JWT_SECRET: &str = "test-secret-key";
    pub const TEST_USERNAME: &str = "testuser";
    pub const TEST_PASSWORD: &str = "password123";
}
