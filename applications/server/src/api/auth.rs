/// Authentication API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    services::auth::validate_registration,
    state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use wave_core::User;

#[derive(Debug, Default, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl CredentialsRequest {
    fn into_parts(self) -> (String, String) {
        (
            self.username.unwrap_or_default(),
            self.password.unwrap_or_default(),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub message: String,
    pub user: User,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

/// Unwrap a JSON body, reporting malformed input as a 400 with an error body
pub(crate) fn json_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(value)| value)
        .map_err(|e| ServerError::BadRequest(e.body_text()))
}

/// POST /api/auth/register
pub async fn register(
    State(app_state): State<AppState>,
    body: std::result::Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SessionResponse>)> {
    let (username, password) = json_body(body)?.into_parts();
    validate_registration(&username, &password)?;

    let hash = app_state
        .auth_service
        .hash_password_blocking(password)
        .await?;
    let user = app_state.store.create_user(&username, hash).await?;
    let token = app_state.auth_service.create_token(&user)?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            message: "User registered".to_string(),
            user,
            token,
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    body: std::result::Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>> {
    let (username, password) = json_body(body)?.into_parts();
    if username.is_empty() || password.is_empty() {
        return Err(ServerError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    let invalid = || ServerError::Auth("Invalid username or password".to_string());

    let record = app_state
        .store
        .find_user_by_username(&username)
        .await?
        .ok_or_else(invalid)?;

    if !app_state
        .auth_service
        .verify_password_blocking(password, record.password.clone())
        .await?
    {
        return Err(invalid());
    }

    let token = app_state.auth_service.create_token(&record.user)?;
    tracing::info!(user_id = %record.user.id, "User logged in");

    Ok(Json(SessionResponse {
        message: "Logged in".to_string(),
        user: record.user,
        token,
    }))
}

/// GET /api/auth/me
pub async fn me(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<UserResponse>> {
    let user = app_state
        .store
        .find_user(auth.user_id())
        .await?
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse { user }))
}
