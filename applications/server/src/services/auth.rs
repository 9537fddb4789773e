/// Authentication service - JWT and password handling
use crate::error::{Result, ServerError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use wave_core::{User, UserId};

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 20;
pub const PASSWORD_MIN_LEN: usize = 4;

#[derive(Debug, Clone)]
pub struct AuthService {
    secret: String,
    token_lifetime: Duration,
    bcrypt_cost: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> UserId {
        UserId::new(self.sub.clone())
    }
}

impl AuthService {
    pub fn new(secret: String, token_lifetime_days: u64, bcrypt_cost: u32) -> Self {
        Self {
            secret,
            token_lifetime: Duration::days(token_lifetime_days as i64),
            bcrypt_cost,
        }
    }

    /// Hash a password using bcrypt
    pub fn hash_password(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, self.bcrypt_cost).map_err(ServerError::from)
    }

    /// Verify a password against a hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(ServerError::from)
    }

    /// [`hash_password`](Self::hash_password) on the blocking thread pool
    pub async fn hash_password_blocking(&self, password: String) -> Result<String> {
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| ServerError::Internal(format!("password hashing task failed: {}", e)))?
            .map_err(ServerError::from)
    }

    /// [`verify_password`](Self::verify_password) on the blocking thread pool
    pub async fn verify_password_blocking(&self, password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| ServerError::Internal(format!("password check task failed: {}", e)))?
            .map_err(ServerError::from)
    }

    /// Issue a session token for a user
    pub fn create_token(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let exp = now + self.token_lifetime;

        let claims = Claims {
            sub: user.id.as_str().to_string(),
            username: user.username.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::default(), &claims, &encoding_key).map_err(ServerError::from)
    }

    /// Verify and decode a token
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(token_data.claims)
    }
}

/// Registration rules: both fields present, username of 3-20 word characters,
/// password of at least 4 characters.
pub fn validate_registration(username: &str, password: &str) -> Result<()> {
    if username.is_empty() || password.is_empty() {
        return Err(ServerError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(ServerError::BadRequest(format!(
            "Username must be {USERNAME_MIN_LEN} to {USERNAME_MAX_LEN} characters"
        )));
    }

    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(ServerError::BadRequest(format!(
            "Password must be at least {PASSWORD_MIN_LEN} characters"
        )));
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(ServerError::BadRequest(
            "Username may only contain letters, digits and underscores".to_string(),
        ));
    }

    Ok(())
}
