//! Authentication gate: registration, password login and bearer-token checks.
//!
//! Tokens are HS256 JWTs signed with one process-wide secret. Nothing about a
//! token is stored server side; `authenticate` only needs the secret.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation};
use tokio::sync::OnceCell;

use crate::config::Config;
use crate::database::{User, UserStore};
use crate::error::{AppError, AppResult};
use crate::utils::{generate_token, hash_password, token_validation, verify_password, verify_token};

pub const MIN_PASSWORD_LEN: usize = 6;
/// bcrypt ignores everything past 72 bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Verified against when the username is unknown, so both login failures cost one bcrypt verify.
const DUMMY_PASSWORD: &str = "booking-backend-dummy-password";

/// Identity attached to a request once its bearer token checks out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
}

pub struct Authenticator {
    users: Arc<dyn UserStore>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
    bcrypt_cost: u32,
    dummy_hash: OnceCell<String>,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserStore>, secret: &str, token_ttl: Duration, bcrypt_cost: u32) -> Self {
        Self {
            users,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: token_validation(),
            token_ttl,
            bcrypt_cost,
            dummy_hash: OnceCell::new(),
        }
    }

    pub fn from_config(users: Arc<dyn UserStore>, config: &Config) -> Self {
        Self::new(users, &config.jwt_secret, config.jwt_expiration(), config.bcrypt_cost)
    }

    pub async fn register(&self, username: &str, password: &str) -> AppResult<User> {
        if username.trim().is_empty() {
            return Err(AppError::validation("username", "must not be empty"));
        }
        if password.is_empty() {
            return Err(AppError::validation("password", "must not be empty"));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::validation(
                "password",
                format!("must be at least {} characters", MIN_PASSWORD_LEN),
            ));
        }
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(AppError::validation(
                "password",
                format!("must be at most {} bytes", MAX_PASSWORD_BYTES),
            ));
        }

        let password = password.to_owned();
        let cost = self.bcrypt_cost;
        let password_hash =
            tokio::task::spawn_blocking(move || hash_password(&password, cost)).await??;

        self.users.create(username, &password_hash).await
    }

    /// Returns a signed token. Unknown users and wrong passwords fail identically.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<String> {
        let Some(user) = self.users.find_by_username(username).await? else {
            let password = password.to_owned();
            let dummy_hash = self.ensure_dummy_hash().await?.to_owned();
            tokio::task::spawn_blocking(move || verify_password(&password, &dummy_hash)).await??;
            tracing::debug!("Login rejected: unknown username");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS));
        };

        let password = password.to_owned();
        let password_hash = user.password_hash.clone();
        let matches =
            tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
                .await??;
        if !matches {
            tracing::debug!("Login rejected for user {}: password mismatch", user.id);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS));
        }

        let (token, expiration) = generate_token(user.id, &self.encoding_key, self.token_ttl)
            .map_err(|e| AppError::Internal(format!("token signing: {e}")))?;

        tracing::info!("User {} logged in, token expires at {}", user.id, expiration);
        Ok(token)
    }

    /// A hash at the configured cost, made on first use.
    async fn ensure_dummy_hash(&self) -> AppResult<&str> {
        let cost = self.bcrypt_cost;
        let hash = self
            .dummy_hash
            .get_or_try_init(|| async move {
                let hash =
                    tokio::task::spawn_blocking(move || hash_password(DUMMY_PASSWORD, cost)).await??;
                Ok::<_, AppError>(hash)
            })
            .await?;
        Ok(hash.as_str())
    }

    pub fn authenticate(&self, token: &str) -> AppResult<AuthUser> {
        if token.is_empty() {
            return Err(AppError::Unauthorized("missing token"));
        }

        let claims = verify_token(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!("Token rejected: {:?}", e.kind());
            match e.kind() {
                ErrorKind::ExpiredSignature => AppError::Unauthorized("token expired"),
                _ => AppError::Unauthorized("invalid token"),
            }
        })?;

        let user_id = claims
            .user_id()
            .ok_or(AppError::Unauthorized("invalid token subject"))?;

        Ok(AuthUser { user_id })
    }

    pub async fn current_user(&self, user: AuthUser) -> AppResult<User> {
        self.users
            .find_by_id(user.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {} not found", user.user_id)))
    }
}
