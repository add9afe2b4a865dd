use std::sync::Arc;

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use async_trait::async_trait;
use base64::Engine;
use chrono::{NaiveDateTime, Utc};
use sha2::{Digest, Sha256};
use tracing::instrument;
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::application::email_templates;
use crate::application::use_cases::EmailSender;
use crate::application::validators::{normalize_email, validate_email};
use crate::domain::entities::user::User;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Account row joined with its credential, for sign-in only. Everything else
/// works with [`User`] and never sees the hash.
#[derive(Debug)]
pub struct UserAuth {
    pub user: User,
    pub password_hash: String,
}

#[derive(Debug, Clone, Copy)]
pub struct SessionRecord {
    pub id: Uuid,
    pub user_id: Uuid,
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Inserts a new account. A duplicate email surfaces as
    /// `AppError::Conflict`.
    async fn insert(&self, email: &str, name: Option<&str>, password_hash: &str)
    -> AppResult<User>;
    async fn find_auth_by_email(&self, email: &str) -> AppResult<Option<UserAuth>>;
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
    async fn update_name(&self, id: Uuid, name: &str) -> AppResult<User>;
}

#[async_trait]
pub trait SessionRepo: Send + Sync {
    async fn create(&self, user_id: Uuid, token_hash: &str, expires_at: NaiveDateTime)
    -> AppResult<()>;
    /// Looks up a session that is not revoked and not expired as of `now`.
    async fn find_active(&self, token_hash: &str, now: NaiveDateTime)
    -> AppResult<Option<SessionRecord>>;
    async fn revoke(&self, token_hash: &str) -> AppResult<()>;
}

#[derive(Clone)]
pub struct AuthUseCases {
    users: Arc<dyn UserRepo>,
    sessions: Arc<dyn SessionRepo>,
    email: Arc<dyn EmailSender>,
    app_origin: String,
}

impl AuthUseCases {
    pub fn new(
        users: Arc<dyn UserRepo>,
        sessions: Arc<dyn SessionRepo>,
        email: Arc<dyn EmailSender>,
        app_origin: String,
    ) -> Self {
        Self {
            users,
            sessions,
            email,
            app_origin,
        }
    }

    #[instrument(skip(self, password))]
    pub async fn sign_up(&self, email: &str, password: &str, name: Option<&str>) -> AppResult<User> {
        let email = normalize_email(email);
        validate_email(&email)
            .map_err(|reason| AppError::InvalidInput(reason.user_message().to_string()))?;
        validate_password_strength(password, MIN_PASSWORD_LENGTH).map_err(AppError::InvalidInput)?;

        let password_hash = hash_password(password)?;
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        let user = match self.users.insert(&email, name, &password_hash).await {
            Err(AppError::Conflict) => return Err(AppError::EmailTaken),
            other => other?,
        };

        let (subject, html) = email_templates::welcome_email(&self.app_origin, user.name.as_deref());
        if let Err(err) = self.email.send(&user.email, &subject, &html).await {
            tracing::warn!(error = ?err, "Failed to send welcome email");
        }

        Ok(user)
    }

    /// Both unknown email and wrong password collapse into
    /// `InvalidCredentials` so a caller cannot probe which one it was.
    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<User> {
        let email = normalize_email(email);
        let auth = self
            .users
            .find_auth_by_email(&email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;
        if !verify_password(password, &auth.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }
        Ok(auth.user)
    }

    /// Mints a refresh token, stores its hash, and returns the raw value.
    /// The raw token exists only in the response cookie; the database holds
    /// the SHA-256 digest.
    #[instrument(skip(self))]
    pub async fn open_session(&self, user_id: Uuid, ttl_seconds: i64) -> AppResult<String> {
        let raw = generate_token();
        let token_hash = hash_token(&raw);
        let expires_at = (Utc::now() + chrono::Duration::seconds(ttl_seconds)).naive_utc();
        self.sessions.create(user_id, &token_hash, expires_at).await?;
        Ok(raw)
    }

    /// Rotates a refresh token: the presented token is revoked and a new one
    /// is issued in its place. A revoked, expired, or unknown token yields
    /// `InvalidCredentials`.
    #[instrument(skip(self, raw_token))]
    pub async fn refresh_session(&self, raw_token: &str, ttl_seconds: i64) -> AppResult<(User, String)> {
        let token_hash = hash_token(raw_token);
        let now = Utc::now().naive_utc();
        let session = self
            .sessions
            .find_active(&token_hash, now)
            .await?
            .ok_or(AppError::InvalidCredentials)?;
        self.sessions.revoke(&token_hash).await?;
        let user = self
            .users
            .get_by_id(session.user_id)
            .await?
            .ok_or(AppError::InvalidCredentials)?;
        let raw = self.open_session(session.user_id, ttl_seconds).await?;
        Ok((user, raw))
    }

    /// Revokes the session behind a refresh token. Idempotent: revoking an
    /// unknown or already-revoked token succeeds.
    #[instrument(skip(self, raw_token))]
    pub async fn close_session(&self, raw_token: &str) -> AppResult<()> {
        self.sessions.revoke(&hash_token(raw_token)).await
    }

    #[instrument(skip(self))]
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<User> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(AppError::NotFound)
    }

    #[instrument(skip(self))]
    pub async fn update_profile_name(&self, user_id: Uuid, name: &str) -> AppResult<User> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(AppError::InvalidInput("Name is required".to_string()));
        }
        self.users.update_name(user_id, trimmed).await
    }
}

/// Hash a password with Argon2id and a fresh random salt, PHC-encoded so the
/// parameters travel with the hash.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| AppError::Internal(format!("Failed to hash password: {err}")))?;
    Ok(hash.to_string())
}

/// `Ok(false)` for a mismatch; `Err` only when the stored hash itself is
/// unparseable or verification infrastructure fails.
pub fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|err| AppError::Internal(format!("Stored password hash is invalid: {err}")))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(AppError::Internal(format!(
            "Password verification failed: {err}"
        ))),
    }
}

pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), String> {
    if password.len() < min_length {
        return Err(format!("Password must be at least {min_length} characters"));
    }
    Ok(())
}

fn generate_token() -> String {
    use rand::RngCore;
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn hash_token(raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    let out = hasher.finalize();
    hex::encode(out)
}
