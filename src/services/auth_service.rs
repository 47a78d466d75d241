//! Domain service for accounts and bearer tokens.
//!
//! Tokens are the per-user API keys: login hands out the current key and
//! logout rotates it, which invalidates the old one.

use thiserror::Error;
use uuid::Uuid;

use crate::models::user::User;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("REGISTER_USER_ALREADY_EXISTS")]
    AlreadyExists,

    #[error("LOGIN_BAD_CREDENTIALS")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound(Uuid),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

/// Token handed out by a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user_id: Uuid,
    pub access_token: String,
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an active, unverified, non-superuser account.
    ///
    /// # Errors
    ///
    /// - [`AuthError::AlreadyExists`] if the email is taken
    /// - [`AuthError::Validation`] if the password is too short
    async fn register(&self, email: &str, password: &str) -> Result<User, AuthError>;

    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown email, a wrong
    /// password or an inactive account.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError>;

    /// Resolves a bearer token to its user.
    async fn verify_token(&self, token: &str) -> Result<Option<User>, AuthError>;

    /// Rotates the user's token so the current one stops working.
    async fn logout(&self, user_id: Uuid) -> Result<(), AuthError>;
}
