//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::models::user::User;
use crate::services::auth_service::{AuthError, AuthService, LoginResult};

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, email: &str, password: &str) -> Result<User, AuthError> {
        if password.chars().count() < self.security.min_password_length {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                self.security.min_password_length
            )));
        }

        if self.store.get_user_by_email(email).await?.is_some() {
            return Err(AuthError::AlreadyExists);
        }

        let user = self.store.create_user(email, password, &self.security).await?;
        info!(user_id = %user.id, "Registered user {}", user.email);
        Ok(user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError> {
        let Some(user) = self.store.verify_user_password(email, password).await? else {
            warn!("Failed login attempt for {email}");
            return Err(AuthError::InvalidCredentials);
        };

        if !user.is_active {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(LoginResult {
            user_id: user.id,
            access_token: user.api_key,
        })
    }

    async fn verify_token(&self, token: &str) -> Result<Option<User>, AuthError> {
        let user = self.store.verify_api_key(token).await?;
        Ok(user.filter(|u| u.is_active))
    }

    async fn logout(&self, user_id: Uuid) -> Result<(), AuthError> {
        if self.store.get_user_by_id(user_id).await?.is_none() {
            return Err(AuthError::UserNotFound(user_id));
        }

        self.store.regenerate_user_api_key(user_id).await?;
        info!(%user_id, "Rotated access token on logout");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn service() -> SeaOrmAuthService {
        let store = Store::new("sqlite::memory:").await.unwrap();
        SeaOrmAuthService::new(store, SecurityConfig::default())
    }

    #[tokio::test]
    async fn register_then_login_returns_token() {
        let auth = service().await;

        let user = auth.register("viewer@example.com", "popcorn-123").await.unwrap();
        assert!(user.is_active);
        assert!(!user.is_superuser);
        assert!(!user.is_verified);

        let login = auth.login("viewer@example.com", "popcorn-123").await.unwrap();
        assert_eq!(login.user_id, user.id);

        let resolved = auth.verify_token(&login.access_token).await.unwrap();
        assert_eq!(resolved.map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let auth = service().await;
        auth.register("viewer@example.com", "popcorn-123").await.unwrap();

        let err = auth
            .register("viewer@example.com", "different-pass")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::AlreadyExists));
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let auth = service().await;
        let err = auth.register("viewer@example.com", "short").await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[tokio::test]
    async fn wrong_password_is_bad_credentials() {
        let auth = service().await;
        auth.register("viewer@example.com", "popcorn-123").await.unwrap();

        assert!(matches!(
            auth.login("viewer@example.com", "popcorn-124").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("nobody@example.com", "popcorn-123").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn logout_invalidates_token() {
        let auth = service().await;
        auth.register("viewer@example.com", "popcorn-123").await.unwrap();
        let login = auth.login("viewer@example.com", "popcorn-123").await.unwrap();

        auth.logout(login.user_id).await.unwrap();

        assert!(auth.verify_token(&login.access_token).await.unwrap().is_none());
        let again = auth.login("viewer@example.com", "popcorn-123").await.unwrap();
        assert_ne!(again.access_token, login.access_token);
    }
}
