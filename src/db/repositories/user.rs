use anyhow::{Context, Result, anyhow};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use rand::RngCore;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::fmt::Write as _;
use tokio::task;
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::entities::users;
use crate::models::user::User;

/// Registered accounts. Passwords are stored as Argon2id PHC strings.
pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn find_row_by_email(&self, email: &str) -> Result<Option<users::Model>> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .with_context(|| format!("Failed to look up account {email}"))
    }

    /// The unique index on `email` rejects duplicates.
    pub async fn create(
        &self,
        email: &str,
        password: &str,
        security: &SecurityConfig,
    ) -> Result<User> {
        let hasher = argon2_for(security)?;
        let password = password.to_owned();
        let hashed_password = task::spawn_blocking(move || hash_with(&hasher, &password))
            .await
            .context("Password hashing task panicked")??;

        let timestamp = chrono::Utc::now().to_rfc3339();
        let row = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_owned()),
            hashed_password: Set(hashed_password),
            is_active: Set(true),
            is_superuser: Set(false),
            is_verified: Set(false),
            api_key: Set(generate_api_key()),
            created_at: Set(timestamp.clone()),
            updated_at: Set(timestamp),
        }
        .insert(&self.conn)
        .await
        .with_context(|| format!("Failed to register {email}"))?;

        Ok(row.into())
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.find_row_by_email(email).await?.map(User::from))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let row = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .with_context(|| format!("Failed to load account {id}"))?;

        Ok(row.map(User::from))
    }

    /// `None` covers both an unknown email and a wrong password.
    pub async fn verify_password(&self, email: &str, password: &str) -> Result<Option<User>> {
        let Some(row) = self.find_row_by_email(email).await? else {
            return Ok(None);
        };

        let stored = row.hashed_password.clone();
        let candidate = password.to_owned();
        let matches = task::spawn_blocking(move || password_matches(&stored, &candidate))
            .await
            .context("Password verification task panicked")??;

        Ok(matches.then(|| row.into()))
    }

    pub async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>> {
        let row = users::Entity::find()
            .filter(users::Column::ApiKey.eq(api_key))
            .one(&self.conn)
            .await
            .context("Failed to look up access token")?;

        Ok(row.map(User::from))
    }

    /// Replaces the account's access token, invalidating the old one.
    pub async fn regenerate_api_key(&self, id: Uuid) -> Result<String> {
        let row = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .with_context(|| format!("Failed to load account {id}"))?
            .ok_or_else(|| anyhow!("No account with id {id}"))?;

        let token = generate_api_key();
        let mut active: users::ActiveModel = row.into();
        active.api_key = Set(token.clone());
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        active
            .update(&self.conn)
            .await
            .with_context(|| format!("Failed to rotate token for {id}"))?;

        Ok(token)
    }
}

fn argon2_for(security: &SecurityConfig) -> Result<Argon2<'static>> {
    let params = Params::new(
        security.argon2_memory_cost_kib,
        security.argon2_time_cost,
        security.argon2_parallelism,
        None,
    )
    .map_err(|e| anyhow!("Invalid Argon2 parameters: {e}"))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

fn hash_with(hasher: &Argon2<'_>, password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Failed to hash password: {e}"))?;
    Ok(hash.to_string())
}

/// Parameters are read back from the PHC string, so a default verifier works
/// for hashes produced under any configured cost.
fn password_matches(stored: &str, candidate: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| anyhow!("Corrupt password hash: {e}"))?;
    Ok(Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok())
}

/// 32 random bytes rendered as lowercase hex.
#[must_use]
pub fn generate_api_key() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);

    let mut token = String::with_capacity(64);
    for byte in bytes {
        let _ = write!(token, "{byte:02x}");
    }
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_is_64_hex_chars() {
        let key = generate_api_key();
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(key, generate_api_key());
    }

    #[test]
    fn configured_hash_verifies_with_default_verifier() {
        let hasher = argon2_for(&SecurityConfig::default()).unwrap();
        let hash = hash_with(&hasher, "correct horse").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(password_matches(&hash, "correct horse").unwrap());
        assert!(!password_matches(&hash, "battery staple").unwrap());
    }

    #[test]
    fn corrupt_hash_is_an_error() {
        assert!(password_matches("not-a-phc-string", "anything").is_err());
    }
}
