use crate::entities::{legacy_users, prelude::*};
use anyhow::Result;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

pub struct LegacyUserRepository {
    conn: DatabaseConnection,
}

impl LegacyUserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, name: &str, email: &str) -> Result<legacy_users::Model> {
        let model = legacy_users::ActiveModel {
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        Ok(model)
    }

    pub async fn get(&self, id: i32) -> Result<Option<legacy_users::Model>> {
        Ok(LegacyUsers::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn update(
        &self,
        id: i32,
        name: &str,
        email: &str,
    ) -> Result<Option<legacy_users::Model>> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: legacy_users::ActiveModel = existing.into();
        active.name = Set(name.to_string());
        active.email = Set(email.to_string());

        Ok(Some(active.update(&self.conn).await?))
    }

    pub async fn delete(&self, id: i32) -> Result<Option<legacy_users::Model>> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        LegacyUsers::delete_by_id(id).exec(&self.conn).await?;
        Ok(Some(existing))
    }
}
