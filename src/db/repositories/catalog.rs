use crate::entities::{actor, genre, prelude::*};
use crate::models::movie::NamedEntry;
use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::info;

/// Genres and actors: the name-keyed lookup tables movies link to.
pub struct CatalogRepository {
    conn: DatabaseConnection,
}

impl CatalogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Returns every genre named exactly `name`, or inserts one if there is none.
    ///
    /// The lookup and the insert are separate statements; two concurrent calls
    /// with the same new name can both insert.
    pub async fn create_genre(&self, name: &str) -> Result<NamedEntry<genre::Model>> {
        let existing = Genre::find()
            .filter(genre::Column::Name.eq(name))
            .all(&self.conn)
            .await
            .context("Failed to query genre by name")?;

        if !existing.is_empty() {
            return Ok(NamedEntry::Existing(existing));
        }

        let created = genre::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert genre")?;

        info!(genre_id = created.id, "Added genre: {}", created.name);
        Ok(NamedEntry::Created(created))
    }

    /// Same contract as [`Self::create_genre`], for actors.
    pub async fn create_actor(&self, name: &str) -> Result<NamedEntry<actor::Model>> {
        let existing = Actor::find()
            .filter(actor::Column::Name.eq(name))
            .all(&self.conn)
            .await
            .context("Failed to query actor by name")?;

        if !existing.is_empty() {
            return Ok(NamedEntry::Existing(existing));
        }

        let created = actor::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert actor")?;

        info!(actor_id = created.id, "Added actor: {}", created.name);
        Ok(NamedEntry::Created(created))
    }

    pub async fn get_genre(&self, id: i32) -> Result<Option<genre::Model>> {
        Genre::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query genre by ID")
    }

    pub async fn get_actor(&self, id: i32) -> Result<Option<actor::Model>> {
        Actor::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query actor by ID")
    }

    /// Deletes a genre. Its `movie_genre` links go with it via the FK cascade.
    pub async fn delete_genre(&self, id: i32) -> Result<Option<genre::Model>> {
        let Some(existing) = self.get_genre(id).await? else {
            return Ok(None);
        };

        Genre::delete_by_id(id).exec(&self.conn).await?;
        info!(genre_id = id, "Removed genre: {}", existing.name);
        Ok(Some(existing))
    }

    /// Deletes an actor. Its `movie_actor` links go with it via the FK cascade.
    pub async fn delete_actor(&self, id: i32) -> Result<Option<actor::Model>> {
        let Some(existing) = self.get_actor(id).await? else {
            return Ok(None);
        };

        Actor::delete_by_id(id).exec(&self.conn).await?;
        info!(actor_id = id, "Removed actor: {}", existing.name);
        Ok(Some(existing))
    }
}
