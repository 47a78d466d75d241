use std::collections::BTreeSet;

use crate::entities::{movie, prelude::*, user_watchlist};
use crate::models::movie::MovieRecord;
use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use super::movie::hydrate;

pub struct WatchlistRepository {
    conn: DatabaseConnection,
}

impl WatchlistRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Movies on a user's watchlist, ordered by movie id, with relations loaded.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<MovieRecord>> {
        list_for_user(&self.conn, user_id).await
    }

    /// Makes the watchlist exactly the set of existing movies among `movie_ids`.
    pub async fn replace(&self, user_id: Uuid, movie_ids: &[i32]) -> Result<Vec<MovieRecord>> {
        let txn = self.conn.begin().await?;

        let wanted: BTreeSet<i32> = if movie_ids.is_empty() {
            BTreeSet::new()
        } else {
            Movie::find()
                .filter(movie::Column::Id.is_in(movie_ids.to_vec()))
                .all(&txn)
                .await
                .context("Failed to resolve watchlist movie ids")?
                .into_iter()
                .map(|m| m.id)
                .collect()
        };

        let current: BTreeSet<i32> = UserWatchlist::find()
            .filter(user_watchlist::Column::UserId.eq(user_id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|entry| entry.movie_id)
            .collect();

        let stale: Vec<i32> = current.difference(&wanted).copied().collect();
        if !stale.is_empty() {
            UserWatchlist::delete_many()
                .filter(user_watchlist::Column::UserId.eq(user_id))
                .filter(user_watchlist::Column::MovieId.is_in(stale))
                .exec(&txn)
                .await?;
        }

        let added: Vec<user_watchlist::ActiveModel> = wanted
            .difference(&current)
            .map(|&movie_id| user_watchlist::ActiveModel {
                user_id: Set(user_id),
                movie_id: Set(movie_id),
            })
            .collect();

        if !added.is_empty() {
            UserWatchlist::insert_many(added)
                .exec_without_returning(&txn)
                .await?;
        }

        let movies = list_for_user(&txn, user_id).await?;
        txn.commit().await?;

        info!(%user_id, size = movies.len(), "Replaced watchlist");
        Ok(movies)
    }
}

async fn list_for_user<C: ConnectionTrait>(db: &C, user_id: Uuid) -> Result<Vec<MovieRecord>> {
    let movie_ids: Vec<i32> = UserWatchlist::find()
        .filter(user_watchlist::Column::UserId.eq(user_id))
        .all(db)
        .await
        .context("Failed to load watchlist")?
        .into_iter()
        .map(|entry| entry.movie_id)
        .collect();

    if movie_ids.is_empty() {
        return Ok(Vec::new());
    }

    let movies = Movie::find()
        .filter(movie::Column::Id.is_in(movie_ids))
        .order_by_asc(movie::Column::Id)
        .all(db)
        .await?;

    hydrate(db, movies).await
}
