use std::collections::{BTreeSet, HashMap};

use crate::entities::{actor, genre, movie, movie_actor, movie_genre, prelude::*};
use crate::models::movie::{MovieInput, MovieRecord};
use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info};

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts the movie row and its genre/actor links in one transaction.
    ///
    /// Ids in `input.genres` / `input.actors` that have no row are dropped.
    pub async fn create(&self, input: &MovieInput) -> Result<MovieRecord> {
        let txn = self.conn.begin().await?;

        let genres = resolve_genres(&txn, &input.genres).await?;
        let actors = resolve_actors(&txn, &input.actors).await?;

        let movie = apply_scalars(<movie::ActiveModel as Default>::default(), input)
            .insert(&txn)
            .await
            .context("Failed to insert movie")?;

        replace_genre_links(&txn, movie.id, &genres).await?;
        replace_actor_links(&txn, movie.id, &actors).await?;

        txn.commit().await?;

        info!(
            movie_id = movie.id,
            genres = genres.len(),
            actors = actors.len(),
            "Added movie: {}",
            movie.original_title
        );

        Ok(MovieRecord {
            movie,
            genres,
            actors,
        })
    }

    pub async fn get(&self, id: i32) -> Result<Option<MovieRecord>> {
        load_record(&self.conn, id).await
    }

    pub async fn list(&self) -> Result<Vec<MovieRecord>> {
        let movies = Movie::find()
            .order_by_asc(movie::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list movies")?;

        hydrate(&self.conn, movies).await
    }

    /// Genres linked to a movie, or `None` if the movie does not exist.
    pub async fn get_genres(&self, id: i32) -> Result<Option<Vec<genre::Model>>> {
        let Some(movie) = Movie::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut by_movie = load_genres(&self.conn, &[movie.id]).await?;
        Ok(Some(by_movie.remove(&movie.id).unwrap_or_default()))
    }

    /// Actors linked to a movie, or `None` if the movie does not exist.
    pub async fn get_actors(&self, id: i32) -> Result<Option<Vec<actor::Model>>> {
        let Some(movie) = Movie::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut by_movie = load_actors(&self.conn, &[movie.id]).await?;
        Ok(Some(by_movie.remove(&movie.id).unwrap_or_default()))
    }

    /// Overwrites every scalar column and replaces both link sets with the
    /// resolved ids from `input`.
    pub async fn update(&self, id: i32, input: &MovieInput) -> Result<Option<MovieRecord>> {
        let txn = self.conn.begin().await?;

        let Some(existing) = Movie::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let genres = resolve_genres(&txn, &input.genres).await?;
        let actors = resolve_actors(&txn, &input.actors).await?;

        let movie = apply_scalars(existing.into(), input)
            .update(&txn)
            .await
            .context("Failed to update movie")?;

        replace_genre_links(&txn, movie.id, &genres).await?;
        replace_actor_links(&txn, movie.id, &actors).await?;

        txn.commit().await?;

        info!(movie_id = movie.id, "Updated movie: {}", movie.original_title);

        Ok(Some(MovieRecord {
            movie,
            genres,
            actors,
        }))
    }

    /// Deletes a movie and returns it as it was just before deletion.
    ///
    /// The snapshot is read inside the same transaction as the delete, before
    /// the cascade drops the link rows.
    pub async fn delete(&self, id: i32) -> Result<Option<MovieRecord>> {
        let txn = self.conn.begin().await?;

        let Some(snapshot) = load_record(&txn, id).await? else {
            return Ok(None);
        };

        Movie::delete_by_id(id)
            .exec(&txn)
            .await
            .context("Failed to delete movie")?;

        txn.commit().await?;

        info!(movie_id = id, "Removed movie: {}", snapshot.movie.original_title);
        Ok(Some(snapshot))
    }
}

fn apply_scalars(mut active: movie::ActiveModel, input: &MovieInput) -> movie::ActiveModel {
    active.tmdb_id = Set(input.tmdb_id);
    active.imdb_id = Set(input.imdb_id.clone());
    active.kinopoisk_id = Set(input.kinopoisk_id);
    active.localized_title = Set(input.localized_title.clone());
    active.original_title = Set(input.original_title.clone());
    active.original_language = Set(input.original_language.clone());
    active.overview = Set(input.overview.clone());
    active.release_date = Set(input.release_date);
    active
}

async fn resolve_genres<C: ConnectionTrait>(db: &C, ids: &[i32]) -> Result<Vec<genre::Model>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let found = Genre::find()
        .filter(genre::Column::Id.is_in(ids.to_vec()))
        .order_by_asc(genre::Column::Id)
        .all(db)
        .await
        .context("Failed to resolve genre ids")?;

    if found.len() < ids.len() {
        debug!(requested = ?ids, found = found.len(), "Dropping unknown genre ids");
    }
    Ok(found)
}

async fn resolve_actors<C: ConnectionTrait>(db: &C, ids: &[i32]) -> Result<Vec<actor::Model>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let found = Actor::find()
        .filter(actor::Column::Id.is_in(ids.to_vec()))
        .order_by_asc(actor::Column::Id)
        .all(db)
        .await
        .context("Failed to resolve actor ids")?;

    if found.len() < ids.len() {
        debug!(requested = ?ids, found = found.len(), "Dropping unknown actor ids");
    }
    Ok(found)
}

/// Makes the movie's `movie_genre` rows exactly `genres`: stale links are
/// deleted, missing ones inserted, and links present in both are left alone.
async fn replace_genre_links<C: ConnectionTrait>(
    db: &C,
    movie_id: i32,
    genres: &[genre::Model],
) -> Result<()> {
    let wanted: BTreeSet<i32> = genres.iter().map(|g| g.id).collect();
    let current: BTreeSet<i32> = MovieGenre::find()
        .filter(movie_genre::Column::MovieId.eq(movie_id))
        .all(db)
        .await?
        .into_iter()
        .map(|link| link.genre_id)
        .collect();

    let stale: Vec<i32> = current.difference(&wanted).copied().collect();
    if !stale.is_empty() {
        MovieGenre::delete_many()
            .filter(movie_genre::Column::MovieId.eq(movie_id))
            .filter(movie_genre::Column::GenreId.is_in(stale))
            .exec(db)
            .await?;
    }

    let added: Vec<movie_genre::ActiveModel> = wanted
        .difference(&current)
        .map(|&genre_id| movie_genre::ActiveModel {
            movie_id: Set(movie_id),
            genre_id: Set(genre_id),
        })
        .collect();

    if !added.is_empty() {
        MovieGenre::insert_many(added)
            .exec_without_returning(db)
            .await?;
    }

    Ok(())
}

async fn replace_actor_links<C: ConnectionTrait>(
    db: &C,
    movie_id: i32,
    actors: &[actor::Model],
) -> Result<()> {
    let wanted: BTreeSet<i32> = actors.iter().map(|a| a.id).collect();
    let current: BTreeSet<i32> = MovieActor::find()
        .filter(movie_actor::Column::MovieId.eq(movie_id))
        .all(db)
        .await?
        .into_iter()
        .map(|link| link.actor_id)
        .collect();

    let stale: Vec<i32> = current.difference(&wanted).copied().collect();
    if !stale.is_empty() {
        MovieActor::delete_many()
            .filter(movie_actor::Column::MovieId.eq(movie_id))
            .filter(movie_actor::Column::ActorId.is_in(stale))
            .exec(db)
            .await?;
    }

    let added: Vec<movie_actor::ActiveModel> = wanted
        .difference(&current)
        .map(|&actor_id| movie_actor::ActiveModel {
            movie_id: Set(movie_id),
            actor_id: Set(actor_id),
        })
        .collect();

    if !added.is_empty() {
        MovieActor::insert_many(added)
            .exec_without_returning(db)
            .await?;
    }

    Ok(())
}

pub(super) async fn load_record<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<MovieRecord>> {
    let Some(movie) = Movie::find_by_id(id)
        .one(db)
        .await
        .context("Failed to query movie by ID")?
    else {
        return Ok(None);
    };

    Ok(hydrate(db, vec![movie]).await?.pop())
}

/// Attaches genres and actors to a batch of movies with a fixed number of
/// queries, independent of the batch size.
pub(super) async fn hydrate<C: ConnectionTrait>(
    db: &C,
    movies: Vec<movie::Model>,
) -> Result<Vec<MovieRecord>> {
    if movies.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = movies.iter().map(|m| m.id).collect();
    let mut genres = load_genres(db, &ids).await?;
    let mut actors = load_actors(db, &ids).await?;

    Ok(movies
        .into_iter()
        .map(|movie| MovieRecord {
            genres: genres.remove(&movie.id).unwrap_or_default(),
            actors: actors.remove(&movie.id).unwrap_or_default(),
            movie,
        })
        .collect())
}

async fn load_genres<C: ConnectionTrait>(
    db: &C,
    movie_ids: &[i32],
) -> Result<HashMap<i32, Vec<genre::Model>>> {
    let links = MovieGenre::find()
        .filter(movie_genre::Column::MovieId.is_in(movie_ids.to_vec()))
        .all(db)
        .await
        .context("Failed to load movie genres")?;

    if links.is_empty() {
        return Ok(HashMap::new());
    }

    let genre_ids: BTreeSet<i32> = links.iter().map(|l| l.genre_id).collect();
    let genres: HashMap<i32, genre::Model> = Genre::find()
        .filter(genre::Column::Id.is_in(genre_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|g| (g.id, g))
        .collect();

    let mut by_movie: HashMap<i32, Vec<genre::Model>> = HashMap::new();
    for link in links {
        if let Some(genre) = genres.get(&link.genre_id) {
            by_movie.entry(link.movie_id).or_default().push(genre.clone());
        }
    }
    for list in by_movie.values_mut() {
        list.sort_by_key(|g| g.id);
    }

    Ok(by_movie)
}

async fn load_actors<C: ConnectionTrait>(
    db: &C,
    movie_ids: &[i32],
) -> Result<HashMap<i32, Vec<actor::Model>>> {
    let links = MovieActor::find()
        .filter(movie_actor::Column::MovieId.is_in(movie_ids.to_vec()))
        .all(db)
        .await
        .context("Failed to load movie actors")?;

    if links.is_empty() {
        return Ok(HashMap::new());
    }

    let actor_ids: BTreeSet<i32> = links.iter().map(|l| l.actor_id).collect();
    let actors: HashMap<i32, actor::Model> = Actor::find()
        .filter(actor::Column::Id.is_in(actor_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();

    let mut by_movie: HashMap<i32, Vec<actor::Model>> = HashMap::new();
    for link in links {
        if let Some(actor) = actors.get(&link.actor_id) {
            by_movie.entry(link.movie_id).or_default().push(actor.clone());
        }
    }
    for list in by_movie.values_mut() {
        list.sort_by_key(|a| a.id);
    }

    Ok(by_movie)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;
    use chrono::NaiveDate;

    fn input(genres: Vec<i32>, actors: Vec<i32>) -> MovieInput {
        MovieInput {
            tmdb_id: 603,
            imdb_id: "tt0133093".to_string(),
            kinopoisk_id: 301,
            localized_title: "Матрица".to_string(),
            original_title: "The Matrix".to_string(),
            original_language: "en".to_string(),
            overview: "A hacker learns the truth about reality.".to_string(),
            release_date: NaiveDate::from_ymd_opt(1999, 3, 31).unwrap(),
            genres,
            actors,
        }
    }

    async fn store() -> Store {
        Store::new("sqlite::memory:").await.unwrap()
    }

    async fn seed_actors(store: &Store, names: &[&str]) -> Vec<i32> {
        let mut ids = Vec::new();
        for name in names {
            let entry = store.create_actor(name).await.unwrap();
            let crate::models::movie::NamedEntry::Created(actor) = entry else {
                panic!("actor {name} already existed");
            };
            ids.push(actor.id);
        }
        ids
    }

    #[tokio::test]
    async fn update_replaces_actor_set() {
        let store = store().await;
        let ids = seed_actors(&store, &["Keanu Reeves", "Carrie-Anne Moss", "Hugo Weaving"]).await;

        let created = store
            .create_movie(&input(vec![], vec![ids[0], ids[1]]))
            .await
            .unwrap();
        assert_eq!(created.actor_ids(), vec![ids[0], ids[1]]);

        let updated = store
            .update_movie(created.movie.id, &input(vec![], vec![ids[1], ids[2]]))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.actor_ids(), vec![ids[1], ids[2]]);

        let reloaded = store.get_movie(created.movie.id).await.unwrap().unwrap();
        assert_eq!(reloaded.actor_ids(), vec![ids[1], ids[2]]);
    }

    #[tokio::test]
    async fn unknown_ids_are_dropped() {
        let store = store().await;
        let crate::models::movie::NamedEntry::Created(drama) =
            store.create_genre("Drama").await.unwrap()
        else {
            panic!("fresh database");
        };

        let created = store
            .create_movie(&input(vec![drama.id, 999], vec![42]))
            .await
            .unwrap();

        assert_eq!(created.genre_ids(), vec![drama.id]);
        assert!(created.actors.is_empty());
    }

    #[tokio::test]
    async fn delete_returns_snapshot_and_removes_links() {
        let store = store().await;
        let ids = seed_actors(&store, &["Laurence Fishburne"]).await;
        let crate::models::movie::NamedEntry::Created(action) =
            store.create_genre("Action").await.unwrap()
        else {
            panic!("fresh database");
        };
        let created = store
            .create_movie(&input(vec![action.id], ids.clone()))
            .await
            .unwrap();
        assert_eq!(MovieGenre::find().all(&store.conn).await.unwrap().len(), 1);
        assert_eq!(MovieActor::find().all(&store.conn).await.unwrap().len(), 1);

        let deleted = store.delete_movie(created.movie.id).await.unwrap().unwrap();
        assert_eq!(deleted.genre_ids(), vec![action.id]);
        assert_eq!(deleted.actor_ids(), ids);
        assert!(store.get_movie(created.movie.id).await.unwrap().is_none());

        assert!(MovieGenre::find().all(&store.conn).await.unwrap().is_empty());
        assert!(MovieActor::find().all(&store.conn).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_movie_yields_none() {
        let store = store().await;
        assert!(store.get_movie(7).await.unwrap().is_none());
        assert!(store.get_movie_genres(7).await.unwrap().is_none());
        assert!(store.update_movie(7, &input(vec![], vec![])).await.unwrap().is_none());
        assert!(store.delete_movie(7).await.unwrap().is_none());
    }
}
