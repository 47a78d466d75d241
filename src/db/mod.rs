use crate::config::SecurityConfig;
use crate::entities::{actor, genre, legacy_users};
use crate::models::movie::{MovieInput, MovieRecord, NamedEntry};
use crate::models::user::User;
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

pub mod migrator;
pub mod repositories;

/// sea-orm only accepts finite idle/lifetime limits, so the in-memory pool
/// uses one long enough that its single connection is never reaped.
const IN_MEMORY_CONNECTION_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

fn pool_options(
    db_url: &str,
    max_connections: u32,
    min_connections: u32,
    in_memory: bool,
) -> ConnectOptions {
    let mut opt = ConnectOptions::new(db_url.to_string());
    opt.connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    // Every pooled connection to `sqlite::memory:` is a separate database,
    // and recycling the only connection would drop all data.
    if in_memory {
        opt.max_connections(1)
            .min_connections(1)
            .idle_timeout(IN_MEMORY_CONNECTION_TTL)
            .max_lifetime(IN_MEMORY_CONNECTION_TTL);
    } else {
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600));
    }
    opt
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url
                .trim_start_matches("sqlite://")
                .trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let opt = pool_options(db_url, max_connections, min_connections, in_memory);
        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn catalog_repo(&self) -> repositories::catalog::CatalogRepository {
        repositories::catalog::CatalogRepository::new(self.conn.clone())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    fn watchlist_repo(&self) -> repositories::watchlist::WatchlistRepository {
        repositories::watchlist::WatchlistRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn legacy_user_repo(&self) -> repositories::legacy_user::LegacyUserRepository {
        repositories::legacy_user::LegacyUserRepository::new(self.conn.clone())
    }

    pub async fn create_genre(&self, name: &str) -> Result<NamedEntry<genre::Model>> {
        self.catalog_repo().create_genre(name).await
    }

    pub async fn create_actor(&self, name: &str) -> Result<NamedEntry<actor::Model>> {
        self.catalog_repo().create_actor(name).await
    }

    pub async fn delete_genre(&self, id: i32) -> Result<Option<genre::Model>> {
        self.catalog_repo().delete_genre(id).await
    }

    pub async fn delete_actor(&self, id: i32) -> Result<Option<actor::Model>> {
        self.catalog_repo().delete_actor(id).await
    }

    pub async fn create_movie(&self, input: &MovieInput) -> Result<MovieRecord> {
        self.movie_repo().create(input).await
    }

    pub async fn get_movie(&self, id: i32) -> Result<Option<MovieRecord>> {
        self.movie_repo().get(id).await
    }

    pub async fn list_movies(&self) -> Result<Vec<MovieRecord>> {
        self.movie_repo().list().await
    }

    pub async fn get_movie_genres(&self, id: i32) -> Result<Option<Vec<genre::Model>>> {
        self.movie_repo().get_genres(id).await
    }

    pub async fn get_movie_actors(&self, id: i32) -> Result<Option<Vec<actor::Model>>> {
        self.movie_repo().get_actors(id).await
    }

    pub async fn update_movie(&self, id: i32, input: &MovieInput) -> Result<Option<MovieRecord>> {
        self.movie_repo().update(id, input).await
    }

    pub async fn delete_movie(&self, id: i32) -> Result<Option<MovieRecord>> {
        self.movie_repo().delete(id).await
    }

    pub async fn get_watchlist(&self, user_id: Uuid) -> Result<Vec<MovieRecord>> {
        self.watchlist_repo().list(user_id).await
    }

    pub async fn replace_watchlist(
        &self,
        user_id: Uuid,
        movie_ids: &[i32],
    ) -> Result<Vec<MovieRecord>> {
        self.watchlist_repo().replace(user_id, movie_ids).await
    }

    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        config: &SecurityConfig,
    ) -> Result<User> {
        self.user_repo().create(email, password, config).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn get_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn verify_user_password(&self, email: &str, password: &str) -> Result<Option<User>> {
        self.user_repo().verify_password(email, password).await
    }

    pub async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>> {
        self.user_repo().verify_api_key(api_key).await
    }

    pub async fn regenerate_user_api_key(&self, id: Uuid) -> Result<String> {
        self.user_repo().regenerate_api_key(id).await
    }

    pub async fn create_legacy_user(&self, name: &str, email: &str) -> Result<legacy_users::Model> {
        self.legacy_user_repo().create(name, email).await
    }

    pub async fn get_legacy_user(&self, id: i32) -> Result<Option<legacy_users::Model>> {
        self.legacy_user_repo().get(id).await
    }

    pub async fn update_legacy_user(
        &self,
        id: i32,
        name: &str,
        email: &str,
    ) -> Result<Option<legacy_users::Model>> {
        self.legacy_user_repo().update(id, name, email).await
    }

    pub async fn delete_legacy_user(&self, id: i32) -> Result<Option<legacy_users::Model>> {
        self.legacy_user_repo().delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{movie_genre, prelude::*};
    use chrono::NaiveDate;
    use sea_orm::EntityTrait;

    #[test]
    fn in_memory_pool_keeps_its_only_connection() {
        let opt = pool_options("sqlite::memory:", 5, 1, true);
        assert_eq!(opt.get_max_connections(), Some(1));
        assert_eq!(opt.get_min_connections(), Some(1));
        assert_eq!(opt.get_max_lifetime(), Some(IN_MEMORY_CONNECTION_TTL));
        assert_eq!(opt.get_idle_timeout(), Some(IN_MEMORY_CONNECTION_TTL));

        let opt = pool_options("sqlite:data/catalog.db", 5, 1, false);
        assert_eq!(opt.get_max_connections(), Some(5));
        assert_eq!(opt.get_max_lifetime(), Some(Duration::from_secs(600)));
    }

    #[tokio::test]
    async fn create_genre_is_idempotent_by_name() {
        let store = Store::new("sqlite::memory:").await.unwrap();

        let NamedEntry::Created(first) = store.create_genre("Drama").await.unwrap() else {
            panic!("expected a new genre");
        };
        let NamedEntry::Existing(rows) = store.create_genre("Drama").await.unwrap() else {
            panic!("expected the existing genre");
        };

        assert_eq!(rows, vec![first.clone()]);
        assert_eq!(Genre::find().all(&store.conn).await.unwrap().len(), 1);

        // Exact match only
        assert!(matches!(
            store.create_genre("drama").await.unwrap(),
            NamedEntry::Created(_)
        ));
    }

    #[tokio::test]
    async fn deleting_genre_keeps_movie_and_other_links() {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let NamedEntry::Created(drama) = store.create_genre("Drama").await.unwrap() else {
            panic!("fresh database");
        };
        let NamedEntry::Created(crime) = store.create_genre("Crime").await.unwrap() else {
            panic!("fresh database");
        };

        let movie = store
            .create_movie(&MovieInput {
                tmdb_id: 238,
                imdb_id: "tt0068646".to_string(),
                kinopoisk_id: 325,
                localized_title: "Крёстный отец".to_string(),
                original_title: "The Godfather".to_string(),
                original_language: "en".to_string(),
                overview: "The aging patriarch of a crime dynasty.".to_string(),
                release_date: NaiveDate::from_ymd_opt(1972, 3, 14).unwrap(),
                genres: vec![drama.id, crime.id],
                actors: vec![],
            })
            .await
            .unwrap();

        let removed = store.delete_genre(drama.id).await.unwrap();
        assert_eq!(removed, Some(drama));

        let links = MovieGenre::find().all(&store.conn).await.unwrap();
        assert_eq!(
            links,
            vec![movie_genre::Model {
                movie_id: movie.movie.id,
                genre_id: crime.id,
            }]
        );

        let reloaded = store.get_movie(movie.movie.id).await.unwrap().unwrap();
        assert_eq!(reloaded.genre_ids(), vec![crime.id]);
    }
}
