//! `SeaORM` implementation of the `MovieService` trait.

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::api::types::{ActorDto, GenreDto, MovieDto};
use crate::db::Store;
use crate::domain::MovieId;
use crate::models::movie::{MovieInput, NamedEntry};
use crate::services::movie_service::{MovieError, MovieService};

pub struct SeaOrmMovieService {
    store: Store,
}

impl SeaOrmMovieService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MovieService for SeaOrmMovieService {
    async fn add_genre(&self, name: &str) -> Result<NamedEntry<GenreDto>, MovieError> {
        let entry = self.store.create_genre(name).await?;
        Ok(entry.map(GenreDto::from))
    }

    async fn add_actor(&self, name: &str) -> Result<NamedEntry<ActorDto>, MovieError> {
        let entry = self.store.create_actor(name).await?;
        Ok(entry.map(ActorDto::from))
    }

    async fn remove_genre(&self, id: i32) -> Result<GenreDto, MovieError> {
        self.store
            .delete_genre(id)
            .await?
            .map(GenreDto::from)
            .ok_or(MovieError::GenreNotFound(id))
    }

    async fn remove_actor(&self, id: i32) -> Result<ActorDto, MovieError> {
        self.store
            .delete_actor(id)
            .await?
            .map(ActorDto::from)
            .ok_or(MovieError::ActorNotFound(id))
    }

    async fn add_movie(&self, input: MovieInput) -> Result<MovieDto, MovieError> {
        let record = self.store.create_movie(&input).await?;
        debug!(
            movie_id = record.movie.id,
            genres = ?record.genre_ids(),
            actors = ?record.actor_ids(),
            "Linked movie associations"
        );
        Ok(MovieDto::from(record))
    }

    async fn get_movie(&self, id: MovieId) -> Result<MovieDto, MovieError> {
        self.store
            .get_movie(id.value())
            .await?
            .map(MovieDto::from)
            .ok_or(MovieError::NotFound(id))
    }

    async fn get_movie_genres(&self, id: MovieId) -> Result<Vec<GenreDto>, MovieError> {
        let genres = self
            .store
            .get_movie_genres(id.value())
            .await?
            .ok_or(MovieError::NotFound(id))?;

        Ok(genres.into_iter().map(GenreDto::from).collect())
    }

    async fn get_movie_actors(&self, id: MovieId) -> Result<Vec<ActorDto>, MovieError> {
        let actors = self
            .store
            .get_movie_actors(id.value())
            .await?
            .ok_or(MovieError::NotFound(id))?;

        Ok(actors.into_iter().map(ActorDto::from).collect())
    }

    async fn update_movie(&self, id: MovieId, input: MovieInput) -> Result<MovieDto, MovieError> {
        self.store
            .update_movie(id.value(), &input)
            .await?
            .map(MovieDto::from)
            .ok_or(MovieError::NotFound(id))
    }

    async fn remove_movie(&self, id: MovieId) -> Result<MovieDto, MovieError> {
        self.store
            .delete_movie(id.value())
            .await?
            .map(MovieDto::from)
            .ok_or(MovieError::NotFound(id))
    }

    async fn get_watchlist(&self, user_id: Uuid) -> Result<Vec<MovieDto>, MovieError> {
        let movies = self.store.get_watchlist(user_id).await?;
        Ok(movies.into_iter().map(MovieDto::from).collect())
    }

    async fn replace_watchlist(
        &self,
        user_id: Uuid,
        movie_ids: &[i32],
    ) -> Result<Vec<MovieDto>, MovieError> {
        let movies = self.store.replace_watchlist(user_id, movie_ids).await?;
        Ok(movies.into_iter().map(MovieDto::from).collect())
    }
}
