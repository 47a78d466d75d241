//! Domain service for the movie catalog: genres, actors, movies and watchlists.

use thiserror::Error;
use uuid::Uuid;

use crate::api::types::{ActorDto, GenreDto, MovieDto};
use crate::domain::MovieId;
use crate::models::movie::{MovieInput, NamedEntry};

#[derive(Debug, Error)]
pub enum MovieError {
    #[error("Movie not found: {0}")]
    NotFound(MovieId),

    #[error("Genre not found: {0}")]
    GenreNotFound(i32),

    #[error("Actor not found: {0}")]
    ActorNotFound(i32),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for MovieError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for MovieError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    /// Returns the new genre, or every genre that already has this exact name.
    async fn add_genre(&self, name: &str) -> Result<NamedEntry<GenreDto>, MovieError>;

    /// Actor counterpart of [`MovieService::add_genre`].
    async fn add_actor(&self, name: &str) -> Result<NamedEntry<ActorDto>, MovieError>;

    /// Deletes a genre and the links pointing at it.
    async fn remove_genre(&self, id: i32) -> Result<GenreDto, MovieError>;

    async fn remove_actor(&self, id: i32) -> Result<ActorDto, MovieError>;

    /// Inserts a movie with its links in one transaction.
    async fn add_movie(&self, input: MovieInput) -> Result<MovieDto, MovieError>;

    /// # Errors
    ///
    /// Returns [`MovieError::NotFound`] if no movie has this id.
    async fn get_movie(&self, id: MovieId) -> Result<MovieDto, MovieError>;

    async fn get_movie_genres(&self, id: MovieId) -> Result<Vec<GenreDto>, MovieError>;

    async fn get_movie_actors(&self, id: MovieId) -> Result<Vec<ActorDto>, MovieError>;

    /// Overwrites the scalar fields and replaces both link sets.
    async fn update_movie(&self, id: MovieId, input: MovieInput) -> Result<MovieDto, MovieError>;

    /// Deletes a movie and returns how it looked just before.
    async fn remove_movie(&self, id: MovieId) -> Result<MovieDto, MovieError>;

    async fn get_watchlist(&self, user_id: Uuid) -> Result<Vec<MovieDto>, MovieError>;

    /// Makes the watchlist exactly the existing movies among `movie_ids`.
    async fn replace_watchlist(
        &self,
        user_id: Uuid,
        movie_ids: &[i32],
    ) -> Result<Vec<MovieDto>, MovieError>;
}
