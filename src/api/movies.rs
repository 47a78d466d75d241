//! Movie catalog endpoints under `/movies`.
//!
//! Handlers only parse, validate and map; the work happens in [`MovieService`].
//!
//! [`MovieService`]: crate::services::MovieService

use axum::{Json, extract::State};
use serde::Deserialize;
use std::sync::Arc;

use super::extract::{ApiJson, ApiQuery};
use super::types::{ActorDto, AddNamedResponse, GenreDto, MovieDto, MoviePostDto, NamePostDto};
use super::validation::{validate_id, validate_movie_id, validate_name};
use super::{ApiError, AppState};
use crate::domain::CatalogKind;

#[derive(Debug, Deserialize)]
pub struct MovieIdQuery {
    pub movie_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct GenreIdQuery {
    pub genre_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct ActorIdQuery {
    pub actor_id: i32,
}

/// `POST /movies/add-genre`
///
/// Returns the new genre, or a duplicate notice carrying the existing rows.
pub async fn add_genre(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<NamePostDto>,
) -> Result<Json<AddNamedResponse<GenreDto>>, ApiError> {
    let name = validate_name("Genre", &payload.name)?;
    let entry = state.movie_service().add_genre(name).await?;
    Ok(Json(AddNamedResponse::new(CatalogKind::Genre, name, entry)))
}

/// `POST /movies/add-actor`
pub async fn add_actor(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<NamePostDto>,
) -> Result<Json<AddNamedResponse<ActorDto>>, ApiError> {
    let name = validate_name("Actor", &payload.name)?;
    let entry = state.movie_service().add_actor(name).await?;
    Ok(Json(AddNamedResponse::new(CatalogKind::Actor, name, entry)))
}

/// `POST /movies/add-movie`
pub async fn add_movie(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<MoviePostDto>,
) -> Result<Json<MovieDto>, ApiError> {
    let movie = state.movie_service().add_movie(payload.into()).await?;
    Ok(Json(movie))
}

/// `GET /movies/movie-details?movie_id=`
pub async fn movie_details(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<MovieIdQuery>,
) -> Result<Json<MovieDto>, ApiError> {
    let id = validate_movie_id(query.movie_id)?;
    Ok(Json(state.movie_service().get_movie(id).await?))
}

/// `GET /movies/movie-genres?movie_id=`
pub async fn movie_genres(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<MovieIdQuery>,
) -> Result<Json<Vec<GenreDto>>, ApiError> {
    let id = validate_movie_id(query.movie_id)?;
    Ok(Json(state.movie_service().get_movie_genres(id).await?))
}

/// `GET /movies/movie-actors?movie_id=`
pub async fn movie_actors(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<MovieIdQuery>,
) -> Result<Json<Vec<ActorDto>>, ApiError> {
    let id = validate_movie_id(query.movie_id)?;
    Ok(Json(state.movie_service().get_movie_actors(id).await?))
}

/// `PUT /movies/update-movie?movie_id=`
///
/// The genre and actor lists in the body replace the current ones.
pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<MovieIdQuery>,
    ApiJson(payload): ApiJson<MoviePostDto>,
) -> Result<Json<MovieDto>, ApiError> {
    let id = validate_movie_id(query.movie_id)?;
    let movie = state
        .movie_service()
        .update_movie(id, payload.into())
        .await?;
    Ok(Json(movie))
}

/// `DELETE /movies/remove-movie?movie_id=`
pub async fn remove_movie(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<MovieIdQuery>,
) -> Result<Json<MovieDto>, ApiError> {
    let id = validate_movie_id(query.movie_id)?;
    Ok(Json(state.movie_service().remove_movie(id).await?))
}

/// `DELETE /movies/remove-genre?genre_id=`
pub async fn remove_genre(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<GenreIdQuery>,
) -> Result<Json<GenreDto>, ApiError> {
    let id = validate_id("genre", query.genre_id)?;
    Ok(Json(state.movie_service().remove_genre(id).await?))
}

/// `DELETE /movies/remove-actor?actor_id=`
pub async fn remove_actor(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<ActorIdQuery>,
) -> Result<Json<ActorDto>, ApiError> {
    let id = validate_id("actor", query.actor_id)?;
    Ok(Json(state.movie_service().remove_actor(id).await?))
}
