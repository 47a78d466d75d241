use axum::{Extension, Json, extract::State};
use std::sync::Arc;

use super::extract::ApiJson;
use super::types::{MovieDto, WatchlistPutDto};
use super::{ApiError, AppState};
use crate::models::user::User;

/// `GET /users/me/watchlist`
pub async fn get_watchlist(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<MovieDto>>, ApiError> {
    Ok(Json(state.movie_service().get_watchlist(user.id).await?))
}

/// `PUT /users/me/watchlist`
///
/// Replaces the whole list; ids of movies that do not exist are skipped.
pub async fn replace_watchlist(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    ApiJson(payload): ApiJson<WatchlistPutDto>,
) -> Result<Json<Vec<MovieDto>>, ApiError> {
    let movies = state
        .movie_service()
        .replace_watchlist(user.id, &payload.movies)
        .await?;
    Ok(Json(movies))
}
