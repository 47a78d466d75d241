//! The older `/user` CRUD module.
//!
//! Every response is a JSON list: one element when the record exists, empty
//! when it does not. There is no 404 on this surface.

use axum::{Json, extract::State};
use std::sync::Arc;

use super::extract::{ApiJson, ApiPath};
use super::types::{LegacyUserDto, LegacyUserRead};
use super::{ApiError, AppState};

fn as_list(row: Option<crate::entities::legacy_users::Model>) -> Json<Vec<LegacyUserRead>> {
    Json(row.map(LegacyUserRead::from).into_iter().collect())
}

/// `POST /user/`
pub async fn create(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<LegacyUserDto>,
) -> Result<Json<Vec<LegacyUserRead>>, ApiError> {
    let created = state.store().create_legacy_user(&payload.name, &payload.email).await?;
    Ok(as_list(Some(created)))
}

/// `GET /user/{id}`
pub async fn get(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Vec<LegacyUserRead>>, ApiError> {
    Ok(as_list(state.store().get_legacy_user(id).await?))
}

/// `PUT /user/{id}`
pub async fn update(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<LegacyUserDto>,
) -> Result<Json<Vec<LegacyUserRead>>, ApiError> {
    let updated = state
        .store()
        .update_legacy_user(id, &payload.name, &payload.email)
        .await?;
    Ok(as_list(updated))
}

/// `DELETE /user/{id}`
pub async fn remove(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Vec<LegacyUserRead>>, ApiError> {
    Ok(as_list(state.store().delete_legacy_user(id).await?))
}
