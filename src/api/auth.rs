use axum::{
    Extension, Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::extract::{ApiForm, ApiJson};
use super::types::{BearerResponse, LoginForm, UserCreateDto, UserRead};
use super::validation::{validate_email, validate_password};
use super::{ApiError, AppState};
use crate::models::user::User;

// ============================================================================
// Middleware
// ============================================================================

/// Resolves the caller from
/// 1. `Authorization: Bearer <token>` header
/// 2. `X-Api-Key` header
///
/// and stores the [`User`] as a request extension.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = extract_token(&headers) else {
        return Err(ApiError::unauthorized());
    };

    let Some(user) = state.auth_service().verify_token(&token).await? else {
        return Err(ApiError::unauthorized());
    };

    tracing::Span::current().record("user_id", tracing::field::display(user.id));
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(auth_header) = headers.get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        return Some(token.trim().to_string());
    }

    if let Some(api_key) = headers.get("X-Api-Key")
        && let Ok(key_str) = api_key.to_str()
    {
        return Some(key_str.trim().to_string());
    }

    None
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<UserCreateDto>,
) -> Result<(StatusCode, Json<UserRead>), ApiError> {
    let email = validate_email(&payload.email)?;
    let password = validate_password(
        &payload.password,
        state.config().security.min_password_length,
    )?;

    let user = state.auth_service().register(email, password).await?;
    Ok((StatusCode::CREATED, Json(UserRead::from(user))))
}

/// POST /auth/jwt/login
/// Form fields `username` (the email) and `password`; returns the bearer token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiForm(form): ApiForm<LoginForm>,
) -> Result<Json<BearerResponse>, ApiError> {
    if form.username.is_empty() || form.password.is_empty() {
        return Err(ApiError::validation("username and password are required"));
    }

    let login = state
        .auth_service()
        .login(form.username.trim(), &form.password)
        .await?;

    tracing::info!(user_id = %login.user_id, "User logged in");
    Ok(Json(BearerResponse::new(login.access_token)))
}

/// POST /auth/jwt/logout
/// Rotates the caller's token; the one used for this request stops working.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse, ApiError> {
    state.auth_service().logout(user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
