use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthService, MovieService};
use crate::state::SharedState;

pub mod auth;
mod error;
pub mod extract;
mod legacy_users;
mod movies;
mod observability;
mod system;
pub mod types;
mod validation;
mod watchlist;

pub use error::{ApiError, NO_RESULT_FOUND};

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.shared.store
    }

    #[must_use]
    pub fn movie_service(&self) -> &Arc<dyn MovieService> {
        &self.shared.movie_service
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = &state.config().server.cors_allowed_origins;

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .merge(movie_routes())
        .merge(legacy_user_routes())
        .merge(protected_routes(state.clone()))
        .route("/auth/register", post(auth::register))
        .route("/auth/jwt/login", post(auth::login))
        .route("/health", get(system::health))
        .route("/metrics", get(observability::get_metrics))
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

fn movie_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies/add-genre", post(movies::add_genre))
        .route("/movies/add-actor", post(movies::add_actor))
        .route("/movies/add-movie", post(movies::add_movie))
        .route("/movies/movie-details", get(movies::movie_details))
        .route("/movies/movie-genres", get(movies::movie_genres))
        .route("/movies/movie-actors", get(movies::movie_actors))
        .route("/movies/update-movie", put(movies::update_movie))
        .route("/movies/remove-movie", delete(movies::remove_movie))
        .route("/movies/remove-genre", delete(movies::remove_genre))
        .route("/movies/remove-actor", delete(movies::remove_actor))
}

fn legacy_user_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/user/", post(legacy_users::create))
        .route(
            "/user/{id}",
            get(legacy_users::get)
                .put(legacy_users::update)
                .delete(legacy_users::remove),
        )
}

fn protected_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/jwt/logout", post(auth::logout))
        .route(
            "/users/me/watchlist",
            get(watchlist::get_watchlist).put(watchlist::replace_watchlist),
        )
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
