use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use movie_tracker::config::Config;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();

    let state = movie_tracker::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    movie_tracker::api::router(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("Content-Type", mime::APPLICATION_JSON.as_ref());
            Body::from(serde_json::to_vec(&value).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn matrix(genres: &[i64], actors: &[i64]) -> Value {
    json!({
        "tmdb_id": 603,
        "imdb_id": "tt0133093",
        "kinopoisk_id": 301,
        "localized_title": "Матрица",
        "original_title": "The Matrix",
        "original_language": "en",
        "overview": "A hacker learns the world is a simulation.",
        "release_date": "1999-03-31",
        "genres": genres,
        "actors": actors,
    })
}

async fn add(app: &Router, uri: &str, name: &str) -> i64 {
    let (status, body) = send(app, Method::POST, uri, Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_add_genre_twice_returns_duplicate_notice() {
    let app = spawn_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/movies/add-genre",
        Some(json!({"name": "Sci-Fi"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "name": "Sci-Fi"}));

    let (status, body) = send(
        &app,
        Method::POST,
        "/movies/add-genre",
        Some(json!({"name": "Sci-Fi"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "message": "Genre 'Sci-Fi' already in table",
            "Genre": [{"id": 1, "name": "Sci-Fi"}]
        })
    );
}

#[tokio::test]
async fn test_add_actor_twice_returns_genre_worded_notice() {
    let app = spawn_app().await;
    let id = add(&app, "/movies/add-actor", "Carrie-Anne Moss").await;

    let (_, body) = send(
        &app,
        Method::POST,
        "/movies/add-actor",
        Some(json!({"name": "Carrie-Anne Moss"})),
    )
    .await;
    // Actor notices share the genre wording and key
    assert_eq!(
        body,
        json!({
            "message": "Genre 'Carrie-Anne Moss' already in table",
            "Genre": [{"id": id, "name": "Carrie-Anne Moss"}]
        })
    );
}

#[tokio::test]
async fn test_invalid_payloads_are_422() {
    let app = spawn_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/movies/add-genre",
        Some(json!({"name": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["message"].is_string());

    let mut payload = matrix(&[], &[]);
    payload["tmdb_id"] = json!("not a number");
    let (status, _) = send(&app, Method::POST, "/movies/add-movie", Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, Method::GET, "/movies/movie-details", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, Method::GET, "/movies/movie-details?movie_id=0", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_movie_round_trip_through_details() {
    let app = spawn_app().await;
    let sci_fi = add(&app, "/movies/add-genre", "Sci-Fi").await;
    let action = add(&app, "/movies/add-genre", "Action").await;
    let keanu = add(&app, "/movies/add-actor", "Keanu Reeves").await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/movies/add-movie",
        Some(matrix(&[sci_fi, action], &[keanu])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let movie_id = created["id"].as_i64().unwrap();

    let (status, details) = send(
        &app,
        Method::GET,
        &format!("/movies/movie-details?movie_id={movie_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(details, created);
    assert_eq!(details["localized_title"], "Матрица");
    assert_eq!(details["release_date"], "1999-03-31");
    assert_eq!(
        details["genres"],
        json!([{"id": sci_fi, "name": "Sci-Fi"}, {"id": action, "name": "Action"}])
    );
    assert_eq!(details["actors"], json!([{"id": keanu, "name": "Keanu Reeves"}]));

    let (_, genres) = send(
        &app,
        Method::GET,
        &format!("/movies/movie-genres?movie_id={movie_id}"),
        None,
    )
    .await;
    assert_eq!(genres, details["genres"]);

    let (_, actors) = send(
        &app,
        Method::GET,
        &format!("/movies/movie-actors?movie_id={movie_id}"),
        None,
    )
    .await;
    assert_eq!(actors, details["actors"]);
}

#[tokio::test]
async fn test_dangling_ids_are_dropped() {
    let app = spawn_app().await;
    let drama = add(&app, "/movies/add-genre", "Drama").await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/movies/add-movie",
        Some(matrix(&[drama, 999], &[42])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["genres"], json!([{"id": drama, "name": "Drama"}]));
    assert_eq!(created["actors"], json!([]));
}

#[tokio::test]
async fn test_update_replaces_associations() {
    let app = spawn_app().await;
    let first = add(&app, "/movies/add-actor", "Keanu Reeves").await;
    let second = add(&app, "/movies/add-actor", "Laurence Fishburne").await;
    let third = add(&app, "/movies/add-actor", "Hugo Weaving").await;
    let genre = add(&app, "/movies/add-genre", "Sci-Fi").await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/movies/add-movie",
        Some(matrix(&[genre], &[first, second])),
    )
    .await;
    let movie_id = created["id"].as_i64().unwrap();

    let mut payload = matrix(&[], &[second, third]);
    payload["overview"] = json!("Updated overview.");
    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/movies/update-movie?movie_id={movie_id}"),
        Some(payload),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], movie_id);
    assert_eq!(updated["overview"], "Updated overview.");
    assert_eq!(updated["genres"], json!([]));

    let ids: Vec<i64> = updated["actors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![second, third]);
}

#[tokio::test]
async fn test_missing_movie_is_404_everywhere() {
    let app = spawn_app().await;

    for (method, uri) in [
        (Method::GET, "/movies/movie-details?movie_id=77"),
        (Method::GET, "/movies/movie-genres?movie_id=77"),
        (Method::GET, "/movies/movie-actors?movie_id=77"),
        (Method::DELETE, "/movies/remove-movie?movie_id=77"),
        (Method::DELETE, "/movies/remove-genre?genre_id=77"),
        (Method::DELETE, "/movies/remove-actor?actor_id=77"),
    ] {
        let (status, body) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, json!({"message": "No result found."}));
    }

    let (status, body) = send(
        &app,
        Method::PUT,
        "/movies/update-movie?movie_id=77",
        Some(matrix(&[], &[])),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No result found.");
}

#[tokio::test]
async fn test_remove_movie_returns_snapshot() {
    let app = spawn_app().await;
    let genre = add(&app, "/movies/add-genre", "Sci-Fi").await;
    let actor = add(&app, "/movies/add-actor", "Keanu Reeves").await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/movies/add-movie",
        Some(matrix(&[genre], &[actor])),
    )
    .await;
    let movie_id = created["id"].as_i64().unwrap();

    let (status, removed) = send(
        &app,
        Method::DELETE,
        &format!("/movies/remove-movie?movie_id={movie_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed, created);

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/movies/movie-details?movie_id={movie_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Genre and actor rows survive the movie
    let (_, body) = send(
        &app,
        Method::POST,
        "/movies/add-genre",
        Some(json!({"name": "Sci-Fi"})),
    )
    .await;
    assert_eq!(body["Genre"][0]["id"], genre);
}

#[tokio::test]
async fn test_remove_genre_only_unlinks_that_genre() {
    let app = spawn_app().await;
    let drama = add(&app, "/movies/add-genre", "Drama").await;
    let crime = add(&app, "/movies/add-genre", "Crime").await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/movies/add-movie",
        Some(matrix(&[drama, crime], &[])),
    )
    .await;
    let movie_id = created["id"].as_i64().unwrap();

    let (status, removed) = send(
        &app,
        Method::DELETE,
        &format!("/movies/remove-genre?genre_id={drama}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed, json!({"id": drama, "name": "Drama"}));

    let (_, genres) = send(
        &app,
        Method::GET,
        &format!("/movies/movie-genres?movie_id={movie_id}"),
        None,
    )
    .await;
    assert_eq!(genres, json!([{"id": crime, "name": "Crime"}]));
}
