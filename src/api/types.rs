use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::domain::CatalogKind;
use crate::entities::{actor, genre, legacy_users};
use crate::models::movie::{MovieInput, MovieRecord, NamedEntry};
use crate::models::user::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreDto {
    pub id: i32,
    pub name: String,
}

impl From<genre::Model> for GenreDto {
    fn from(model: genre::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorDto {
    pub id: i32,
    pub name: String,
}

impl From<actor::Model> for ActorDto {
    fn from(model: actor::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

/// Body of `add-genre` and `add-actor`.
#[derive(Debug, Deserialize)]
pub struct NamePostDto {
    pub name: String,
}

/// Create/update payload for a movie. Genre and actor ids that do not exist
/// are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoviePostDto {
    pub tmdb_id: i32,
    pub imdb_id: String,
    pub kinopoisk_id: i32,
    pub localized_title: String,
    pub original_title: String,
    pub original_language: String,
    pub overview: String,
    pub release_date: NaiveDate,
    pub genres: Vec<i32>,
    pub actors: Vec<i32>,
}

impl From<MoviePostDto> for MovieInput {
    fn from(dto: MoviePostDto) -> Self {
        Self {
            tmdb_id: dto.tmdb_id,
            imdb_id: dto.imdb_id,
            kinopoisk_id: dto.kinopoisk_id,
            localized_title: dto.localized_title,
            original_title: dto.original_title,
            original_language: dto.original_language,
            overview: dto.overview,
            release_date: dto.release_date,
            genres: dto.genres,
            actors: dto.actors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDto {
    pub id: i32,
    pub tmdb_id: i32,
    pub imdb_id: String,
    pub kinopoisk_id: i32,
    pub localized_title: String,
    pub original_title: String,
    pub original_language: String,
    pub overview: String,
    pub release_date: NaiveDate,
    pub genres: Vec<GenreDto>,
    pub actors: Vec<ActorDto>,
}

impl From<MovieRecord> for MovieDto {
    fn from(record: MovieRecord) -> Self {
        let movie = record.movie;
        Self {
            id: movie.id,
            tmdb_id: movie.tmdb_id,
            imdb_id: movie.imdb_id,
            kinopoisk_id: movie.kinopoisk_id,
            localized_title: movie.localized_title,
            original_title: movie.original_title,
            original_language: movie.original_language,
            overview: movie.overview,
            release_date: movie.release_date,
            genres: record.genres.into_iter().map(GenreDto::from).collect(),
            actors: record.actors.into_iter().map(ActorDto::from).collect(),
        }
    }
}

/// Response of `add-genre`/`add-actor`: the new row, or a notice listing the
/// rows that already carry the name.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AddNamedResponse<T> {
    Created(T),
    Duplicate(DuplicateNotice<T>),
}

impl<T> AddNamedResponse<T> {
    pub fn new(kind: CatalogKind, name: &str, entry: NamedEntry<T>) -> Self {
        match entry {
            NamedEntry::Created(row) => Self::Created(row),
            NamedEntry::Existing(rows) => Self::Duplicate(DuplicateNotice {
                kind,
                name: name.to_string(),
                rows,
            }),
        }
    }
}

/// Serializes as `{"message": "Genre '<name>' already in table", "Genre": [...]}`
/// for either table.
#[derive(Debug)]
pub struct DuplicateNotice<T> {
    pub kind: CatalogKind,
    pub name: String,
    pub rows: Vec<T>,
}

impl<T: Serialize> Serialize for DuplicateNotice<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(
            "message",
            &format!("{} '{}' already in table", self.kind.notice_label(), self.name),
        )?;
        map.serialize_entry(self.kind.notice_label(), &self.rows)?;
        map.end()
    }
}

#[derive(Debug, Deserialize)]
pub struct WatchlistPutDto {
    pub movies: Vec<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UserCreateDto {
    pub email: String,
    pub password: String,
}

/// Public view of an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRead {
    pub id: Uuid,
    pub email: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub is_verified: bool,
}

impl From<User> for UserRead {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_active: user.is_active,
            is_superuser: user.is_superuser,
            is_verified: user.is_verified,
        }
    }
}

/// Form body of `POST /auth/jwt/login`; `username` carries the email.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BearerResponse {
    pub access_token: String,
    pub token_type: String,
}

impl BearerResponse {
    #[must_use]
    pub fn new(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LegacyUserDto {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyUserRead {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<legacy_users::Model> for LegacyUserRead {
    fn from(model: legacy_users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn duplicate_notice_uses_kind_as_key() {
        let existing = vec![GenreDto {
            id: 1,
            name: "Sci-Fi".to_string(),
        }];
        let response =
            AddNamedResponse::new(CatalogKind::Genre, "Sci-Fi", NamedEntry::Existing(existing));

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "message": "Genre 'Sci-Fi' already in table",
                "Genre": [{"id": 1, "name": "Sci-Fi"}]
            })
        );
    }

    #[test]
    fn actor_duplicate_notice_keeps_genre_wording() {
        let existing = vec![ActorDto {
            id: 1,
            name: "Neo".to_string(),
        }];
        let response =
            AddNamedResponse::new(CatalogKind::Actor, "Neo", NamedEntry::Existing(existing));

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "message": "Genre 'Neo' already in table",
                "Genre": [{"id": 1, "name": "Neo"}]
            })
        );
    }

    #[test]
    fn created_entry_is_bare() {
        let created = ActorDto {
            id: 3,
            name: "Keanu Reeves".to_string(),
        };
        let response =
            AddNamedResponse::new(CatalogKind::Actor, "Keanu Reeves", NamedEntry::Created(created));

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"id": 3, "name": "Keanu Reeves"})
        );
    }

    #[test]
    fn movie_payload_requires_association_lists() {
        let body = json!({
            "tmdb_id": 603,
            "imdb_id": "tt0133093",
            "kinopoisk_id": 301,
            "localized_title": "Матрица",
            "original_title": "The Matrix",
            "original_language": "en",
            "overview": "A hacker learns the truth.",
            "release_date": "1999-03-31"
        });

        assert!(serde_json::from_value::<MoviePostDto>(body).is_err());
    }

    #[test]
    fn release_date_is_iso_on_the_wire() {
        let dto = MovieDto {
            id: 1,
            tmdb_id: 603,
            imdb_id: "tt0133093".to_string(),
            kinopoisk_id: 301,
            localized_title: "Матрица".to_string(),
            original_title: "The Matrix".to_string(),
            original_language: "en".to_string(),
            overview: String::new(),
            release_date: NaiveDate::from_ymd_opt(1999, 3, 31).unwrap(),
            genres: vec![],
            actors: vec![],
        };

        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["release_date"], "1999-03-31");
    }
}
