use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::{actor, genre, movie};

/// Scalar movie fields plus the genre/actor id sets to link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieInput {
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

/// A movie row with its genre and actor associations loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRecord {
    pub movie: movie::Model,
    pub genres: Vec<genre::Model>,
    pub actors: Vec<actor::Model>,
}

impl MovieRecord {
    #[must_use]
    pub fn genre_ids(&self) -> Vec<i32> {
        self.genres.iter().map(|g| g.id).collect()
    }

    #[must_use]
    pub fn actor_ids(&self) -> Vec<i32> {
        self.actors.iter().map(|a| a.id).collect()
    }
}

/// Outcome of a create-by-name request for a genre or actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamedEntry<T> {
    Created(T),
    /// Rows with the requested name were already present; nothing was inserted.
    Existing(Vec<T>),
}

impl<T> NamedEntry<T> {
    pub fn map<U>(self, f: impl Fn(T) -> U) -> NamedEntry<U> {
        match self {
            Self::Created(row) => NamedEntry::Created(f(row)),
            Self::Existing(rows) => NamedEntry::Existing(rows.into_iter().map(f).collect()),
        }
    }
}
