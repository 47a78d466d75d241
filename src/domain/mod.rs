//! Strongly typed identifiers for the catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a movie row.
///
/// ```rust
/// use movie_tracker::domain::MovieId;
///
/// let id = MovieId::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MovieId(i32);

impl MovieId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<MovieId> for i32 {
    fn from(id: MovieId) -> Self {
        id.0
    }
}

impl From<i32> for MovieId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

/// The two name-keyed lookup tables a movie links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Genre,
    Actor,
}

impl CatalogKind {
    /// Label used in duplicate notices and log lines.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Genre => "Genre",
            Self::Actor => "Actor",
        }
    }

    /// Label written into duplicate notices. Deployed clients read notices
    /// from both tables under `Genre`.
    #[must_use]
    pub const fn notice_label(&self) -> &'static str {
        match self {
            Self::Genre | Self::Actor => "Genre",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_id_serializes_as_plain_number() {
        let id = MovieId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");

        let parsed: MovieId = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, id);
        assert_eq!(i32::from(parsed), 42);
    }

    #[test]
    fn catalog_kind_labels() {
        assert_eq!(CatalogKind::Genre.to_string(), "Genre");
        assert_eq!(CatalogKind::Actor.label(), "Actor");
        assert_eq!(CatalogKind::Actor.notice_label(), "Genre");
    }
}
