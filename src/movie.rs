//! Movie types
//!
//! - `Movie`: the seven free-text fields of a record
//! - `MovieRecord`: a persisted row (id + fields)
//! - `MovieSummary`: the id and name shown in list views
//! - `MovieForm`: an editable working copy, id absent until first save

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store-assigned identifier of a movie row (`_id` column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(i64);

impl MovieId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for MovieId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MovieId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

impl ToSql for MovieId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for MovieId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(Self)
    }
}

/// The free-text fields of a movie. Only `name` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub name: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub writer: String,
    #[serde(default)]
    pub actor: String,
    #[serde(default)]
    pub actress: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub year: String,
}

impl Movie {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = director.into();
        self
    }

    pub fn with_writer(mut self, writer: impl Into<String>) -> Self {
        self.writer = writer.into();
        self
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }

    pub fn with_actress(mut self, actress: impl Into<String>) -> Self {
        self.actress = actress.into();
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    /// True when the name is non-empty after trimming whitespace.
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Field labels paired with values, in display order.
    pub fn fields(&self) -> [(&'static str, &str); 7] {
        [
            ("Name", self.name.as_str()),
            ("Director", self.director.as_str()),
            ("Writer", self.writer.as_str()),
            ("Actor", self.actor.as_str()),
            ("Actress", self.actress.as_str()),
            ("Genre", self.genre.as_str()),
            ("Year", self.year.as_str()),
        ]
    }
}

/// A persisted movie row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    #[serde(flatten)]
    pub movie: Movie,
}

/// One row of the movie list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: MovieId,
    pub name: String,
}

/// Working values of a movie being added or edited.
///
/// Not authoritative until a save completes. `id` is `None` for a movie
/// that has never been saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieForm {
    pub id: Option<MovieId>,
    #[serde(flatten)]
    pub movie: Movie,
}

impl MovieForm {
    pub fn new(movie: Movie) -> Self {
        Self { id: None, movie }
    }

    pub fn for_existing(id: MovieId, movie: Movie) -> Self {
        Self { id: Some(id), movie }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

impl From<MovieRecord> for MovieForm {
    fn from(record: MovieRecord) -> Self {
        Self::for_existing(record.id, record.movie)
    }
}
