// src/models/genre.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'genres' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// Copy of a genre embedded inside a movie.
///
/// Taken when the movie is written and never refreshed: renaming the genre
/// later leaves existing movies with the old name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenreSnapshot {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

impl From<&Genre> for GenreSnapshot {
    fn from(genre: &Genre) -> Self {
        Self {
            id: genre.id.clone(),
            name: genre.name.clone(),
        }
    }
}

/// DTO for creating or replacing a genre.
#[derive(Debug, Deserialize, Validate)]
pub struct GenreRequest {
    #[validate(length(
        min = 3,
        max = 50,
        message = "\"name\" length must be between 3 and 50 characters."
    ))]
    pub name: String,
}
