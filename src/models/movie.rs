// src/models/movie.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::{models::genre::GenreSnapshot, utils::object_id::validate_object_id};

/// Represents the 'movies' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(rename = "_id")]
    pub id: String,

    pub title: String,

    /// Denormalized genre, stored as a JSON document in the row.
    #[sqlx(json)]
    pub genre: GenreSnapshot,

    pub number_in_stock: i64,

    pub daily_rental_rate: f64,
}

/// DTO for creating or replacing a movie.
///
/// The genre is referenced by id; the handler resolves it into a snapshot.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MovieRequest {
    #[validate(length(
        min = 5,
        max = 255,
        message = "\"title\" length must be between 5 and 255 characters."
    ))]
    pub title: String,
    #[validate(custom(function = validate_object_id, message = "\"genreId\" must be a valid ID."))]
    pub genre_id: String,
    #[validate(range(
        min = 0,
        max = 255,
        message = "\"numberInStock\" must be between 0 and 255."
    ))]
    pub number_in_stock: i64,
    #[validate(range(
        min = 0.0,
        max = 255.0,
        message = "\"dailyRentalRate\" must be between 0 and 255."
    ))]
    pub daily_rental_rate: f64,
}
