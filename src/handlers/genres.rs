// src/handlers/genres.rs

use axum::{Json, extract::State, response::IntoResponse};
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::genre::{Genre, GenreRequest},
    utils::{object_id::{ObjectIdPath, new_object_id}, validation::ValidatedJson},
};

const NOT_FOUND: &str = "The genre with the given ID was not found.";

/// Lists all genres ordered by name.
pub async fn list_genres(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let genres: Vec<Genre> = sqlx::query_as("SELECT id, name FROM genres ORDER BY name")
        .fetch_all(&pool)
        .await?;

    Ok(Json(genres))
}

/// Retrieves a single genre by ID.
pub async fn get_genre(
    State(pool): State<SqlitePool>,
    ObjectIdPath(id): ObjectIdPath,
) -> Result<impl IntoResponse, AppError> {
    let genre = find_genre(&pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    Ok(Json(genre))
}

pub async fn create_genre(
    State(pool): State<SqlitePool>,
    ValidatedJson(payload): ValidatedJson<GenreRequest>,
) -> Result<impl IntoResponse, AppError> {
    let genre = Genre {
        id: new_object_id(),
        name: payload.name,
    };

    sqlx::query("INSERT INTO genres (id, name) VALUES (?, ?)")
        .bind(&genre.id)
        .bind(&genre.name)
        .execute(&pool)
        .await?;

    tracing::info!("Created genre {} ({})", genre.id, genre.name);

    Ok(Json(genre))
}

/// Replaces a genre's name.
///
/// Existence is checked before the body so an unknown id is always 404.
/// Movies keep whatever genre name they embedded at write time.
pub async fn update_genre(
    State(pool): State<SqlitePool>,
    ObjectIdPath(id): ObjectIdPath,
    payload: Result<ValidatedJson<GenreRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    if find_genre(&pool, &id).await?.is_none() {
        return Err(AppError::NotFound(NOT_FOUND.to_string()));
    }
    let ValidatedJson(payload) = payload?;

    let genre: Genre = sqlx::query_as("UPDATE genres SET name = ? WHERE id = ? RETURNING id, name")
        .bind(&payload.name)
        .bind(&id)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    Ok(Json(genre))
}

/// Deletes a genre and echoes it back.
/// Admin only.
pub async fn delete_genre(
    State(pool): State<SqlitePool>,
    ObjectIdPath(id): ObjectIdPath,
) -> Result<impl IntoResponse, AppError> {
    let genre: Genre = sqlx::query_as("DELETE FROM genres WHERE id = ? RETURNING id, name")
        .bind(&id)
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    tracing::info!("Deleted genre {}", genre.id);

    Ok(Json(genre))
}

/// Shared lookup, also used to resolve a movie's `genreId`.
pub async fn find_genre(pool: &SqlitePool, id: &str) -> Result<Option<Genre>, AppError> {
    let genre: Option<Genre> = sqlx::query_as("SELECT id, name FROM genres WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(genre)
}
