// src/handlers/movies.rs

use axum::{Json, extract::State, response::IntoResponse};
use sqlx::{SqlitePool, types::Json as SqlJson};

use crate::{
    error::AppError,
    handlers::genres::find_genre,
    models::{
        genre::GenreSnapshot,
        movie::{Movie, MovieRequest},
    },
    utils::{object_id::{ObjectIdPath, new_object_id}, validation::ValidatedJson},
};

const NOT_FOUND: &str = "The movie with the given ID was not found.";

const MOVIE_COLUMNS: &str = "id, title, genre, number_in_stock, daily_rental_rate";

pub async fn list_movies(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let movies: Vec<Movie> =
        sqlx::query_as(&format!("SELECT {MOVIE_COLUMNS} FROM movies ORDER BY title"))
            .fetch_all(&pool)
            .await?;

    Ok(Json(movies))
}

pub async fn get_movie(
    State(pool): State<SqlitePool>,
    ObjectIdPath(id): ObjectIdPath,
) -> Result<impl IntoResponse, AppError> {
    let movie = find_movie(&pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    Ok(Json(movie))
}

/// Creates a movie, embedding a snapshot of the referenced genre.
pub async fn create_movie(
    State(pool): State<SqlitePool>,
    ValidatedJson(payload): ValidatedJson<MovieRequest>,
) -> Result<impl IntoResponse, AppError> {
    let genre = resolve_genre(&pool, &payload.genre_id).await?;

    let movie = Movie {
        id: new_object_id(),
        title: payload.title,
        genre,
        number_in_stock: payload.number_in_stock,
        daily_rental_rate: payload.daily_rental_rate,
    };

    sqlx::query(
        r#"
        INSERT INTO movies (id, title, genre, number_in_stock, daily_rental_rate)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&movie.id)
    .bind(&movie.title)
    .bind(SqlJson(&movie.genre))
    .bind(movie.number_in_stock)
    .bind(movie.daily_rental_rate)
    .execute(&pool)
    .await?;

    tracing::info!("Created movie {} ({})", movie.id, movie.title);

    Ok(Json(movie))
}

/// Replaces a movie's fields and re-snapshots its genre.
pub async fn update_movie(
    State(pool): State<SqlitePool>,
    ObjectIdPath(id): ObjectIdPath,
    payload: Result<ValidatedJson<MovieRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    if find_movie(&pool, &id).await?.is_none() {
        return Err(AppError::NotFound(NOT_FOUND.to_string()));
    }
    let ValidatedJson(payload) = payload?;
    let genre = resolve_genre(&pool, &payload.genre_id).await?;

    let movie: Movie = sqlx::query_as(&format!(
        r#"
        UPDATE movies
        SET title = ?, genre = ?, number_in_stock = ?, daily_rental_rate = ?
        WHERE id = ?
        RETURNING {MOVIE_COLUMNS}
        "#
    ))
    .bind(&payload.title)
    .bind(SqlJson(&genre))
    .bind(payload.number_in_stock)
    .bind(payload.daily_rental_rate)
    .bind(&id)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    Ok(Json(movie))
}

/// Deletes a movie. Rentals keep their embedded copy.
/// Admin only.
pub async fn delete_movie(
    State(pool): State<SqlitePool>,
    ObjectIdPath(id): ObjectIdPath,
) -> Result<impl IntoResponse, AppError> {
    let movie: Movie = sqlx::query_as(&format!(
        "DELETE FROM movies WHERE id = ? RETURNING {MOVIE_COLUMNS}"
    ))
    .bind(&id)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    tracing::info!("Deleted movie {}", movie.id);

    Ok(Json(movie))
}

/// Looks up `genreId` and copies it into a snapshot. An unknown genre is a 400.
async fn resolve_genre(pool: &SqlitePool, genre_id: &str) -> Result<GenreSnapshot, AppError> {
    let genre = find_genre(pool, &genre_id.to_ascii_lowercase())
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid genre.".to_string()))?;

    Ok(GenreSnapshot::from(&genre))
}

pub async fn find_movie(pool: &SqlitePool, id: &str) -> Result<Option<Movie>, AppError> {
    let movie: Option<Movie> =
        sqlx::query_as(&format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(movie)
}
