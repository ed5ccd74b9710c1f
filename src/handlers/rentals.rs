// src/handlers/rentals.rs

use axum::{Json, extract::State, response::IntoResponse};
use sqlx::{SqlitePool, types::Json as SqlJson};

use crate::{
    error::AppError,
    handlers::{customers::find_customer, movies::find_movie},
    models::rental::{Rental, RentalRequest},
    utils::{object_id::ObjectIdPath, validation::ValidatedJson},
};

const RENTAL_COLUMNS: &str = "id, customer, movie, date_out, date_returned, rental_fee";

/// Lists all rentals, most recent first.
pub async fn list_rentals(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let rentals: Vec<Rental> = sqlx::query_as(&format!(
        "SELECT {RENTAL_COLUMNS} FROM rentals ORDER BY julianday(date_out) DESC"
    ))
    .fetch_all(&pool)
    .await?;

    Ok(Json(rentals))
}

pub async fn get_rental(
    State(pool): State<SqlitePool>,
    ObjectIdPath(id): ObjectIdPath,
) -> Result<impl IntoResponse, AppError> {
    let rental: Rental =
        sqlx::query_as(&format!("SELECT {RENTAL_COLUMNS} FROM rentals WHERE id = ?"))
            .bind(&id)
            .fetch_optional(&pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("The rental with the given ID was not found.".to_string())
            })?;

    Ok(Json(rental))
}

/// Rents a movie to a customer.
///
/// The stock check and the decrement are separate statements with no
/// transaction around them. Two concurrent rentals of the last copy can both
/// pass the check and drive `number_in_stock` to -1.
pub async fn create_rental(
    State(pool): State<SqlitePool>,
    ValidatedJson(payload): ValidatedJson<RentalRequest>,
) -> Result<impl IntoResponse, AppError> {
    let customer = find_customer(&pool, &payload.customer_id.to_ascii_lowercase())
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid customer.".to_string()))?;

    let movie = find_movie(&pool, &payload.movie_id.to_ascii_lowercase())
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid movie.".to_string()))?;

    if movie.number_in_stock <= 0 {
        return Err(AppError::BadRequest("Movie not in stock.".to_string()));
    }

    let rental = Rental::checkout(&customer, &movie);

    sqlx::query(
        r#"
        INSERT INTO rentals (id, customer, movie, date_out, date_returned, rental_fee)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&rental.id)
    .bind(SqlJson(&rental.customer))
    .bind(SqlJson(&rental.movie))
    .bind(rental.date_out)
    .bind(rental.date_returned)
    .bind(rental.rental_fee)
    .execute(&pool)
    .await?;

    sqlx::query("UPDATE movies SET number_in_stock = number_in_stock - 1 WHERE id = ?")
        .bind(&movie.id)
        .execute(&pool)
        .await?;

    tracing::info!(
        "Rental {} created: movie {} to customer {}",
        rental.id,
        movie.id,
        customer.id
    );

    Ok(Json(rental))
}
