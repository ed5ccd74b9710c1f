// src/handlers/customers.rs

use axum::{Json, extract::State, response::IntoResponse};
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::customer::{Customer, CustomerRequest},
    utils::{object_id::{ObjectIdPath, new_object_id}, validation::ValidatedJson},
};

const NOT_FOUND: &str = "The customer with the given ID was not found.";

pub async fn list_customers(
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, AppError> {
    let customers: Vec<Customer> =
        sqlx::query_as("SELECT id, name, phone, is_gold FROM customers ORDER BY name")
            .fetch_all(&pool)
            .await?;

    Ok(Json(customers))
}

pub async fn get_customer(
    State(pool): State<SqlitePool>,
    ObjectIdPath(id): ObjectIdPath,
) -> Result<impl IntoResponse, AppError> {
    let customer = find_customer(&pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    Ok(Json(customer))
}

pub async fn create_customer(
    State(pool): State<SqlitePool>,
    ValidatedJson(payload): ValidatedJson<CustomerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let customer = Customer {
        id: new_object_id(),
        name: payload.name,
        phone: payload.phone,
        is_gold: payload.is_gold,
    };

    sqlx::query("INSERT INTO customers (id, name, phone, is_gold) VALUES (?, ?, ?, ?)")
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(customer.is_gold)
        .execute(&pool)
        .await?;

    tracing::info!("Created customer {}", customer.id);

    Ok(Json(customer))
}

pub async fn update_customer(
    State(pool): State<SqlitePool>,
    ObjectIdPath(id): ObjectIdPath,
    payload: Result<ValidatedJson<CustomerRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    if find_customer(&pool, &id).await?.is_none() {
        return Err(AppError::NotFound(NOT_FOUND.to_string()));
    }
    let ValidatedJson(payload) = payload?;

    let customer: Customer = sqlx::query_as(
        r#"
        UPDATE customers SET name = ?, phone = ?, is_gold = ?
        WHERE id = ?
        RETURNING id, name, phone, is_gold
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.phone)
    .bind(payload.is_gold)
    .bind(&id)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    Ok(Json(customer))
}

/// Deletes a customer. Rentals keep their embedded copy.
/// Admin only.
pub async fn delete_customer(
    State(pool): State<SqlitePool>,
    ObjectIdPath(id): ObjectIdPath,
) -> Result<impl IntoResponse, AppError> {
    let customer: Customer =
        sqlx::query_as("DELETE FROM customers WHERE id = ? RETURNING id, name, phone, is_gold")
            .bind(&id)
            .fetch_optional(&pool)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    tracing::info!("Deleted customer {}", customer.id);

    Ok(Json(customer))
}

pub async fn find_customer(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<Customer>, AppError> {
    let customer: Option<Customer> =
        sqlx::query_as("SELECT id, name, phone, is_gold FROM customers WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(customer)
}
