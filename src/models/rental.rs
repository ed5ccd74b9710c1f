// src/models/rental.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::{
    models::{customer::Customer, movie::Movie},
    utils::object_id::{new_object_id, validate_object_id},
};

/// Represents the 'rentals' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    #[serde(rename = "_id")]
    pub id: String,

    #[sqlx(json)]
    pub customer: CustomerSnapshot,

    #[sqlx(json)]
    pub movie: MovieSnapshot,

    pub date_out: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_returned: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rental_fee: Option<f64>,
}

impl Rental {
    /// Starts a rental now. Return date and fee stay empty.
    pub fn checkout(customer: &Customer, movie: &Movie) -> Self {
        Self {
            id: new_object_id(),
            customer: CustomerSnapshot::from(customer),
            movie: MovieSnapshot::from(movie),
            date_out: Utc::now(),
            date_returned: None,
            rental_fee: None,
        }
    }
}

/// Customer as it was when the rental was made. Not kept in sync.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSnapshot {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub is_gold: bool,
}

impl From<&Customer> for CustomerSnapshot {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.clone(),
            name: customer.name.clone(),
            phone: customer.phone.clone(),
            is_gold: customer.is_gold,
        }
    }
}

/// Movie as it was when the rental was made. Not kept in sync.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieSnapshot {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub daily_rental_rate: f64,
}

impl From<&Movie> for MovieSnapshot {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id.clone(),
            title: movie.title.clone(),
            daily_rental_rate: movie.daily_rental_rate,
        }
    }
}

/// DTO for renting a movie.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RentalRequest {
    #[validate(custom(function = validate_object_id, message = "\"customerId\" must be a valid ID."))]
    pub customer_id: String,
    #[validate(custom(function = validate_object_id, message = "\"movieId\" must be a valid ID."))]
    pub movie_id: String,
}
