// src/models/customer.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'customers' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub phone: String,
    /// Gold members get the discounted tier.
    pub is_gold: bool,
}

/// DTO for creating or replacing a customer.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    #[validate(length(
        min = 5,
        max = 50,
        message = "\"name\" length must be between 5 and 50 characters."
    ))]
    pub name: String,
    #[validate(length(
        min = 5,
        max = 50,
        message = "\"phone\" length must be between 5 and 50 characters."
    ))]
    pub phone: String,
    #[serde(default)]
    pub is_gold: bool,
}
