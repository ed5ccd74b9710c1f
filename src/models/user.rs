// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,

    pub name: String,

    /// Unique login email.
    pub email: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    pub is_admin: bool,
}

/// DTO for registration and for replacing a user's profile.
#[derive(Debug, Deserialize, Validate)]
pub struct UserRequest {
    #[validate(length(
        min = 5,
        max = 50,
        message = "\"name\" length must be between 5 and 50 characters."
    ))]
    pub name: String,
    #[validate(
        length(
            min = 5,
            max = 255,
            message = "\"email\" length must be between 5 and 255 characters."
        ),
        email(message = "\"email\" must be a valid email.")
    )]
    pub email: String,
    #[validate(length(
        min = 5,
        max = 255,
        message = "\"password\" length must be between 5 and 255 characters."
    ))]
    pub password: String,
}

/// DTO for user login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        length(min = 5, max = 255, message = "\"email\" length must be between 5 and 255 characters."),
        email(message = "\"email\" must be a valid email.")
    )]
    pub email: String,
    #[validate(length(
        min = 5,
        max = 255,
        message = "\"password\" length must be between 5 and 255 characters."
    ))]
    pub password: String,
}
