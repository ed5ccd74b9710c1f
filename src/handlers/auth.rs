// src/handlers/auth.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;
use sqlx::SqlitePool;

use crate::{
    config::Config,
    error::AppError,
    handlers::users::find_user_by_email,
    models::user::LoginRequest,
    utils::{hash::verify_password, jwt::sign_jwt, validation::ValidatedJson},
};

/// Authenticates a user and returns a JWT token.
///
/// Unknown email and wrong password get the same answer.
pub async fn login(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let invalid = || AppError::BadRequest("Invalid email or password.".to_string());

    let user = find_user_by_email(&pool, &payload.email)
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&payload.password, &user.password)? {
        return Err(invalid());
    }

    let token = sign_jwt(
        &user.id,
        user.is_admin,
        &config.jwt_secret,
        config.jwt_expiration,
    )?;

    Ok(Json(json!({
        "token": token,
        "type": "Bearer",
    })))
}
