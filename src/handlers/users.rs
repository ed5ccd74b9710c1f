// src/handlers/users.rs

use axum::{
    Json,
    extract::{Extension, State},
    http::HeaderName,
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{
    config::Config,
    error::AppError,
    models::user::{User, UserRequest},
    utils::{
        hash::hash_password,
        jwt::{AUTH_TOKEN_HEADER, Claims, sign_jwt},
        object_id::{ObjectIdPath, new_object_id},
        validation::ValidatedJson,
    },
};

const NOT_FOUND: &str = "The user with the given ID was not found.";

const USER_COLUMNS: &str = "id, name, email, password, is_admin";

/// Lists all users ordered by name.
/// Admin only.
pub async fn list_users(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let users: Vec<User> =
        sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY name"))
            .fetch_all(&pool)
            .await?;

    Ok(Json(users))
}

pub async fn get_user(
    State(pool): State<SqlitePool>,
    ObjectIdPath(id): ObjectIdPath,
) -> Result<impl IntoResponse, AppError> {
    let user = find_user(&pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    Ok(Json(user))
}

/// Returns the user the token was issued to.
pub async fn me(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user = find_user(&pool, &claims.sub)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    Ok(Json(user))
}

/// Registers a new user.
///
/// Hashes the password using Argon2 before storing it. The freshly signed token
/// is returned in the `x-auth-token` response header.
pub async fn register(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    ValidatedJson(payload): ValidatedJson<UserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = payload.email.to_lowercase();
    if find_user_by_email(&pool, &email).await?.is_some() {
        return Err(AppError::BadRequest("User already registered.".to_string()));
    }

    let user = User {
        id: new_object_id(),
        name: payload.name,
        email,
        password: hash_password(&payload.password)?,
        is_admin: false,
    };

    insert_user(&pool, &user).await.map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            AppError::BadRequest("User already registered.".to_string())
        }
        e => {
            tracing::error!("Failed to register user: {:?}", e);
            AppError::from(e)
        }
    })?;

    let token = sign_jwt(
        &user.id,
        user.is_admin,
        &config.jwt_secret,
        config.jwt_expiration,
    )?;

    tracing::info!("Registered user {}", user.id);

    Ok((
        [(HeaderName::from_static(AUTH_TOKEN_HEADER), token)],
        Json(user),
    ))
}

/// Replaces a user's name, email and password.
///
/// Callers may only update themselves unless they are admins. The ownership check
/// runs before the lookup, so non-owners get 403 whether or not the id exists.
pub async fn update_user(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    ObjectIdPath(id): ObjectIdPath,
    payload: Result<ValidatedJson<UserRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    if claims.sub != id && !claims.is_admin {
        return Err(AppError::Forbidden("Access denied.".to_string()));
    }
    if find_user(&pool, &id).await?.is_none() {
        return Err(AppError::NotFound(NOT_FOUND.to_string()));
    }
    let ValidatedJson(payload) = payload?;
    let email = payload.email.to_lowercase();

    if let Some(other) = find_user_by_email(&pool, &email).await? {
        if other.id != id {
            return Err(AppError::BadRequest("Email already in use.".to_string()));
        }
    }

    let hashed = hash_password(&payload.password)?;

    let user: User = sqlx::query_as(&format!(
        r#"
        UPDATE users SET name = ?, email = ?, password = ?
        WHERE id = ?
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(&payload.name)
    .bind(&email)
    .bind(&hashed)
    .bind(&id)
    .fetch_optional(&pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            AppError::BadRequest("Email already in use.".to_string())
        }
        e => AppError::from(e),
    })?
    .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    Ok(Json(user))
}

pub async fn insert_user(pool: &SqlitePool, user: &User) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO users (id, name, email, password, is_admin) VALUES (?, ?, ?, ?, ?)")
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.is_admin)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn find_user(pool: &SqlitePool, id: &str) -> Result<Option<User>, AppError> {
    let user: Option<User> =
        sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(user)
}

/// Emails are stored lower-cased, so the lookup ignores case.
pub async fn find_user_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<User>, AppError> {
    let user: Option<User> =
        sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
            .bind(email.to_lowercase())
            .fetch_optional(pool)
            .await?;

    Ok(user)
}
