// src/seed.rs

use sqlx::SqlitePool;

use crate::{
    config::Config,
    error::AppError,
    handlers::users::{find_user_by_email, insert_user},
    models::user::User,
    utils::{hash::hash_password, object_id::new_object_id},
};

/// Creates the configured admin account on first start.
///
/// Does nothing unless both `ADMIN_EMAIL` and `ADMIN_PASSWORD` are set, or when a
/// user with that email already exists. Returns whether a user was inserted.
pub async fn seed_admin_user(pool: &SqlitePool, config: &Config) -> Result<bool, AppError> {
    let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) else {
        return Ok(false);
    };

    if find_user_by_email(pool, email).await?.is_some() {
        return Ok(false);
    }

    tracing::info!("Seeding admin user: {}", email);

    let admin = User {
        id: new_object_id(),
        name: config.admin_name.clone(),
        email: email.to_lowercase(),
        password: hash_password(password)?,
        is_admin: true,
    };
    insert_user(pool, &admin).await?;

    tracing::info!("Admin user created successfully.");
    Ok(true)
}
