// src/utils/object_id.rs

use std::sync::LazyLock;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use chrono::Utc;
use regex::Regex;
use uuid::Uuid;

use crate::error::AppError;

static OBJECT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{24}$").expect("static regex"));

/// Generates a 24-hex-character identifier: 4 bytes of big-endian seconds
/// since the epoch followed by 8 random bytes.
pub fn new_object_id() -> String {
    let seconds = Utc::now().timestamp() as u32;
    let random = Uuid::new_v4().simple().to_string();
    format!("{:08x}{}", seconds, &random[..16])
}

pub fn is_valid_object_id(value: &str) -> bool {
    OBJECT_ID_RE.is_match(value)
}

/// `validator` hook for id references carried in request bodies.
pub fn validate_object_id(value: &str) -> Result<(), validator::ValidationError> {
    if !is_valid_object_id(value) {
        return Err(validator::ValidationError::new("object_id"));
    }
    Ok(())
}

/// Path extractor for `/{id}` segments.
///
/// Rejects anything that is not identifier-shaped with 404 before a handler
/// gets to touch the store. The value is normalized to lower case.
#[derive(Debug, Clone)]
pub struct ObjectIdPath(pub String);

impl<S> FromRequestParts<S> for ObjectIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound("Invalid ID.".to_string()))?;

        if !is_valid_object_id(&id) {
            return Err(AppError::NotFound("Invalid ID.".to_string()));
        }

        Ok(ObjectIdPath(id.to_ascii_lowercase()))
    }
}
