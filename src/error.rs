use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub const PHONE_TAKEN: &str = "This phone number is already registered.";
pub const EMAIL_TAKEN: &str = "This email address is already registered.";
const DUPLICATE_FALLBACK: &str = "An account with these details already exists.";
const INTERNAL_MESSAGE: &str = "Something went wrong. Please try again.";

/// Request-level errors; every variant maps to one HTTP status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // Conflicts share the 400 status with validation failures; the
            // message carries the field-specific detail.
            ApiError::Validation(msg) | ApiError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(err) => {
                error!(error = %err, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Covers the register pre-check/insert race: a unique violation that slips
/// past the explicit existence checks gets the same field-specific message.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return ApiError::Conflict(duplicate_message(db.constraint()).to_string());
            }
        }
        ApiError::Internal(err.into())
    }
}

fn duplicate_message(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("users_phone_key") => PHONE_TAKEN,
        Some("users_email_key") => EMAIL_TAKEN,
        _ => DUPLICATE_FALLBACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(
            ApiError::Validation("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Auth("x".into()).into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom"))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn duplicate_messages_are_field_specific() {
        assert_eq!(duplicate_message(Some("users_phone_key")), PHONE_TAKEN);
        assert_eq!(duplicate_message(Some("users_email_key")), EMAIL_TAKEN);
        assert_eq!(duplicate_message(Some("users_pkey")), DUPLICATE_FALLBACK);
        assert_eq!(duplicate_message(None), DUPLICATE_FALLBACK);
    }
}
