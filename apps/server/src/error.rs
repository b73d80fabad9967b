//! Mapping from core errors to HTTP responses.
//!
//! Expected business conditions come back as structured JSON with a stable
//! `code`; only genuinely unexpected failures surface as 500s.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use goodcare_core::checkins::CheckInError;
use goodcare_core::errors::{DatabaseError, Error};

pub type ApiResult<T> = std::result::Result<T, ApiError>;

pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            Error::CheckIn(CheckInError::AlreadyCheckedIn { next_eligible_at }) => (
                StatusCode::CONFLICT,
                json!({
                    "error": self.0.to_string(),
                    "code": "already_checked_in",
                    "nextEligibleAt": next_eligible_at,
                }),
            ),
            Error::CheckIn(CheckInError::DuplicateForDate(_))
            | Error::ConstraintViolation(_)
            | Error::Database(DatabaseError::UniqueViolation(_)) => (
                StatusCode::CONFLICT,
                json!({ "error": self.0.to_string(), "code": "already_checked_in" }),
            ),
            Error::CheckIn(CheckInError::MoodOutOfRange(_))
            | Error::CheckIn(CheckInError::NoteTooLong { .. })
            | Error::Validation(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": self.0.to_string(), "code": "validation" }),
            ),
            Error::Database(DatabaseError::NotFound(_)) => (
                StatusCode::NOT_FOUND,
                json!({ "error": self.0.to_string(), "code": "not_found" }),
            ),
            Error::RemoteUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "error": self.0.to_string(), "code": "remote_unavailable" }),
            ),
            _ => {
                tracing::error!("Internal error: {}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error", "code": "internal" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
