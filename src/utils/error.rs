use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::utils::response::error as error_response;

/// Domain error taxonomy for the events API.
///
/// Validation and not-found failures surface verbatim to the caller; any
/// unrecognized store failure is logged and reported as the generic
/// `Database` error, leaking no internal detail.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("A valid event ID is required.")]
    MissingId,

    #[error("An event object is required.")]
    MissingEvent,

    #[error("Event start time and end time are required.")]
    MissingSlot,

    #[error("Event start and end times must be valid instants.")]
    InvalidTime,

    #[error("Limit should be an integral value.")]
    NotInteger,

    #[error("A request body is required.")]
    EmptyBody,

    #[error("The request body could not be decoded.")]
    MalformedBody,

    #[error("Event not found.")]
    NotFound,

    #[error("Something went wrong.")]
    Database(#[from] sqlx::Error),

    #[error("Something went wrong.")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingId
            | ApiError::MissingEvent
            | ApiError::MissingSlot
            | ApiError::InvalidTime
            | ApiError::NotInteger
            | ApiError::EmptyBody
            | ApiError::MalformedBody => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal failures get logged with full detail; the wire message
        // stays generic.
        match &self {
            ApiError::Database(err) => error!(error = ?err, "store failure"),
            ApiError::Internal(msg) => error!(message = %msg, "internal failure"),
            _ => {}
        }

        error_response(status, self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_bad_requests() {
        for err in [
            ApiError::MissingId,
            ApiError::MissingEvent,
            ApiError::MissingSlot,
            ApiError::InvalidTime,
            ApiError::NotInteger,
            ApiError::EmptyBody,
            ApiError::MalformedBody,
        ] {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn not_found_and_internal_codes() {
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Database(sqlx::Error::PoolClosed).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_message_stays_generic() {
        assert_eq!(
            ApiError::Internal("connection refused".into()).to_string(),
            "Something went wrong."
        );
    }
}
