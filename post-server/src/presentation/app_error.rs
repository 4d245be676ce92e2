use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::domain::error::DomainError;

/// Failures that escape a handler end up here. Only the create and
/// delete routes let errors through; the read routes recover locally and
/// never reach this mapper.
#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

const STORE_FAILURE_MESSAGE: &str =
    "Database error occurred. Please try again later or contact support.";
const MISSING_REFERENCE_MESSAGE: &str = "A null reference was encountered. This has been logged.";

#[derive(Debug, Serialize)]
pub(crate) struct ErrorDetails {
    timestamp: DateTime<Utc>,
    message: String,
    details: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = match &self {
            AppError::Domain(err) => match err {
                DomainError::NotFound(_) => {
                    (StatusCode::NOT_FOUND, err.to_string(), "post not found")
                }
                DomainError::Store(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    STORE_FAILURE_MESSAGE.to_string(),
                    "data store failure",
                ),
                DomainError::Corrupt(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    MISSING_REFERENCE_MESSAGE.to_string(),
                    "missing reference",
                ),
                DomainError::Unexpected(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    err.to_string(),
                    "unexpected failure",
                ),
            },
            AppError::Internal(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                err.to_string(),
                "unexpected failure",
            ),
        };

        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        (
            status,
            Json(ErrorDetails {
                timestamp: Utc::now(),
                message,
                details: details.to_string(),
            }),
        )
            .into_response()
    }
}
