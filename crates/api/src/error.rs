use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use raffle_core::error::CoreError;
use raffle_db::error::LedgerError;
use serde_json::json;

use crate::response::NoticeLevel;

/// Message returned for every storage failure, whatever the operation.
pub const STORAGE_UNAVAILABLE_MESSAGE: &str =
    "The raffle database is unavailable. Please try again.";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for ledger rule violations and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent JSON error
/// responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A ledger rule violation from `raffle_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Core(core) => AppError::Core(core),
            LedgerError::StorageUnavailable(db) => AppError::Database(db),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => classify_core_error(core),

            // --- Database errors ---
            AppError::Database(err) => {
                tracing::error!(error = %err, "Storage unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "STORAGE_UNAVAILABLE",
                    STORAGE_UNAVAILABLE_MESSAGE.to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        // An empty draw pool is shown as a warning.
        let level = match &self {
            AppError::Core(CoreError::NoEligibleCandidates) => NoticeLevel::Warning,
            _ => NoticeLevel::Error,
        };

        let body = json!({
            "error": message,
            "code": code,
            "level": level,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a ledger rule violation to an HTTP status, error code, and message.
fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::InvalidNumber(_) => (StatusCode::BAD_REQUEST, "INVALID_NUMBER", err.to_string()),
        CoreError::InvalidName => (StatusCode::BAD_REQUEST, "INVALID_NAME", err.to_string()),
        CoreError::NumberTaken { .. } => (StatusCode::CONFLICT, "NUMBER_TAKEN", err.to_string()),
        CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
        CoreError::AlreadyDrawn { .. } => (StatusCode::CONFLICT, "ALREADY_DRAWN", err.to_string()),
        CoreError::NoEligibleCandidates => (
            StatusCode::CONFLICT,
            "NO_ELIGIBLE_CANDIDATES",
            err.to_string(),
        ),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
