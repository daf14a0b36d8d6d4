//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the correct HTTP
//! status code, error code, and message. They do NOT need a database --
//! they call `IntoResponse` directly on `AppError` values.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use raffle_api::error::{AppError, STORAGE_UNAVAILABLE_MESSAGE};
use raffle_core::error::CoreError;
use raffle_core::slot::SlotStatus;
use raffle_db::error::LedgerError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn invalid_number_returns_400() {
    let err = AppError::Core(CoreError::InvalidNumber("'x' is not an integer".into()));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_NUMBER");
    assert_eq!(json["error"], "Invalid number: 'x' is not an integer");
    assert_eq!(json["level"], "error");
}

#[tokio::test]
async fn invalid_name_returns_400() {
    let (status, json) = error_to_response(AppError::Core(CoreError::InvalidName)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_NAME");
}

#[tokio::test]
async fn number_taken_returns_409() {
    let err = AppError::Core(CoreError::NumberTaken {
        number: 12,
        status: SlotStatus::Drawn,
    });
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "NUMBER_TAKEN");
    assert_eq!(json["error"], "Number 12 is already drawn");
}

#[tokio::test]
async fn not_found_returns_404() {
    let err = AppError::Core(CoreError::NotFound { number: 42 });
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Number 42 has no reservation");
}

#[tokio::test]
async fn already_drawn_returns_409() {
    let err = AppError::Core(CoreError::AlreadyDrawn { number: 5 });
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "ALREADY_DRAWN");
}

#[tokio::test]
async fn no_eligible_candidates_is_a_warning() {
    let (status, json) = error_to_response(AppError::Core(CoreError::NoEligibleCandidates)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "NO_ELIGIBLE_CANDIDATES");
    assert_eq!(json["level"], "warning");
}

#[tokio::test]
async fn storage_errors_are_sanitized_and_uniform() {
    let ledger = LedgerError::StorageUnavailable(sqlx::Error::PoolTimedOut);
    let (status, json) = error_to_response(AppError::from(ledger)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "STORAGE_UNAVAILABLE");
    assert_eq!(json["error"], STORAGE_UNAVAILABLE_MESSAGE);

    let (status, json) = error_to_response(AppError::Database(sqlx::Error::PoolClosed)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"], STORAGE_UNAVAILABLE_MESSAGE);
}

#[tokio::test]
async fn ledger_rule_errors_unwrap_to_core() {
    let ledger = LedgerError::Core(CoreError::AlreadyDrawn { number: 9 });
    let (status, json) = error_to_response(AppError::from(ledger)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "ALREADY_DRAWN");
}

#[tokio::test]
async fn internal_errors_do_not_leak_details() {
    let err = AppError::Core(CoreError::Internal("slot 3 has unknown status_id 9".into()));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json.to_string().contains("status_id"));
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn bad_request_returns_400() {
    let (status, json) = error_to_response(AppError::BadRequest("bad input".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "bad input");
}
