//! Tests for `AppError` -> HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the correct HTTP
//! status code, error code, and message. They do NOT need an HTTP server --
//! they call `IntoResponse` directly on `AppError` values.

use axum::response::IntoResponse;
use http_body_util::BodyExt;

use impro_api::error::AppError;
use impro_core::error::CoreError;
use impro_core::offering::OfferingKind;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (axum::http::StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: CoreError::Validation maps to 400 with VALIDATION_ERROR code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("Email must be a valid address".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Email must be a valid address");
}

// ---------------------------------------------------------------------------
// Test: CoreError::OfferingFull maps to 409 with a user-facing message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn offering_full_returns_409() {
    let err = AppError::Core(CoreError::OfferingFull {
        kind: OfferingKind::Event,
        id: 7,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::CONFLICT);
    assert_eq!(json["code"], "OFFERING_FULL");
    assert_eq!(json["error"], "This event is full");
}

// ---------------------------------------------------------------------------
// Test: CoreError::AlreadyRegistered maps to 409
// ---------------------------------------------------------------------------

#[tokio::test]
async fn already_registered_returns_409() {
    let err = AppError::Core(CoreError::AlreadyRegistered {
        kind: OfferingKind::Course,
        id: 3,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::CONFLICT);
    assert_eq!(json["code"], "ALREADY_REGISTERED");
    assert_eq!(json["error"], "You are already registered for this course");
}

// ---------------------------------------------------------------------------
// Test: CoreError::InvalidSignature maps to 400
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_signature_returns_400() {
    let err = AppError::Core(CoreError::InvalidSignature);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_SIGNATURE");
}

// ---------------------------------------------------------------------------
// Test: CoreError::MalformedPayload maps to 400
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_payload_returns_400() {
    let err = AppError::Core(CoreError::MalformedPayload("invalid base64".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "MALFORMED_PAYLOAD");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Internal maps to 500 with a sanitized message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_core_error_returns_500_with_generic_message() {
    let err = AppError::Core(CoreError::Internal("secret connection string".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest maps to 400 with BAD_REQUEST code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("invalid field value".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "invalid field value");
}

// ---------------------------------------------------------------------------
// Test: AppError::InternalError never leaks its detail
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_with_generic_message() {
    let err = AppError::InternalError("event 7 not found".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Test: sqlx RowNotFound maps to 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn row_not_found_returns_404() {
    let err = AppError::Database(sqlx::Error::RowNotFound);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}
