//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the correct HTTP
//! status code, error label, and message. They do NOT need an HTTP server --
//! they call `IntoResponse` directly on `AppError` values.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use catalog_api::error::{
    AppError, ErrorBody, LABEL_BAD_REQUEST, LABEL_DATABASE, LABEL_INTERNAL, LABEL_NOT_FOUND,
    LABEL_VALIDATION,
};
use catalog_core::error::{CoreError, FieldError};
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: CoreError::NotFound maps to 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Category",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);
    assert_eq!(json["error"], LABEL_NOT_FOUND);
    assert_eq!(json["message"], "Category with id 42 not found");
    assert!(json.get("errors").is_none());
}

// ---------------------------------------------------------------------------
// Test: CoreError::IntegrityViolation maps to 400
// ---------------------------------------------------------------------------

#[tokio::test]
async fn integrity_violation_returns_400_database_error() {
    let err = AppError::Core(CoreError::IntegrityViolation(
        "Duplicate value violates unique constraint: uq_categories_name_lower".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
    assert_eq!(json["error"], LABEL_DATABASE);
    assert!(json["message"]
        .as_str()
        .unwrap()
        .contains("uq_categories_name_lower"));
}

// ---------------------------------------------------------------------------
// Test: CoreError::Validation maps to 422 with per-field messages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_422_with_field_errors() {
    let err = AppError::Core(CoreError::Validation(vec![
        FieldError::new("name", "Category name must not be blank"),
        FieldError::new("name", "Category name must be between 3 and 100 characters"),
    ]));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["status"], 422);
    assert_eq!(json["error"], LABEL_VALIDATION);

    let errors = json["errors"].as_array().expect("errors should be an array");
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["fieldName"], "name");
    assert_eq!(errors[0]["message"], "Category name must not be blank");
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest maps to 400
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("Invalid sort field 'colour'".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], LABEL_BAD_REQUEST);
    assert_eq!(json["message"], "Invalid sort field 'colour'");
}

// ---------------------------------------------------------------------------
// Test: AppError::InternalError maps to 500 and sanitizes the message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], LABEL_INTERNAL);

    // The response body must NOT contain the original error details.
    let body_text = json.to_string();
    assert!(
        !body_text.contains("secret"),
        "Internal error response must not leak sensitive details"
    );
    assert_eq!(json["message"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Test: untranslated sqlx errors are classified
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sqlx_row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], LABEL_NOT_FOUND);
}

#[tokio::test]
async fn sqlx_pool_timeout_returns_sanitized_500() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::PoolTimedOut)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Test: payload shape
// ---------------------------------------------------------------------------

#[tokio::test]
async fn payload_carries_timestamp_and_path_fields() {
    let (_, json) = error_to_response(AppError::BadRequest("nope".into())).await;

    assert!(json["timestamp"].is_string());
    // Filled in by middleware; empty when rendered directly.
    assert_eq!(json["path"], "");
}

#[tokio::test]
async fn response_keeps_error_body_for_middleware() {
    let response = AppError::BadRequest("nope".into()).into_response();
    let body = response
        .extensions()
        .get::<ErrorBody>()
        .expect("error body should be stored in extensions");
    assert_eq!(body.status, 400);
    assert_eq!(body.message, "nope");
}
