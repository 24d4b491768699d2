use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog_core::error::{CoreError, FieldError};
use catalog_core::types::Timestamp;
use catalog_db::error::{classify, StoreFailure};
use serde::Serialize;

/// Short labels carried in the `error` field of every error payload.
pub const LABEL_NOT_FOUND: &str = "Resource not found";
pub const LABEL_DATABASE: &str = "Database error";
pub const LABEL_VALIDATION: &str = "Validation error";
pub const LABEL_BAD_REQUEST: &str = "Bad request";
pub const LABEL_INTERNAL: &str = "Internal server error";

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `catalog_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx that the service did not translate.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// JSON body of every error response.
///
/// `path` is empty when the response is built; the
/// [`attach_request_path`](crate::middleware::error_path::attach_request_path)
/// middleware fills it in from the request URI.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub timestamp: Timestamp,
    pub status: u16,
    pub error: &'static str,
    pub message: String,
    pub path: String,
    /// Per-field messages, present only for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ErrorBody {
    pub fn new(status: StatusCode, error: &'static str, message: impl Into<String>) -> Self {
        Self {
            timestamp: chrono::Utc::now(),
            status: status.as_u16(),
            error,
            message: message.into(),
            path: String::new(),
            errors: None,
        }
    }

    /// Render the body, keeping a copy in the response extensions so later
    /// middleware can rewrite it.
    pub fn into_response_with_status(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(self.clone())).into_response();
        response.extensions_mut().insert(self);
        response
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => {
                    ErrorBody::new(StatusCode::NOT_FOUND, LABEL_NOT_FOUND, core.to_string())
                }
                CoreError::Validation(ref fields) => {
                    let mut body = ErrorBody::new(
                        StatusCode::UNPROCESSABLE_ENTITY,
                        LABEL_VALIDATION,
                        core.to_string(),
                    );
                    body.errors = Some(fields.clone());
                    body
                }
                CoreError::IntegrityViolation(msg) => {
                    ErrorBody::new(StatusCode::BAD_REQUEST, LABEL_DATABASE, msg)
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(&err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => {
                ErrorBody::new(StatusCode::BAD_REQUEST, LABEL_BAD_REQUEST, msg)
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_body()
            }
        };

        body.into_response_with_status()
    }
}

fn internal_body() -> ErrorBody {
    ErrorBody::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        LABEL_INTERNAL,
        INTERNAL_MESSAGE,
    )
}

/// Classify an untranslated sqlx error into an error payload.
///
/// - `RowNotFound` maps to 404.
/// - Integrity constraint violations (SQLSTATE class 23) map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> ErrorBody {
    match classify(err) {
        StoreFailure::RowNotFound => {
            ErrorBody::new(StatusCode::NOT_FOUND, LABEL_NOT_FOUND, "Resource not found")
        }
        failure @ StoreFailure::IntegrityViolation { .. } => {
            ErrorBody::new(StatusCode::BAD_REQUEST, LABEL_DATABASE, failure.describe())
        }
        StoreFailure::Other => {
            tracing::error!(error = %err, "Database error");
            internal_body()
        }
    }
}
