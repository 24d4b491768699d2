//! Request extractors whose rejections are [`AppError`]s.
//!
//! Axum's built-in `Json`, `Path` and `Query` answer malformed input with a
//! plain-text body. These wrappers route the same failures through
//! [`AppError`] so every client error carries the standard JSON payload.
//!
//! - JSON that parses but does not fit the target type is a 422 validation
//!   error naming the offending field.
//! - Any other body, path or query failure is a 400.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use catalog_core::error::{CoreError, FieldError};

use crate::error::AppError;

/// Field reported when a body error cannot be pinned to a single field.
pub const BODY_FIELD: &str = "body";

const DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// Query string parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                AppError::Core(CoreError::Validation(vec![field_error(&err.body_text())]))
            }
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Split a deserialization message of the form `field: detail` into a
/// [`FieldError`]. Messages without a field path are reported against
/// [`BODY_FIELD`].
fn field_error(text: &str) -> FieldError {
    let detail = text.strip_prefix(DATA_ERROR_PREFIX).unwrap_or(text);
    match detail.split_once(": ") {
        Some((path, message)) if !path.is_empty() && !path.contains(char::is_whitespace) => {
            FieldError::new(path, message)
        }
        _ => FieldError::new(BODY_FIELD, detail),
    }
}
