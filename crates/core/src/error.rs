use serde::Serialize;

use crate::types::DbId;

/// A single field-level validation failure, reported back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field_name: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// One or more field rules failed. Never empty.
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// The store rejected a write because of a constraint (unique, foreign key).
    #[error("Integrity violation: {0}")]
    IntegrityViolation(String),
}

impl CoreError {
    /// Shorthand for a validation failure on a single field.
    pub fn invalid_field(field_name: &str, message: &str) -> Self {
        CoreError::Validation(vec![FieldError::new(field_name, message)])
    }
}
