//! Classification of low-level sqlx failures.
//!
//! The service layer only distinguishes constraint breaches from everything
//! else; this module knows which PostgreSQL error codes mean what.

/// SQLSTATE class for integrity constraint violations.
const INTEGRITY_CONSTRAINT_CLASS: &str = "23";

pub const SQLSTATE_FOREIGN_KEY_VIOLATION: &str = "23503";
pub const SQLSTATE_UNIQUE_VIOLATION: &str = "23505";

/// What a failed store call means to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreFailure {
    /// A query that must return a row returned none.
    RowNotFound,
    /// A unique, foreign key, not-null or check constraint rejected the write.
    IntegrityViolation { code: String, constraint: Option<String> },
    /// Anything else: connectivity, syntax, pool exhaustion.
    Other,
}

impl StoreFailure {
    /// Human-readable description of an integrity violation.
    pub fn describe(&self) -> String {
        match self {
            StoreFailure::RowNotFound => "No matching row".to_string(),
            StoreFailure::IntegrityViolation { code, constraint } => {
                let kind = match code.as_str() {
                    SQLSTATE_UNIQUE_VIOLATION => "Duplicate value violates unique constraint",
                    SQLSTATE_FOREIGN_KEY_VIOLATION => "Row is still referenced by foreign key",
                    _ => "Write violates constraint",
                };
                format!("{kind}: {}", constraint.as_deref().unwrap_or("unknown"))
            }
            StoreFailure::Other => "Unclassified database failure".to_string(),
        }
    }
}

/// Classify a sqlx error.
pub fn classify(err: &sqlx::Error) -> StoreFailure {
    match err {
        sqlx::Error::RowNotFound => StoreFailure::RowNotFound,
        sqlx::Error::Database(db_err) => match db_err.code() {
            Some(code) if code.starts_with(INTEGRITY_CONSTRAINT_CLASS) => {
                StoreFailure::IntegrityViolation {
                    code: code.into_owned(),
                    constraint: db_err.constraint().map(str::to_owned),
                }
            }
            _ => StoreFailure::Other,
        },
        _ => StoreFailure::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_is_classified() {
        assert_eq!(classify(&sqlx::Error::RowNotFound), StoreFailure::RowNotFound);
    }

    #[test]
    fn pool_errors_are_unclassified() {
        assert_eq!(classify(&sqlx::Error::PoolTimedOut), StoreFailure::Other);
    }

    #[test]
    fn unique_violation_description_names_constraint() {
        let failure = StoreFailure::IntegrityViolation {
            code: SQLSTATE_UNIQUE_VIOLATION.to_string(),
            constraint: Some("uq_categories_name_lower".to_string()),
        };
        assert_eq!(
            failure.describe(),
            "Duplicate value violates unique constraint: uq_categories_name_lower"
        );
    }

    #[test]
    fn foreign_key_description_without_constraint_name() {
        let failure = StoreFailure::IntegrityViolation {
            code: SQLSTATE_FOREIGN_KEY_VIOLATION.to_string(),
            constraint: None,
        };
        assert_eq!(
            failure.describe(),
            "Row is still referenced by foreign key: unknown"
        );
    }
}
