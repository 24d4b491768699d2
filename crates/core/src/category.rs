//! Category transfer object, name invariant and field validation rules.
//!
//! [`validate_category`] implements the request-level rules (non-blank,
//! length) and returns every violation at once. Uniqueness needs the store,
//! so it is checked by the service layer on top of these rules.
//! [`CategoryName`] is the entity-level invariant applied right before a
//! name is persisted.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{CoreError, FieldError};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Entity label used in not-found errors and log lines.
pub const ENTITY_NAME: &str = "Category";

/// Name of the only client-editable field.
pub const FIELD_NAME: &str = "name";

/// Minimum accepted length of a submitted name, in characters.
pub const MIN_NAME_LENGTH: usize = 3;

/// Maximum length of a name, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

pub const MSG_NAME_BLANK: &str = "Category name must not be blank";
pub const MSG_NAME_LENGTH: &str = "Category name must be between 3 and 100 characters";
pub const MSG_NAME_TOO_LONG: &str = "Category name must not exceed 100 characters";
pub const MSG_NAME_TAKEN: &str = "A category with this name already exists";

// ---------------------------------------------------------------------------
// Transfer object
// ---------------------------------------------------------------------------

/// The shape of a category exchanged across the HTTP boundary.
///
/// `id` is absent on create requests and ignored if supplied. A missing
/// `name` deserializes as an empty string so it fails validation with a
/// field message instead of a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CategoryDto {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(default)]
    #[validate(length(
        min = 3,
        max = 100,
        message = "Category name must be between 3 and 100 characters"
    ))]
    pub name: String,
}

impl CategoryDto {
    pub fn new(id: DbId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    /// A request body carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

/// Identity is the id: two transfer objects are equal only when both carry
/// the same id.
impl PartialEq for CategoryDto {
    fn eq(&self, other: &Self) -> bool {
        self.id.is_some() && self.id == other.id
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check the field rules of an inbound category.
///
/// Every violated rule is reported; an empty vector means the data passed.
/// Blank-ness is judged on the trimmed name, length on the name as sent.
pub fn validate_category(dto: &CategoryDto) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if dto.name.trim().is_empty() {
        errors.push(FieldError::new(FIELD_NAME, MSG_NAME_BLANK));
    }

    if let Err(report) = dto.validate() {
        for (field, failures) in report.field_errors() {
            for failure in failures {
                let message = failure
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| failure.code.to_string());
                errors.push(FieldError::new(field.to_string(), message));
            }
        }
    }

    errors
}

// ---------------------------------------------------------------------------
// Entity name invariant
// ---------------------------------------------------------------------------

/// A trimmed, non-empty category name of at most [`MAX_NAME_LENGTH`]
/// characters. The only way to hand a name to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryName(String);

impl CategoryName {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::invalid_field(FIELD_NAME, MSG_NAME_BLANK));
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(CoreError::invalid_field(FIELD_NAME, MSG_NAME_TOO_LONG));
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn messages(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.message.as_str()).collect()
    }

    // -- validate_category ---------------------------------------------------

    #[test]
    fn valid_name_passes() {
        assert!(validate_category(&CategoryDto::named("Books")).is_empty());
    }

    #[test]
    fn boundary_lengths_pass() {
        assert!(validate_category(&CategoryDto::named("abc")).is_empty());
        assert!(validate_category(&CategoryDto::named("x".repeat(100))).is_empty());
    }

    #[test]
    fn empty_name_reports_blank_and_length() {
        let errors = validate_category(&CategoryDto::named(""));
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.field_name == FIELD_NAME));
        let msgs = messages(&errors);
        assert!(msgs.contains(&MSG_NAME_BLANK));
        assert!(msgs.contains(&MSG_NAME_LENGTH));
    }

    #[test]
    fn whitespace_only_name_is_blank() {
        let errors = validate_category(&CategoryDto::named("     "));
        assert_eq!(messages(&errors), vec![MSG_NAME_BLANK]);
    }

    #[test]
    fn too_short_name_rejected() {
        let errors = validate_category(&CategoryDto::named("ab"));
        assert_eq!(messages(&errors), vec![MSG_NAME_LENGTH]);
    }

    #[test]
    fn too_long_name_rejected() {
        let errors = validate_category(&CategoryDto::named("x".repeat(101)));
        assert_eq!(messages(&errors), vec![MSG_NAME_LENGTH]);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 100 two-byte characters.
        assert!(validate_category(&CategoryDto::named("é".repeat(100))).is_empty());
    }

    #[test]
    fn length_constants_match_rule() {
        assert_eq!(MIN_NAME_LENGTH, 3);
        assert_eq!(MAX_NAME_LENGTH, 100);
    }

    // -- CategoryName --------------------------------------------------------

    #[test]
    fn name_is_trimmed() {
        let name = CategoryName::parse("  Fiction \t").unwrap();
        assert_eq!(name.as_str(), "Fiction");
    }

    #[test]
    fn blank_name_violates_invariant() {
        assert_matches!(CategoryName::parse("   "), Err(CoreError::Validation(errors)) => {
            assert_eq!(errors[0].message, MSG_NAME_BLANK);
        });
    }

    #[test]
    fn overlong_name_violates_invariant() {
        assert_matches!(
            CategoryName::parse(&"y".repeat(101)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn surrounding_whitespace_does_not_count_toward_limit() {
        let raw = format!("  {}  ", "z".repeat(100));
        assert_eq!(CategoryName::parse(&raw).unwrap().as_str().len(), 100);
    }

    // -- CategoryDto ---------------------------------------------------------

    #[test]
    fn equality_is_by_id() {
        assert_eq!(CategoryDto::new(1, "A"), CategoryDto::new(1, "B"));
        assert_ne!(CategoryDto::new(1, "A"), CategoryDto::new(2, "A"));
        assert_ne!(CategoryDto::named("A"), CategoryDto::named("A"));
    }

    #[test]
    fn missing_name_deserializes_as_empty() {
        let dto: CategoryDto = serde_json::from_str("{}").unwrap();
        assert_eq!(dto.id, None);
        assert_eq!(dto.name, "");
    }

    #[test]
    fn serializes_id_and_name_only() {
        let json = serde_json::to_value(CategoryDto::new(3, "Sci-Fi")).unwrap();
        assert_eq!(json, serde_json::json!({"id": 3, "name": "Sci-Fi"}));
    }
}
