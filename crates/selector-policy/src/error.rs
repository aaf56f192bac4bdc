//! Validation error types for selection sets.
//!
//! Every error carries the path of the offending element
//! (e.g. `selections[0].conditions[2].rating_condition.operator`) so a caller
//! can report all problems of a configuration at once.

use selector_core::registry::{self, ConditionType};
use std::fmt;

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The kind of validation error.
    pub kind: ValidationErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Location of the offending element.
    pub path: String,
}

impl ValidationError {
    /// Create a new validation error.
    pub fn new(kind: ValidationErrorKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            path: path.into(),
        }
    }

    // =========================================================================
    // SELECTION ERRORS
    // =========================================================================

    /// Create an empty selection error.
    pub fn empty_selection(path: &str) -> Self {
        Self::new(
            ValidationErrorKind::EmptySelection,
            path,
            "Selection must contain at least one condition",
        )
    }

    // =========================================================================
    // CONDITION SLOT ERRORS
    // =========================================================================

    /// Create a missing condition error (no slot populated).
    pub fn missing_condition(path: &str) -> Self {
        Self::new(
            ValidationErrorKind::MissingCondition,
            path,
            "Condition must populate exactly one of string_condition, int_condition, \
             rating_condition or key_value_condition, but none is set",
        )
    }

    /// Create an ambiguous condition error (several slots populated).
    pub fn ambiguous_condition(path: &str, populated: &[ConditionType]) -> Self {
        let slots: Vec<&str> = populated.iter().map(|kind| kind.slot_name()).collect();
        Self::new(
            ValidationErrorKind::AmbiguousCondition,
            path,
            format!(
                "Condition must populate exactly one slot, but {} are set: {}",
                slots.len(),
                slots.join(", ")
            ),
        )
    }

    // =========================================================================
    // FIELD AND OPERATOR ERRORS
    // =========================================================================

    /// Create an invalid field error.
    pub fn invalid_field(path: &str, kind: ConditionType, field: &str) -> Self {
        let hint = match registry::condition_type_of_field(field) {
            Some(owner) => format!(" ('{}' is a {} field)", field, owner),
            None => String::new(),
        };
        Self::new(
            ValidationErrorKind::InvalidField,
            path,
            format!(
                "Field '{}' is not valid for {} conditions{}; expected one of: {}",
                field,
                kind,
                hint,
                registry::fields_for(kind).join(", ")
            ),
        )
    }

    /// Create an invalid operator error.
    pub fn invalid_operator(path: &str, kind: ConditionType, field: &str, operator: &str) -> Self {
        Self::new(
            ValidationErrorKind::InvalidOperator,
            path,
            format!(
                "Operator '{}' is not valid for field '{}' of {} conditions; expected one of: {}",
                operator,
                field,
                kind,
                registry::operators_for(kind).join(", ")
            ),
        )
    }

    // =========================================================================
    // VALUE ERRORS
    // =========================================================================

    /// Create an empty values error.
    pub fn empty_values(path: &str, field: &str) -> Self {
        Self::new(
            ValidationErrorKind::EmptyValues,
            path,
            format!("Condition on field '{}' must have at least one value", field),
        )
    }

    /// Create a type mismatch error for one element of a value list.
    pub fn type_mismatch(path: &str, field: &str, value: &str, expected: &str) -> Self {
        Self::new(
            ValidationErrorKind::TypeMismatch,
            path,
            format!(
                "Value {} for field '{}' is not a valid {}",
                value, field, expected
            ),
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// Selection has no conditions.
    EmptySelection,
    /// Field does not belong to the condition's type.
    InvalidField,
    /// Operator is not valid for the condition's type.
    InvalidOperator,
    /// Condition has no values.
    EmptyValues,
    /// A value is not well-typed for the condition's type.
    TypeMismatch,
    /// More than one condition slot is populated.
    AmbiguousCondition,
    /// No condition slot is populated.
    MissingCondition,
}

/// Every violation found in a selection set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} selection validation error(s): {}", .0.len(), summary(.0))]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of errors of a given kind.
    pub fn count(&self, kind: ValidationErrorKind) -> usize {
        self.0.iter().filter(|e| e.kind == kind).count()
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

fn summary(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_field_hint() {
        let err = ValidationError::invalid_field(
            "selections[0].conditions[0].string_condition.field",
            ConditionType::String,
            "risk",
        );
        assert_eq!(err.kind, ValidationErrorKind::InvalidField);
        assert!(err.message.contains("'risk' is a rating field"));
        assert!(err.message.contains("asset_kind"));
    }

    #[test]
    fn test_display_includes_path() {
        let err = ValidationError::empty_selection("selections[3]");
        assert_eq!(
            err.to_string(),
            "selections[3]: Selection must contain at least one condition"
        );
    }

    #[test]
    fn test_errors_summary() {
        let errors = ValidationErrors::new(vec![
            ValidationError::empty_selection("selections[0]"),
            ValidationError::missing_condition("selections[1].conditions[0]"),
        ]);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.count(ValidationErrorKind::MissingCondition), 1);
        let rendered = errors.to_string();
        assert!(rendered.starts_with("2 selection validation error(s): selections[0]"));
        assert!(rendered.contains("; selections[1].conditions[0]"));
    }
}
