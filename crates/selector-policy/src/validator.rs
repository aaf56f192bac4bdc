//! Selection set validator.
//!
//! [`SelectionValidator`] checks a declarative [`SelectionSetDefinition`] and
//! builds the typed [`WorkspaceSelectionSet`] in the same pass:
//!
//! 1. **Selection shape** - every selection holds at least one condition
//! 2. **Slot dispatch** - every joined condition populates exactly one slot
//! 3. **Field and operator** - both belong to the slot's condition type
//! 4. **Values** - non-empty, every element well-typed
//!
//! All violations are collected; the typed set is produced only when there
//! are none.

use selector_core::codec::{self, CodecError, ValueCodec};
use selector_core::condition::{
    Condition, IntCondition, JoinedCondition, KeyValueCondition, KeyValuePair, RatingCondition,
    Selection, StringCondition, WorkspaceSelectionSet,
};
use selector_core::config::{
    ConditionDefinition, JoinedConditionDefinition, SelectionDefinition, SelectionSetDefinition,
};
use selector_core::registry::{
    self, ConditionType, IntField, IntOperator, KeyValueField, KeyValueOperator, Rating, RatingField,
    RatingOperator, StringField, StringOperator,
};
use std::str::FromStr;

use crate::error::{ValidationError, ValidationErrors};

/// Validates declarative selection sets and compiles them into typed ones.
pub struct SelectionValidator;

impl SelectionValidator {
    /// Create a new selection validator.
    pub fn new() -> Self {
        Self
    }

    /// Return every violation in `set`; empty when the set is valid.
    pub fn validate(&self, set: &SelectionSetDefinition) -> Vec<ValidationError> {
        match self.compile(set) {
            Ok(_) => Vec::new(),
            Err(errors) => errors.into_vec(),
        }
    }

    /// Validate `set` and build its typed form.
    pub fn compile(
        &self,
        set: &SelectionSetDefinition,
    ) -> Result<WorkspaceSelectionSet, ValidationErrors> {
        let mut errors = Vec::new();
        let mut selections = Vec::with_capacity(set.selections.len());

        for (idx, selection) in set.selections.iter().enumerate() {
            let path = format!("selections[{}]", idx);
            if let Some(compiled) = self.compile_selection(&path, selection, &mut errors) {
                selections.push(compiled);
            }
        }

        if errors.is_empty() {
            let compiled = WorkspaceSelectionSet::new(selections);
            tracing::debug!(
                selections = compiled.selections().len(),
                conditions = compiled.condition_count(),
                "compiled selection set"
            );
            Ok(compiled)
        } else {
            tracing::debug!(errors = errors.len(), "selection set failed validation");
            Err(ValidationErrors::new(errors))
        }
    }

    fn compile_selection(
        &self,
        path: &str,
        selection: &SelectionDefinition,
        errors: &mut Vec<ValidationError>,
    ) -> Option<Selection> {
        if selection.conditions.is_empty() {
            errors.push(ValidationError::empty_selection(path));
            return None;
        }

        let mut conditions = Vec::with_capacity(selection.conditions.len());
        for (idx, joined) in selection.conditions.iter().enumerate() {
            let path = format!("{}.conditions[{}]", path, idx);
            if let Some(condition) = self.compile_condition(&path, joined, errors) {
                conditions.push(JoinedCondition {
                    operator: joined.operator,
                    condition,
                });
            }
        }

        // A dropped condition always left an error behind.
        if conditions.len() == selection.conditions.len() {
            Selection::new(conditions)
        } else {
            None
        }
    }

    fn compile_condition(
        &self,
        path: &str,
        joined: &JoinedConditionDefinition,
        errors: &mut Vec<ValidationError>,
    ) -> Option<Condition> {
        let populated = joined.populated_slots();
        match populated.as_slice() {
            [] => {
                errors.push(ValidationError::missing_condition(path));
                return None;
            }
            [_] => {}
            _ => {
                errors.push(ValidationError::ambiguous_condition(path, &populated));
                return None;
            }
        }

        if let Some(def) = &joined.string_condition {
            let slot = slot_path(path, ConditionType::String);
            let (field, operator, values) =
                self.compile_parts::<StringField, StringOperator, String>(
                    &slot,
                    ConditionType::String,
                    def,
                    errors,
                );
            return Some(Condition::String(StringCondition {
                field: field?,
                operator: operator?,
                values: values?,
            }));
        }

        if let Some(def) = &joined.int_condition {
            let slot = slot_path(path, ConditionType::Int);
            let (field, operator, values) =
                self.compile_parts::<IntField, IntOperator, i32>(
                    &slot,
                    ConditionType::Int,
                    def,
                    errors,
                );
            return Some(Condition::Int(IntCondition {
                field: field?,
                operator: operator?,
                values: values?,
            }));
        }

        if let Some(def) = &joined.rating_condition {
            let slot = slot_path(path, ConditionType::Rating);
            let (field, operator, values) =
                self.compile_parts::<RatingField, RatingOperator, Rating>(
                    &slot,
                    ConditionType::Rating,
                    def,
                    errors,
                );
            return Some(Condition::Rating(RatingCondition {
                field: field?,
                operator: operator?,
                values: values?,
            }));
        }

        if let Some(def) = &joined.key_value_condition {
            let slot = slot_path(path, ConditionType::KeyValue);
            let (field, operator, values) =
                self.compile_parts::<KeyValueField, KeyValueOperator, KeyValuePair>(
                    &slot,
                    ConditionType::KeyValue,
                    def,
                    errors,
                );
            return Some(Condition::KeyValue(KeyValueCondition {
                field: field?,
                operator: operator?,
                values: values?,
            }));
        }

        None
    }

    /// Check field, operator and values of one populated slot.
    ///
    /// Each part is checked independently so that a bad field does not hide a
    /// bad operator or value in the same condition.
    fn compile_parts<F, O, V>(
        &self,
        slot: &str,
        kind: ConditionType,
        def: &ConditionDefinition<V::Raw>,
        errors: &mut Vec<ValidationError>,
    ) -> (Option<F>, Option<O>, Option<Vec<V>>)
    where
        F: FromStr,
        O: FromStr,
        V: ValueCodec,
    {
        let field = registry::is_valid_field(kind, &def.field)
            .then(|| def.field.parse::<F>().ok())
            .flatten();
        if field.is_none() {
            errors.push(ValidationError::invalid_field(
                &format!("{}.field", slot),
                kind,
                &def.field,
            ));
        }

        let operator = registry::is_valid_operator(kind, &def.operator)
            .then(|| def.operator.parse::<O>().ok())
            .flatten();
        if operator.is_none() {
            errors.push(ValidationError::invalid_operator(
                &format!("{}.operator", slot),
                kind,
                &def.field,
                &def.operator,
            ));
        }

        let values = match codec::decode_values::<V>(&def.values) {
            Ok(values) => Some(values),
            Err(codec_errors) => {
                let values_path = format!("{}.values", slot);
                for err in codec_errors {
                    errors.push(match err {
                        CodecError::Empty => {
                            ValidationError::empty_values(&values_path, &def.field)
                        }
                        CodecError::TypeMismatch {
                            index,
                            value,
                            expected,
                        } => ValidationError::type_mismatch(
                            &format!("{}[{}]", values_path, index),
                            &def.field,
                            &value,
                            expected,
                        ),
                    });
                }
                None
            }
        };

        (field, operator, values)
    }
}

impl Default for SelectionValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn slot_path(path: &str, kind: ConditionType) -> String {
    format!("{}.{}", path, kind.slot_name())
}

/// Validate `set` with a default [`SelectionValidator`].
pub fn validate(set: &SelectionSetDefinition) -> Vec<ValidationError> {
    SelectionValidator::new().validate(set)
}

/// Compile `set` with a default [`SelectionValidator`].
pub fn compile(set: &SelectionSetDefinition) -> Result<WorkspaceSelectionSet, ValidationErrors> {
    SelectionValidator::new().compile(set)
}
