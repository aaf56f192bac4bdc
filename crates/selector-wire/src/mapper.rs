//! Translation between selection sets and their wire form.
//!
//! Writing is infallible: a typed [`WorkspaceSelectionSet`] always has a wire
//! form. Reading dispatches on `__typename` and fills exactly the matching
//! declarative slot from whatever members are present. Wire names are checked
//! against the registry's wire tables; nothing is guessed or dropped.

use selector_core::codec::encode_values;
use selector_core::condition::{Condition, WorkspaceSelectionSet};
use selector_core::config::{
    ConditionDefinition, JoinedConditionDefinition, SelectionDefinition, SelectionSetDefinition,
};
use selector_core::registry::{self, ConditionType, Rating};
use selector_policy::validator;
use selector_policy::{ValidationError, ValidationErrorKind, ValidationErrors};

use crate::error::WireError;
use crate::schema::{
    WireCondition, WireIntCondition, WireJoinedCondition, WireKeyValueCondition,
    WireRatingCondition, WireSelection, WireSelectionSet, WireStringCondition,
    condition_type_for,
};

/// Build the wire payload of a typed selection set.
pub fn to_wire(set: &WorkspaceSelectionSet) -> WireSelectionSet {
    let selections = set
        .selections()
        .iter()
        .map(|selection| WireSelection {
            conditions: selection
                .conditions()
                .iter()
                .map(|joined| WireJoinedCondition {
                    operator: joined.operator,
                    condition: condition_to_wire(&joined.condition),
                })
                .collect(),
        })
        .collect();

    tracing::debug!(
        selections = set.selections().len(),
        conditions = set.condition_count(),
        "mapped selection set to wire"
    );
    WireSelectionSet { selections }
}

fn condition_to_wire(condition: &Condition) -> WireCondition {
    match condition {
        Condition::String(c) => WireCondition::string(WireStringCondition {
            string_field: Some(c.field.wire_name().to_string()),
            string_operator: Some(c.operator.wire_name().to_string()),
            string_values: Some(c.values.clone()),
        }),
        Condition::Int(c) => WireCondition::int(WireIntCondition {
            int_field: Some(c.field.wire_name().to_string()),
            int_operator: Some(c.operator.wire_name().to_string()),
            int_values: Some(encode_values(&c.values)),
        }),
        Condition::Rating(c) => WireCondition::rating(WireRatingCondition {
            rating_field: Some(c.field.wire_name().to_string()),
            rating_operator: Some(c.operator.wire_name().to_string()),
            rating_values: Some(
                c.values
                    .iter()
                    .map(|rating| rating.wire_name().to_string())
                    .collect(),
            ),
        }),
        Condition::KeyValue(c) => WireCondition::key_value(WireKeyValueCondition {
            key_value_field: Some(c.field.wire_name().to_string()),
            key_value_operator: Some(c.operator.wire_name().to_string()),
            key_value_values: Some(c.values.clone()),
        }),
    }
}

/// A wire payload read into the declarative form, together with every
/// violation of the wire contract found while reading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireDefinition {
    pub definition: SelectionSetDefinition,
    /// Unknown or missing wire names, and members of a foreign variant.
    pub errors: Vec<ValidationError>,
}

/// Read a wire payload into the declarative form, collecting wire errors.
///
/// Fails only on an unknown `__typename`. A name that is not in the
/// registry's wire tables is recorded as an error and copied verbatim into
/// the definition; a missing field or operator is recorded and left empty.
pub fn read_definition(wire: &WireSelectionSet) -> Result<WireDefinition, WireError> {
    let mut selections = Vec::with_capacity(wire.selections.len());
    let mut errors = Vec::new();

    for (sel_idx, selection) in wire.selections.iter().enumerate() {
        let mut conditions = Vec::with_capacity(selection.conditions.len());
        for (cond_idx, joined) in selection.conditions.iter().enumerate() {
            let path = format!("selections[{}].conditions[{}]", sel_idx, cond_idx);
            conditions.push(joined_from_wire(&path, joined, &mut errors)?);
        }
        selections.push(SelectionDefinition::new(conditions));
    }

    Ok(WireDefinition {
        definition: SelectionSetDefinition::new(selections),
        errors,
    })
}

/// Read a wire payload into the declarative form.
///
/// The definition is returned only if the payload honours the wire contract;
/// it is not validated beyond that.
pub fn definition_from_wire(wire: &WireSelectionSet) -> Result<SelectionSetDefinition, WireError> {
    let read = read_definition(wire)?;
    if read.errors.is_empty() {
        Ok(read.definition)
    } else {
        Err(WireError::Invalid(ValidationErrors::new(read.errors)))
    }
}

/// Read and validate a wire payload, reporting wire and validation errors
/// together.
pub fn from_wire(wire: &WireSelectionSet) -> Result<WorkspaceSelectionSet, WireError> {
    let WireDefinition {
        definition,
        mut errors,
    } = read_definition(wire)?;

    match validator::compile(&definition) {
        Ok(set) if errors.is_empty() => Ok(set),
        Ok(_) => Err(WireError::Invalid(ValidationErrors::new(errors))),
        Err(invalid) => {
            for err in invalid {
                let reported = errors
                    .iter()
                    .any(|wire_err| wire_err.path == err.path && wire_err.kind == err.kind);
                if !reported {
                    errors.push(err);
                }
            }
            Err(WireError::Invalid(ValidationErrors::new(errors)))
        }
    }
}

fn joined_from_wire(
    path: &str,
    joined: &WireJoinedCondition,
    errors: &mut Vec<ValidationError>,
) -> Result<JoinedConditionDefinition, WireError> {
    let condition = &joined.condition;
    let kind = condition_type_for(&condition.typename).ok_or_else(|| WireError::UnknownVariant {
        typename: condition.typename.clone(),
        path: format!("{}.condition", path),
    })?;

    let foreign: Vec<ConditionType> = condition
        .present_payloads()
        .into_iter()
        .filter(|other| *other != kind)
        .collect();
    if !foreign.is_empty() {
        let members: Vec<&str> = foreign.iter().map(|other| other.as_str()).collect();
        errors.push(ValidationError::new(
            ValidationErrorKind::AmbiguousCondition,
            path,
            format!(
                "Wire condition tagged '{}' also carries members of {} conditions",
                condition.typename,
                members.join(", ")
            ),
        ));
    }

    let slot = format!("{}.{}", path, kind.slot_name());
    let field = |member: &str, wire: &Option<String>, errors: &mut Vec<ValidationError>| {
        read_name(&slot, kind, Part::Field, member, wire.as_deref(), errors)
    };
    let operator = |member: &str, wire: &Option<String>, errors: &mut Vec<ValidationError>| {
        read_name(&slot, kind, Part::Operator, member, wire.as_deref(), errors)
    };

    let definition = JoinedConditionDefinition::new(joined.operator);
    let definition = match kind {
        ConditionType::String if !condition.string.is_empty() => {
            let c = &condition.string;
            definition.with_string(ConditionDefinition::new(
                field("stringField", &c.string_field, errors),
                operator("stringOperator", &c.string_operator, errors),
                c.string_values.clone().unwrap_or_default(),
            ))
        }
        ConditionType::Int if !condition.int.is_empty() => {
            let c = &condition.int;
            definition.with_int(ConditionDefinition::new(
                field("intField", &c.int_field, errors),
                operator("intOperator", &c.int_operator, errors),
                c.int_values.clone().unwrap_or_default(),
            ))
        }
        ConditionType::Rating if !condition.rating.is_empty() => {
            let c = &condition.rating;
            let rating_field = field("ratingField", &c.rating_field, errors);
            let rating_operator = operator("ratingOperator", &c.rating_operator, errors);
            let values = c
                .rating_values
                .iter()
                .flatten()
                .enumerate()
                .map(|(idx, value)| read_rating(&slot, &rating_field, idx, value, errors))
                .collect();
            definition.with_rating(ConditionDefinition::new(
                rating_field,
                rating_operator,
                values,
            ))
        }
        ConditionType::KeyValue if !condition.key_value.is_empty() => {
            let c = &condition.key_value;
            definition.with_key_value(ConditionDefinition::new(
                field("keyValueField", &c.key_value_field, errors),
                operator("keyValueOperator", &c.key_value_operator, errors),
                c.key_value_values.clone().unwrap_or_default(),
            ))
        }
        _ => missing_payload(path, condition, definition),
    };

    Ok(definition)
}

/// A tag without its members leaves every slot empty; validation reports it.
fn missing_payload(
    path: &str,
    condition: &WireCondition,
    definition: JoinedConditionDefinition,
) -> JoinedConditionDefinition {
    tracing::warn!(path, typename = %condition.typename, "wire condition has no payload");
    definition
}

#[derive(Debug, Clone, Copy)]
enum Part {
    Field,
    Operator,
}

/// Translate a wire field or operator name into its declarative name.
fn read_name(
    slot: &str,
    kind: ConditionType,
    part: Part,
    member: &str,
    wire: Option<&str>,
    errors: &mut Vec<ValidationError>,
) -> String {
    let (error_kind, path, translated, known) = match part {
        Part::Field => (
            ValidationErrorKind::InvalidField,
            format!("{}.field", slot),
            wire.and_then(|name| registry::field_from_wire(kind, name)),
            registry::field_wire_names(kind),
        ),
        Part::Operator => (
            ValidationErrorKind::InvalidOperator,
            format!("{}.operator", slot),
            wire.and_then(|name| registry::operator_from_wire(kind, name)),
            registry::operator_wire_names(kind),
        ),
    };

    match (wire, translated) {
        (_, Some(name)) => name.to_string(),
        (Some(name), None) => {
            errors.push(ValidationError::new(
                error_kind,
                path,
                format!(
                    "Wire name '{}' in '{}' is not valid for {} conditions; expected one of: {}",
                    name,
                    member,
                    kind,
                    known.join(", ")
                ),
            ));
            name.to_string()
        }
        (None, None) => {
            errors.push(ValidationError::new(
                error_kind,
                path,
                format!("Wire condition has no '{}' member", member),
            ));
            String::new()
        }
    }
}

fn read_rating(
    slot: &str,
    field: &str,
    idx: usize,
    wire: &str,
    errors: &mut Vec<ValidationError>,
) -> String {
    match Rating::from_wire(wire) {
        Some(rating) => rating.as_str().to_string(),
        None => {
            errors.push(ValidationError::type_mismatch(
                &format!("{}.values[{}]", slot, idx),
                field,
                &format!("'{}'", wire),
                &format!("wire rating ({})", Rating::WIRE_NAMES.join(", ")),
            ));
            wire.to_string()
        }
    }
}
