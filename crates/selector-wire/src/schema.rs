//! Wire schema of workspace selections.
//!
//! The remote API models a condition as a GraphQL union: every condition
//! object carries a `__typename` tag and only the members of its own variant,
//! each prefixed with the variant name (`stringField`, `intValues`, ...).
//!
//! ```json
//! {
//!   "__typename": "WorkspaceSelectionKeyValueCondition",
//!   "keyValueField": "LABELS",
//!   "keyValueOperator": "CONTAINS",
//!   "keyValueValues": [{ "key": "environment", "value": "production" }]
//! }
//! ```
//!
//! Every member is an optional raw string so that a partly filled payload, or
//! one using names this build does not know, still decodes and is reported by
//! the mapper. See `schemas/WireSelectionSet.schema.json`.

use selector_core::condition::{JoinOperator, KeyValuePair};
use selector_core::registry::ConditionType;
use serde::{Deserialize, Serialize};

pub const STRING_CONDITION: &str = "WorkspaceSelectionStringCondition";
pub const INT_CONDITION: &str = "WorkspaceSelectionIntCondition";
pub const RATING_CONDITION: &str = "WorkspaceSelectionRatingCondition";
pub const KEY_VALUE_CONDITION: &str = "WorkspaceSelectionKeyValueCondition";

/// The `__typename` of a condition type.
pub fn typename_for(kind: ConditionType) -> &'static str {
    match kind {
        ConditionType::String => STRING_CONDITION,
        ConditionType::Int => INT_CONDITION,
        ConditionType::Rating => RATING_CONDITION,
        ConditionType::KeyValue => KEY_VALUE_CONDITION,
    }
}

/// The condition type named by a `__typename`, if known.
pub fn condition_type_for(typename: &str) -> Option<ConditionType> {
    ConditionType::ALL
        .into_iter()
        .find(|kind| typename_for(*kind) == typename)
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WireSelectionSet {
    #[serde(default)]
    pub selections: Vec<WireSelection>,
}

impl WireSelectionSet {
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WireSelection {
    #[serde(default)]
    pub conditions: Vec<WireJoinedCondition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireJoinedCondition {
    pub operator: JoinOperator,
    pub condition: WireCondition,
}

/// A tagged condition. Only the members of the variant named by `typename`
/// are expected to be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireCondition {
    #[serde(rename = "__typename")]
    pub typename: String,

    #[serde(flatten)]
    pub string: WireStringCondition,

    #[serde(flatten)]
    pub int: WireIntCondition,

    #[serde(flatten)]
    pub rating: WireRatingCondition,

    #[serde(flatten)]
    pub key_value: WireKeyValueCondition,
}

impl WireCondition {
    fn tagged(kind: ConditionType) -> Self {
        Self {
            typename: typename_for(kind).to_string(),
            string: WireStringCondition::default(),
            int: WireIntCondition::default(),
            rating: WireRatingCondition::default(),
            key_value: WireKeyValueCondition::default(),
        }
    }

    pub fn string(payload: WireStringCondition) -> Self {
        Self {
            string: payload,
            ..Self::tagged(ConditionType::String)
        }
    }

    pub fn int(payload: WireIntCondition) -> Self {
        Self {
            int: payload,
            ..Self::tagged(ConditionType::Int)
        }
    }

    pub fn rating(payload: WireRatingCondition) -> Self {
        Self {
            rating: payload,
            ..Self::tagged(ConditionType::Rating)
        }
    }

    pub fn key_value(payload: WireKeyValueCondition) -> Self {
        Self {
            key_value: payload,
            ..Self::tagged(ConditionType::KeyValue)
        }
    }

    /// Condition types with at least one member present.
    pub fn present_payloads(&self) -> Vec<ConditionType> {
        let mut present = Vec::new();
        if !self.string.is_empty() {
            present.push(ConditionType::String);
        }
        if !self.int.is_empty() {
            present.push(ConditionType::Int);
        }
        if !self.rating.is_empty() {
            present.push(ConditionType::Rating);
        }
        if !self.key_value.is_empty() {
            present.push(ConditionType::KeyValue);
        }
        present
    }
}

/// Generates a variant's payload: every member optional, so a partly filled
/// payload still reaches the mapper.
macro_rules! wire_payload {
    (
        $(#[$meta:meta])*
        $name:ident { $field:ident, $operator:ident, $values:ident: $value:ty }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub $field: Option<String>,
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub $operator: Option<String>,
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub $values: Option<Vec<$value>>,
        }

        impl $name {
            pub fn new(
                field: impl Into<String>,
                operator: impl Into<String>,
                values: Vec<$value>,
            ) -> Self {
                Self {
                    $field: Some(field.into()),
                    $operator: Some(operator.into()),
                    $values: Some(values),
                }
            }

            /// No member of the payload is present.
            pub fn is_empty(&self) -> bool {
                self.$field.is_none() && self.$operator.is_none() && self.$values.is_none()
            }
        }
    };
}

wire_payload! {
    WireStringCondition { string_field, string_operator, string_values: String }
}

wire_payload! {
    /// Int values are `i64` on the wire; values outside `i32` fail validation.
    WireIntCondition { int_field, int_operator, int_values: i64 }
}

wire_payload! {
    WireRatingCondition { rating_field, rating_operator, rating_values: String }
}

wire_payload! {
    WireKeyValueCondition { key_value_field, key_value_operator, key_value_values: KeyValuePair }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typename_lookup() {
        for kind in ConditionType::ALL {
            assert_eq!(condition_type_for(typename_for(kind)), Some(kind));
        }
        assert_eq!(condition_type_for("WorkspaceSelectionBoolCondition"), None);
    }

    #[test]
    fn test_serialize_writes_only_tagged_members() {
        let condition = WireCondition::rating(WireRatingCondition::new(
            "RISK",
            "EQUAL",
            vec!["HIGH".to_string()],
        ));
        let value = serde_json::to_value(&condition).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "__typename": "WorkspaceSelectionRatingCondition",
                "ratingField": "RISK",
                "ratingOperator": "EQUAL",
                "ratingValues": ["HIGH"]
            })
        );
    }

    #[test]
    fn test_deserialize_picks_present_payload() {
        let condition: WireCondition = serde_json::from_str(
            r#"{
                "__typename": "WorkspaceSelectionKeyValueCondition",
                "keyValueField": "LABELS",
                "keyValueOperator": "CONTAINS",
                "keyValueValues": [{"key": "environment", "value": "production"}]
            }"#,
        )
        .unwrap();

        assert_eq!(condition.present_payloads(), vec![ConditionType::KeyValue]);
        assert_eq!(
            condition.key_value.key_value_values,
            Some(vec![KeyValuePair::new("environment", "production")])
        );
    }

    #[test]
    fn test_deserialize_tag_without_payload() {
        let condition: WireCondition =
            serde_json::from_str(r#"{"__typename": "WorkspaceSelectionIntCondition"}"#).unwrap();
        assert!(condition.present_payloads().is_empty());
    }

    #[test]
    fn test_join_operator_on_wire() {
        let joined: WireJoinedCondition = serde_json::from_str(
            r#"{
                "operator": "AND_NOT",
                "condition": {
                    "__typename": "WorkspaceSelectionStringCondition",
                    "stringField": "TECHNOLOGY",
                    "stringOperator": "CONTAINS",
                    "stringValues": ["docker"]
                }
            }"#,
        )
        .unwrap();
        assert_eq!(joined.operator, JoinOperator::AndNot);
        assert_eq!(
            joined.condition.string.string_values,
            Some(vec!["docker".to_string()])
        );
    }

    #[test]
    fn test_deserialize_partial_payload() {
        let condition: WireCondition = serde_json::from_str(
            r#"{
                "__typename": "WorkspaceSelectionStringCondition",
                "stringField": "PLATFORM",
                "stringValues": ["debian"]
            }"#,
        )
        .unwrap();
        assert_eq!(condition.present_payloads(), vec![ConditionType::String]);
        assert_eq!(condition.string.string_field.as_deref(), Some("PLATFORM"));
        assert_eq!(condition.string.string_operator, None);
    }

    #[test]
    fn test_join_operator_is_required() {
        let result: Result<WireJoinedCondition, _> = serde_json::from_str(
            r#"{"condition": {
                "__typename": "WorkspaceSelectionRatingCondition",
                "ratingField": "RISK",
                "ratingOperator": "EQUAL",
                "ratingValues": ["HIGH"]
            }}"#,
        );
        assert!(result.is_err());
    }
}
