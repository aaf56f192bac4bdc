//! Declarative selection definitions.
//!
//! This is the human-authored form of a selection set. Each joined condition
//! has four optional slots, one per condition type, and exactly one of them is
//! expected to be populated. Names and values are kept loosely typed here so
//! that invalid input reaches the validator instead of failing at parse time.
//!
//! ```yaml
//! selections:
//!   - conditions:
//!       - operator: AND
//!         key_value_condition:
//!           field: labels
//!           operator: contains
//!           values:
//!             - key: environment
//!               value: production
//! ```

use serde::{Deserialize, Serialize};

use crate::codec::encode_values;
use crate::condition::{
    Condition, JoinOperator, JoinedCondition, KeyValuePair, Selection, WorkspaceSelectionSet,
};
use crate::registry::ConditionType;

/// Ordered list of selections; an asset matches if any selection matches.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSetDefinition {
    pub selections: Vec<SelectionDefinition>,
}

impl SelectionSetDefinition {
    pub fn new(selections: Vec<SelectionDefinition>) -> Self {
        Self { selections }
    }
}

/// One selection: conditions folded left to right.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionDefinition {
    #[serde(default)]
    pub conditions: Vec<JoinedConditionDefinition>,
}

impl SelectionDefinition {
    pub fn new(conditions: Vec<JoinedConditionDefinition>) -> Self {
        Self { conditions }
    }
}

/// A join operator plus one slot per condition type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JoinedConditionDefinition {
    #[serde(default)]
    pub operator: JoinOperator,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_condition: Option<StringConditionDefinition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub int_condition: Option<IntConditionDefinition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_condition: Option<RatingConditionDefinition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_value_condition: Option<KeyValueConditionDefinition>,
}

impl JoinedConditionDefinition {
    /// A definition with no slot populated.
    pub fn new(operator: JoinOperator) -> Self {
        Self {
            operator,
            ..Default::default()
        }
    }

    pub fn with_string(mut self, condition: StringConditionDefinition) -> Self {
        self.string_condition = Some(condition);
        self
    }

    pub fn with_int(mut self, condition: IntConditionDefinition) -> Self {
        self.int_condition = Some(condition);
        self
    }

    pub fn with_rating(mut self, condition: RatingConditionDefinition) -> Self {
        self.rating_condition = Some(condition);
        self
    }

    pub fn with_key_value(mut self, condition: KeyValueConditionDefinition) -> Self {
        self.key_value_condition = Some(condition);
        self
    }

    /// Condition types whose slot is populated, in slot order.
    pub fn populated_slots(&self) -> Vec<ConditionType> {
        let mut slots = Vec::new();
        if self.string_condition.is_some() {
            slots.push(ConditionType::String);
        }
        if self.int_condition.is_some() {
            slots.push(ConditionType::Int);
        }
        if self.rating_condition.is_some() {
            slots.push(ConditionType::Rating);
        }
        if self.key_value_condition.is_some() {
            slots.push(ConditionType::KeyValue);
        }
        slots
    }
}

/// Field, operator and ORed values of one condition slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConditionDefinition<V> {
    pub field: String,
    pub operator: String,
    #[serde(default = "Vec::new")]
    pub values: Vec<V>,
}

impl<V> ConditionDefinition<V> {
    pub fn new(field: impl Into<String>, operator: impl Into<String>, values: Vec<V>) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            values,
        }
    }
}

pub type StringConditionDefinition = ConditionDefinition<String>;
/// Int values are read as `i64`; the validator rejects anything outside `i32`.
pub type IntConditionDefinition = ConditionDefinition<i64>;
/// Rating values are tokens such as `high`.
pub type RatingConditionDefinition = ConditionDefinition<String>;
pub type KeyValueConditionDefinition = ConditionDefinition<KeyValuePair>;

impl From<&JoinedCondition> for JoinedConditionDefinition {
    fn from(joined: &JoinedCondition) -> Self {
        let definition = JoinedConditionDefinition::new(joined.operator);
        match &joined.condition {
            Condition::String(c) => definition.with_string(ConditionDefinition::new(
                c.field.as_str(),
                c.operator.as_str(),
                encode_values(&c.values),
            )),
            Condition::Int(c) => definition.with_int(ConditionDefinition::new(
                c.field.as_str(),
                c.operator.as_str(),
                encode_values(&c.values),
            )),
            Condition::Rating(c) => definition.with_rating(ConditionDefinition::new(
                c.field.as_str(),
                c.operator.as_str(),
                encode_values(&c.values),
            )),
            Condition::KeyValue(c) => definition.with_key_value(ConditionDefinition::new(
                c.field.as_str(),
                c.operator.as_str(),
                encode_values(&c.values),
            )),
        }
    }
}

impl From<&Selection> for SelectionDefinition {
    fn from(selection: &Selection) -> Self {
        SelectionDefinition::new(selection.conditions().iter().map(Into::into).collect())
    }
}

impl From<&WorkspaceSelectionSet> for SelectionSetDefinition {
    fn from(set: &WorkspaceSelectionSet) -> Self {
        SelectionSetDefinition::new(set.selections().iter().map(Into::into).collect())
    }
}
