//! Typed condition model.
//!
//! A [`Condition`] is exactly one of the four condition kinds; the field and
//! operator of each kind come from that kind's catalog, so a field/operator
//! combination that the registry rejects cannot be expressed here. Values
//! within a condition are ORed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::registry::{
    ConditionType, IntField, IntOperator, KeyValueField, KeyValueOperator, Rating, RatingField,
    RatingOperator, StringField, StringOperator,
};

/// How a condition folds into the result accumulated so far in its selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum JoinOperator {
    #[default]
    #[serde(rename = "AND", alias = "and")]
    And,
    #[serde(rename = "AND_NOT", alias = "and_not")]
    AndNot,
}

impl fmt::Display for JoinOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinOperator::And => write!(f, "AND"),
            JoinOperator::AndNot => write!(f, "AND_NOT"),
        }
    }
}

/// A key/value pair, as matched against asset labels and annotations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeyValuePair {
    pub key: String,
    pub value: String,
}

impl KeyValuePair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringCondition {
    pub field: StringField,
    pub operator: StringOperator,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntCondition {
    pub field: IntField,
    pub operator: IntOperator,
    pub values: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingCondition {
    pub field: RatingField,
    pub operator: RatingOperator,
    pub values: Vec<Rating>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValueCondition {
    pub field: KeyValueField,
    pub operator: KeyValueOperator,
    pub values: Vec<KeyValuePair>,
}

/// A single typed filter test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    String(StringCondition),
    Int(IntCondition),
    Rating(RatingCondition),
    KeyValue(KeyValueCondition),
}

impl Condition {
    pub fn condition_type(&self) -> ConditionType {
        match self {
            Condition::String(_) => ConditionType::String,
            Condition::Int(_) => ConditionType::Int,
            Condition::Rating(_) => ConditionType::Rating,
            Condition::KeyValue(_) => ConditionType::KeyValue,
        }
    }

    /// Declarative name of the condition's field.
    pub fn field_name(&self) -> &'static str {
        match self {
            Condition::String(c) => c.field.as_str(),
            Condition::Int(c) => c.field.as_str(),
            Condition::Rating(c) => c.field.as_str(),
            Condition::KeyValue(c) => c.field.as_str(),
        }
    }

    /// Declarative name of the condition's operator.
    pub fn operator_name(&self) -> &'static str {
        match self {
            Condition::String(c) => c.operator.as_str(),
            Condition::Int(c) => c.operator.as_str(),
            Condition::Rating(c) => c.operator.as_str(),
            Condition::KeyValue(c) => c.operator.as_str(),
        }
    }

    pub fn value_count(&self) -> usize {
        match self {
            Condition::String(c) => c.values.len(),
            Condition::Int(c) => c.values.len(),
            Condition::Rating(c) => c.values.len(),
            Condition::KeyValue(c) => c.values.len(),
        }
    }
}

impl From<StringCondition> for Condition {
    fn from(c: StringCondition) -> Self {
        Condition::String(c)
    }
}

impl From<IntCondition> for Condition {
    fn from(c: IntCondition) -> Self {
        Condition::Int(c)
    }
}

impl From<RatingCondition> for Condition {
    fn from(c: RatingCondition) -> Self {
        Condition::Rating(c)
    }
}

impl From<KeyValueCondition> for Condition {
    fn from(c: KeyValueCondition) -> Self {
        Condition::KeyValue(c)
    }
}

/// A condition together with the operator joining it to its predecessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedCondition {
    pub operator: JoinOperator,
    pub condition: Condition,
}

impl JoinedCondition {
    pub fn and(condition: impl Into<Condition>) -> Self {
        Self {
            operator: JoinOperator::And,
            condition: condition.into(),
        }
    }

    pub fn and_not(condition: impl Into<Condition>) -> Self {
        Self {
            operator: JoinOperator::AndNot,
            condition: condition.into(),
        }
    }
}

/// An ordered, non-empty fold of joined conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    conditions: Vec<JoinedCondition>,
}

impl Selection {
    /// Returns `None` when `conditions` is empty.
    pub fn new(conditions: Vec<JoinedCondition>) -> Option<Self> {
        if conditions.is_empty() {
            None
        } else {
            Some(Self { conditions })
        }
    }

    pub fn conditions(&self) -> &[JoinedCondition] {
        &self.conditions
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Always false for a constructed selection.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// The ORed list of selections defining workspace membership.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkspaceSelectionSet {
    selections: Vec<Selection>,
}

impl WorkspaceSelectionSet {
    pub fn new(selections: Vec<Selection>) -> Self {
        Self { selections }
    }

    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Total number of conditions across all selections.
    pub fn condition_count(&self) -> usize {
        self.selections.iter().map(Selection::len).sum()
    }
}
