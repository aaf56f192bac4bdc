//! Selection evaluator.
//!
//! A selection is a left fold over its joined conditions starting from
//! `true`: `AND` keeps the accumulator only if the condition matches,
//! `AND_NOT` only if it does not. A selection set matches if any of its
//! selections matches; an empty set matches nothing.

use selector_core::condition::{
    Condition, JoinOperator, JoinedCondition, Selection, WorkspaceSelectionSet,
};
use selector_core::registry::{
    ConditionType, IntOperator, KeyValueOperator, RatingOperator, StringOperator,
};
use serde::Serialize;

use crate::asset::AssetAttributes;

/// Whether `asset` satisfies `condition` for ANY of the condition's values.
pub fn evaluate_condition(condition: &Condition, asset: &AssetAttributes) -> bool {
    match condition {
        Condition::String(c) => {
            let Some(actual) = asset.string(c.field) else {
                return false;
            };
            c.values.iter().any(|expected| match c.operator {
                StringOperator::Equal => actual == expected,
                StringOperator::NotEqual => actual != expected,
                StringOperator::Contains => actual.contains(expected.as_str()),
            })
        }
        Condition::Int(c) => {
            let Some(actual) = asset.int(c.field) else {
                return false;
            };
            c.values.iter().any(|expected| match c.operator {
                IntOperator::Equal => actual == *expected,
                IntOperator::NotEqual => actual != *expected,
                IntOperator::GreaterThan => actual > *expected,
                IntOperator::LessThan => actual < *expected,
            })
        }
        Condition::Rating(c) => {
            let Some(actual) = asset.rating(c.field) else {
                return false;
            };
            c.values.iter().any(|expected| match c.operator {
                RatingOperator::Equal => actual == *expected,
                RatingOperator::NotEqual => actual != *expected,
            })
        }
        Condition::KeyValue(c) => {
            let pairs = asset.key_values(c.field);
            c.values.iter().any(|expected| match c.operator {
                KeyValueOperator::Contains => pairs.get(&expected.key) == Some(&expected.value),
            })
        }
    }
}

/// Fold one joined condition into the accumulator.
fn fold(acc: bool, joined: &JoinedCondition, matched: bool) -> bool {
    match joined.operator {
        JoinOperator::And => acc && matched,
        JoinOperator::AndNot => acc && !matched,
    }
}

/// Evaluate a selection against an asset.
pub fn evaluate(selection: &Selection, asset: &AssetAttributes) -> bool {
    let mut acc = true;
    for joined in selection.conditions() {
        if !acc {
            break;
        }
        let matched = evaluate_condition(&joined.condition, asset);
        acc = fold(acc, joined, matched);
    }
    acc
}

/// Evaluate a selection set against an asset.
pub fn evaluate_set(set: &WorkspaceSelectionSet, asset: &AssetAttributes) -> bool {
    let matched = set.selections().iter().any(|s| evaluate(s, asset));
    tracing::debug!(
        asset = asset.display_name(),
        selections = set.selections().len(),
        matched,
        "evaluated selection set"
    );
    matched
}

/// One fold step of an explained selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionTrace {
    pub join: JoinOperator,
    pub condition_type: ConditionType,
    pub field: &'static str,
    pub operator: &'static str,
    /// Whether the asset satisfied the condition itself.
    pub matched: bool,
    /// Accumulator after this step.
    pub accumulated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionTrace {
    pub matched: bool,
    pub conditions: Vec<ConditionTrace>,
}

/// Step-by-step account of how a selection set judged one asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetExplanation {
    pub asset: String,
    pub matched: bool,
    pub selections: Vec<SelectionTrace>,
}

/// Explain a selection; every condition is evaluated, without short-circuiting.
pub fn explain(selection: &Selection, asset: &AssetAttributes) -> SelectionTrace {
    let mut acc = true;
    let mut conditions = Vec::with_capacity(selection.len());
    for joined in selection.conditions() {
        let matched = evaluate_condition(&joined.condition, asset);
        acc = fold(acc, joined, matched);
        conditions.push(ConditionTrace {
            join: joined.operator,
            condition_type: joined.condition.condition_type(),
            field: joined.condition.field_name(),
            operator: joined.condition.operator_name(),
            matched,
            accumulated: acc,
        });
    }
    SelectionTrace {
        matched: acc,
        conditions,
    }
}

/// Explain a selection set.
pub fn explain_set(set: &WorkspaceSelectionSet, asset: &AssetAttributes) -> SetExplanation {
    let selections: Vec<SelectionTrace> = set
        .selections()
        .iter()
        .map(|s| explain(s, asset))
        .collect();
    SetExplanation {
        asset: asset.display_name().to_string(),
        matched: selections.iter().any(|s| s.matched),
        selections,
    }
}
