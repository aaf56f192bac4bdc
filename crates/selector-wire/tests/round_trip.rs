//! Wire round-trip and schema conformance tests.
//!
//! Run with: cargo test --package selector-wire --test round_trip

use selector_core::condition::{
    IntCondition, JoinedCondition, KeyValueCondition, KeyValuePair, RatingCondition, Selection,
    StringCondition, WorkspaceSelectionSet,
};
use selector_core::config::{SelectionSetDefinition, WorkspaceDefinition};
use selector_core::registry::{
    ConditionType, IntField, IntOperator, KeyValueField, KeyValueOperator, Rating, RatingField,
    RatingOperator, StringField, StringOperator,
};
use selector_wire::{WireError, WireSelectionSet, definition_from_wire, from_wire, to_wire};

/// One selection using every condition kind.
fn all_kinds() -> WorkspaceSelectionSet {
    let selection = Selection::new(vec![
        JoinedCondition::and(StringCondition {
            field: StringField::Platform,
            operator: StringOperator::Equal,
            values: vec!["debian".to_string(), "ubuntu".to_string()],
        }),
        JoinedCondition::and(IntCondition {
            field: IntField::RiskScore,
            operator: IntOperator::GreaterThan,
            values: vec![i32::MIN, 50, i32::MAX],
        }),
        JoinedCondition::and_not(RatingCondition {
            field: RatingField::Risk,
            operator: RatingOperator::Equal,
            values: vec![Rating::None, Rating::Low],
        }),
        JoinedCondition::and(KeyValueCondition {
            field: KeyValueField::Labels,
            operator: KeyValueOperator::Contains,
            values: vec![
                KeyValuePair::new("environment", "production"),
                KeyValuePair::new("tier", ""),
            ],
        }),
    ])
    .unwrap();

    let second = Selection::new(vec![JoinedCondition::and_not(StringCondition {
        field: StringField::Technology,
        operator: StringOperator::Contains,
        values: vec!["docker".to_string()],
    })])
    .unwrap();

    WorkspaceSelectionSet::new(vec![selection, second])
}

fn assert_matches_schema(instance: &serde_json::Value) {
    let schema: serde_json::Value = serde_json::from_str(include_str!(
        "../../../schemas/WireSelectionSet.schema.json"
    ))
    .expect("schema must parse");

    let validator = jsonschema::draft202012::options()
        .build(&schema)
        .expect("schema must compile");

    if !validator.is_valid(instance) {
        let mut msgs = Vec::new();
        for (idx, err) in validator.iter_errors(instance).take(20).enumerate() {
            msgs.push(format!("{}: {}", idx + 1, err));
        }
        panic!("wire payload did not validate: {}", msgs.join("; "));
    }
}

#[test]
fn test_round_trip_all_kinds() {
    let set = all_kinds();
    let wire = to_wire(&set);
    assert_eq!(from_wire(&wire).unwrap(), set);
}

#[test]
fn test_round_trip_through_json() {
    let set = all_kinds();
    let json = to_wire(&set).to_json_pretty().unwrap();
    let wire = WireSelectionSet::from_json(&json).unwrap();
    assert_eq!(from_wire(&wire).unwrap(), set);
}

#[test]
fn test_each_condition_fills_exactly_one_slot() {
    let definition = definition_from_wire(&to_wire(&all_kinds())).unwrap();
    let slots: Vec<Vec<ConditionType>> = definition.selections[0]
        .conditions
        .iter()
        .map(|c| c.populated_slots())
        .collect();
    assert_eq!(
        slots,
        vec![
            vec![ConditionType::String],
            vec![ConditionType::Int],
            vec![ConditionType::Rating],
            vec![ConditionType::KeyValue],
        ]
    );
}

#[test]
fn test_wire_payload_matches_schema() {
    let instance = serde_json::to_value(to_wire(&all_kinds())).unwrap();
    assert_matches_schema(&instance);

    let condition = &instance["selections"][0]["conditions"][2];
    assert_eq!(condition["operator"], "AND_NOT");
    assert_eq!(
        condition["condition"]["__typename"],
        "WorkspaceSelectionRatingCondition"
    );
    assert_eq!(
        condition["condition"]["ratingValues"],
        serde_json::json!(["NONE", "LOW"])
    );
    assert!(condition["condition"].get("stringField").is_none());
}

#[test]
fn test_declarative_yaml_to_wire_and_back() {
    let workspace = WorkspaceDefinition::from_yaml(
        r#"
name: production-vms
selections:
  - conditions:
      - operator: AND
        string_condition:
          field: asset_kind
          operator: equal
          values: [vm]
      - operator: AND_NOT
        key_value_condition:
          field: annotations
          operator: contains
          values:
            - key: lifecycle
              value: retired
"#,
    )
    .unwrap();

    let typed = selector_policy::compile(&workspace.selections).unwrap();
    let wire = to_wire(&typed);
    assert_matches_schema(&serde_json::to_value(&wire).unwrap());

    let imported: SelectionSetDefinition = definition_from_wire(&wire).unwrap();
    assert_eq!(imported, workspace.selections);
}

#[test]
fn test_unknown_variant_is_not_validation_error() {
    let wire = WireSelectionSet::from_json(
        r#"{"selections": [{"conditions": [
            {"operator": "AND", "condition": {"__typename": "WorkspaceSelectionDateCondition"}}
        ]}]}"#,
    )
    .unwrap();

    let err = from_wire(&wire).unwrap_err();
    assert!(matches!(err, WireError::UnknownVariant { .. }));
    assert!(err.validation_errors().is_none());
    assert!(err.to_string().contains("WorkspaceSelectionDateCondition"));
}
