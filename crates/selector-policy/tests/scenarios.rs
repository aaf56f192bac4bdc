//! End-to-end selection scenarios: YAML workspace -> validator -> evaluator.
//!
//! Run with: cargo test --package selector-policy --test scenarios

use selector_core::config::WorkspaceDefinition;
use selector_core::registry::StringField;
use selector_policy::{AssetAttributes, ValidationErrorKind, compile, evaluate_set, validate};

fn workspace(yaml: &str) -> WorkspaceDefinition {
    WorkspaceDefinition::from_yaml(yaml).unwrap()
}

const PRODUCTION: &str = r#"
name: production
selections:
  - conditions:
      - operator: AND
        key_value_condition:
          field: labels
          operator: contains
          values:
            - key: environment
              value: production
"#;

/// An asset carrying the required label is selected.
#[test]
fn test_labels_contains_selects_asset() {
    let set = compile(&workspace(PRODUCTION).selections).unwrap();
    let asset = AssetAttributes::new()
        .with_label("environment", "production")
        .with_label("team", "x");
    assert!(evaluate_set(&set, &asset));
}

/// A different value under the same label key is not selected.
#[test]
fn test_labels_value_mismatch_rejects_asset() {
    let set = compile(&workspace(PRODUCTION).selections).unwrap();
    let asset = AssetAttributes::new().with_label("environment", "staging");
    assert!(!evaluate_set(&set, &asset));
}

/// AND_NOT removes docker hosts from the VM selection.
#[test]
fn test_and_not_excludes_docker_vms() {
    let set = compile(
        &workspace(
            r#"
name: vms
selections:
  - conditions:
      - operator: AND
        string_condition:
          field: asset_kind
          operator: equal
          values: [vm]
      - operator: AND_NOT
        string_condition:
          field: technology
          operator: contains
          values: [docker]
"#,
        )
        .selections,
    )
    .unwrap();

    let docker_vm = AssetAttributes::new()
        .with_string(StringField::AssetKind, "vm")
        .with_string(StringField::Technology, "docker-engine");
    assert!(!evaluate_set(&set, &docker_vm));

    let plain_vm = AssetAttributes::new()
        .with_string(StringField::AssetKind, "vm")
        .with_string(StringField::Technology, "kvm");
    assert!(evaluate_set(&set, &plain_vm));
}

/// Selections are ORed: matching the second one is enough.
#[test]
fn test_second_selection_matches() {
    let set = compile(
        &workspace(
            r#"
name: platforms
selections:
  - conditions:
      - string_condition:
          field: platform
          operator: equal
          values: [windows]
  - conditions:
      - string_condition:
          field: platform
          operator: equal
          values: [debian]
"#,
        )
        .selections,
    )
    .unwrap();

    let debian = AssetAttributes::new().with_string(StringField::Platform, "debian");
    assert!(evaluate_set(&set, &debian));

    let macos = AssetAttributes::new().with_string(StringField::Platform, "macos");
    assert!(!evaluate_set(&set, &macos));
}

/// Rating conditions do not support `contains`.
#[test]
fn test_rating_contains_rejected() {
    let definition = workspace(
        r#"
name: risky
selections:
  - conditions:
      - rating_condition:
          field: risk
          operator: contains
          values: [high]
"#,
    );

    let errors = validate(&definition.selections);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ValidationErrorKind::InvalidOperator);
    assert!(errors[0].message.contains("risk"));
    assert!(errors[0].message.contains("contains"));
}

/// A workspace without selections is valid but selects nothing.
#[test]
fn test_workspace_without_selections_selects_nothing() {
    let set = compile(&workspace("name: empty\n").selections).unwrap();
    let asset = AssetAttributes::new().with_string(StringField::Platform, "debian");
    assert!(!evaluate_set(&set, &asset));
}

/// Integer and rating conditions combine in one selection.
#[test]
fn test_risk_score_and_rating_selection() {
    let set = compile(
        &workspace(
            r#"
name: hot
selections:
  - conditions:
      - int_condition:
          field: risk_score
          operator: greater_than
          values: [70]
      - operator: AND_NOT
        rating_condition:
          field: risk
          operator: equal
          values: [none, low]
"#,
        )
        .selections,
    )
    .unwrap();

    let hot: AssetAttributes =
        serde_json::from_str(r#"{"risk_score": 90, "risk": "critical"}"#).unwrap();
    assert!(evaluate_set(&set, &hot));

    let mislabelled: AssetAttributes =
        serde_json::from_str(r#"{"risk_score": 90, "risk": "low"}"#).unwrap();
    assert!(!evaluate_set(&set, &mislabelled));

    let cold: AssetAttributes =
        serde_json::from_str(r#"{"risk_score": 10, "risk": "critical"}"#).unwrap();
    assert!(!evaluate_set(&set, &cold));
}
