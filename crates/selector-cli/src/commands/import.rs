//! `selector import` command implementation.
//!
//! Turns a wire payload, as returned by the remote API, into a declarative
//! workspace definition. The output is written even when the imported
//! selections do not validate, so that they can be fixed by hand; each
//! validation error is logged as a warning.

use anyhow::{Context, Result};
use selector_core::config::WorkspaceDefinition;
use selector_wire::WireSelectionSet;
use std::fs;
use std::path::Path;

/// Render the workspace definition of a wire payload as YAML.
pub fn render(path: &Path, name: &str) -> Result<String> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read wire payload {}", path.display()))?;
    let wire = WireSelectionSet::from_json(&content)
        .with_context(|| format!("Failed to parse wire payload {}", path.display()))?;
    let read = selector_wire::read_definition(&wire)
        .with_context(|| format!("Failed to map wire payload {}", path.display()))?;
    let selections = read.definition;

    let validated = selector_policy::validate(&selections);
    let reported = read.errors.iter().chain(validated.iter().filter(|err| {
        !read
            .errors
            .iter()
            .any(|wire_err| wire_err.path == err.path && wire_err.kind == err.kind)
    }));
    for err in reported {
        tracing::warn!(path = %err.path, kind = ?err.kind, "{}", err.message);
    }

    let workspace = WorkspaceDefinition {
        name: name.to_string(),
        description: None,
        selections,
    };
    workspace
        .to_yaml()
        .context("Failed to serialize workspace definition")
}

pub fn run(path: &Path, name: &str) -> Result<()> {
    print!("{}", render(path, name)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use selector_core::registry::ConditionType;

    const PAYLOAD: &str = r#"{
        "selections": [{"conditions": [
            {"operator": "AND", "condition": {
                "__typename": "WorkspaceSelectionKeyValueCondition",
                "keyValueField": "LABELS",
                "keyValueOperator": "CONTAINS",
                "keyValueValues": [{"key": "environment", "value": "production"}]
            }},
            {"operator": "AND_NOT", "condition": {
                "__typename": "WorkspaceSelectionRatingCondition",
                "ratingField": "RISK",
                "ratingOperator": "EQUAL",
                "ratingValues": ["NONE"]
            }}
        ]}]
    }"#;

    #[test]
    fn test_import_renders_declarative_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("wire.json");
        fs::write(&file, PAYLOAD).unwrap();

        let yaml = render(&file, "production").unwrap();
        let workspace = WorkspaceDefinition::from_yaml(&yaml).unwrap();
        assert_eq!(workspace.name, "production");

        let conditions = &workspace.selections.selections[0].conditions;
        assert_eq!(conditions[0].populated_slots(), vec![ConditionType::KeyValue]);
        let rating = conditions[1].rating_condition.as_ref().unwrap();
        assert_eq!(rating.field, "risk");
        assert_eq!(rating.values, vec!["none".to_string()]);
        assert!(selector_policy::validate(&workspace.selections).is_empty());
    }

    #[test]
    fn test_import_unknown_variant_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("wire.json");
        fs::write(
            &file,
            r#"{"selections": [{"conditions": [
                {"operator": "AND", "condition": {"__typename": "WorkspaceSelectionGeoCondition"}}
            ]}]}"#,
        )
        .unwrap();

        let err = render(&file, "geo").unwrap_err();
        assert!(format!("{:#}", err).contains("WorkspaceSelectionGeoCondition"));
    }

    #[test]
    fn test_import_keeps_invalid_selections() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("wire.json");
        fs::write(
            &file,
            r#"{"selections": [{"conditions": [
                {"operator": "AND", "condition": {
                    "__typename": "WorkspaceSelectionStringCondition",
                    "stringField": "OWNER",
                    "stringOperator": "EQUAL",
                    "stringValues": ["sre"]
                }}
            ]}]}"#,
        )
        .unwrap();

        let yaml = render(&file, "owners").unwrap();
        assert!(yaml.contains("field: OWNER"));
    }

    #[test]
    fn test_import_keeps_partial_payload() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("wire.json");
        fs::write(
            &file,
            r#"{"selections": [{"conditions": [
                {"operator": "AND", "condition": {
                    "__typename": "WorkspaceSelectionStringCondition",
                    "stringField": "PLATFORM",
                    "stringValues": ["debian"]
                }}
            ]}]}"#,
        )
        .unwrap();

        let yaml = render(&file, "debian").unwrap();
        let workspace = WorkspaceDefinition::from_yaml(&yaml).unwrap();
        let string = workspace.selections.selections[0].conditions[0]
            .string_condition
            .as_ref()
            .unwrap();
        assert_eq!(string.field, "platform");
        assert_eq!(string.operator, "");
        assert_eq!(string.values, vec!["debian".to_string()]);
    }
}
