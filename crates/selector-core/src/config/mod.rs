//! Workspace configuration.
//!
//! Workspaces are declared in YAML, one workspace per file:
//!
//! ```yaml
//! name: production-vms
//! description: Production virtual machines outside of docker hosts
//! selections:
//!   - conditions:
//!       - operator: AND
//!         string_condition:
//!           field: asset_kind
//!           operator: equal
//!           values: [vm]
//! ```
//!
//! A directory of such files can be loaded at once with [`load_dir`].

pub mod selection_definition;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use selection_definition::{
    ConditionDefinition, IntConditionDefinition, JoinedConditionDefinition,
    KeyValueConditionDefinition, RatingConditionDefinition, SelectionDefinition,
    SelectionSetDefinition, StringConditionDefinition,
};

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// A workspace and the selections defining its assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceDefinition {
    /// Workspace name.
    pub name: String,

    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Asset selections.
    #[serde(default)]
    pub selections: SelectionSetDefinition,
}

impl WorkspaceDefinition {
    /// Load a workspace definition from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse a workspace definition from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let workspace: Self = serde_yaml::from_str(content)?;
        if workspace.name.trim().is_empty() {
            return Err(ConfigError::Config(
                "workspace name must not be empty".to_string(),
            ));
        }
        Ok(workspace)
    }

    /// Serialize the workspace back to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(ConfigError::from)
    }
}

/// Load every `*.yaml` / `*.yml` workspace file in a directory, sorted by file name.
pub fn load_dir(dir: impl AsRef<Path>) -> Result<Vec<WorkspaceDefinition>, ConfigError> {
    let dir = dir.as_ref();
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext == "yaml" || ext == "yml")
            .unwrap_or(false);
        if path.is_file() && is_yaml {
            paths.push(path);
        }
    }
    paths.sort();

    let mut workspaces = Vec::with_capacity(paths.len());
    for path in paths {
        tracing::debug!(path = %path.display(), "loading workspace definition");
        let workspace = WorkspaceDefinition::from_file(&path).map_err(|e| {
            ConfigError::Config(format!("{}: {}", path.display(), e))
        })?;
        workspaces.push(workspace);
    }

    if let Some(duplicate) = first_duplicate_name(&workspaces) {
        return Err(ConfigError::Config(format!(
            "workspace '{}' is defined more than once in {}",
            duplicate,
            dir.display()
        )));
    }

    Ok(workspaces)
}

fn first_duplicate_name(workspaces: &[WorkspaceDefinition]) -> Option<&str> {
    let mut seen = std::collections::HashSet::new();
    workspaces
        .iter()
        .map(|w| w.name.as_str())
        .find(|name| !seen.insert(*name))
}
