//! CLI command implementations.

pub mod check;
pub mod eval;
pub mod import;
pub mod wire;

use anyhow::{Context, Result};
use selector_core::WorkspaceSelectionSet;
use selector_core::config::WorkspaceDefinition;
use std::path::Path;

/// Load a workspace file and compile its selections, failing on the first
/// invalid definition with every validation error in the message.
pub fn load_compiled(path: &Path) -> Result<(WorkspaceDefinition, WorkspaceSelectionSet)> {
    let workspace = WorkspaceDefinition::from_file(path)
        .with_context(|| format!("Failed to load workspace {}", path.display()))?;
    let compiled = selector_policy::compile(&workspace.selections).with_context(|| {
        format!(
            "Workspace '{}' has invalid selections; run `selector check {}` for details",
            workspace.name,
            path.display()
        )
    })?;
    Ok((workspace, compiled))
}
