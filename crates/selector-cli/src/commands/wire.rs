//! `selector wire` command implementation.

use anyhow::{Context, Result};
use std::path::Path;

use super::load_compiled;

/// Render the wire payload of a workspace as pretty JSON.
pub fn render(path: &Path) -> Result<String> {
    let (workspace, compiled) = load_compiled(path)?;
    let wire = selector_wire::to_wire(&compiled);
    tracing::info!(
        workspace = %workspace.name,
        selections = wire.selections.len(),
        "rendered wire payload"
    );
    wire.to_json_pretty().context("Failed to serialize wire payload")
}

pub fn run(path: &Path) -> Result<()> {
    println!("{}", render(path)?);
    Ok(())
}
