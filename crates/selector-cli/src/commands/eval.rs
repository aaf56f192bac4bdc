//! `selector eval` command implementation.
//!
//! Evaluates a list of assets against a workspace's selections. Assets are
//! read from JSON (`.json`) or YAML (any other extension).

use anyhow::{Context, Result};
use selector_core::WorkspaceSelectionSet;
use selector_policy::{AssetAttributes, SetExplanation};
use serde::Serialize;
use std::fs;
use std::path::Path;

use super::load_compiled;

/// Verdict for one asset.
#[derive(Debug, Clone, Serialize)]
pub struct EvalOutcome {
    pub asset: String,
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<SetExplanation>,
}

pub fn load_assets(path: &Path) -> Result<Vec<AssetAttributes>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read assets {}", path.display()))?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let assets: Vec<AssetAttributes> = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse assets {}", path.display()))?
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse assets {}", path.display()))?
    };
    Ok(assets)
}

pub fn evaluate_assets(
    set: &WorkspaceSelectionSet,
    assets: &[AssetAttributes],
    explain: bool,
) -> Vec<EvalOutcome> {
    assets
        .iter()
        .map(|asset| {
            if explain {
                let explanation = selector_policy::explain_set(set, asset);
                EvalOutcome {
                    asset: explanation.asset.clone(),
                    matched: explanation.matched,
                    explanation: Some(explanation),
                }
            } else {
                EvalOutcome {
                    asset: asset.display_name().to_string(),
                    matched: selector_policy::evaluate_set(set, asset),
                    explanation: None,
                }
            }
        })
        .collect()
}

pub fn run(workspace_path: &Path, assets_path: &Path, explain: bool) -> Result<()> {
    let (workspace, compiled) = load_compiled(workspace_path)?;
    let assets = load_assets(assets_path)?;
    let outcomes = evaluate_assets(&compiled, &assets, explain);

    if explain {
        let json =
            serde_json::to_string_pretty(&outcomes).context("Failed to serialize explanation")?;
        println!("{}", json);
        return Ok(());
    }

    for outcome in &outcomes {
        let icon = if outcome.matched { "✓" } else { "✗" };
        println!("  {} {}", icon, outcome.asset);
    }
    let selected = outcomes.iter().filter(|o| o.matched).count();
    println!();
    println!(
        "Workspace '{}' selects {} of {} asset(s)",
        workspace.name,
        selected,
        outcomes.len()
    );
    Ok(())
}
