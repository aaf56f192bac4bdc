//! `selector check` command implementation.
//!
//! Validates one workspace file, or every workspace file in a directory, and
//! reports all selection errors at once.

use anyhow::{Context, Result, bail};
use selector_core::config::{self, WorkspaceDefinition};
use selector_policy::{SelectionValidator, ValidationErrorKind};
use std::path::Path;

/// A single check finding.
#[derive(Debug, Clone)]
pub struct CheckFinding {
    /// Workspace the finding belongs to.
    pub workspace: String,
    pub kind: ValidationErrorKind,
    /// Location within the workspace's selections.
    pub path: String,
    pub message: String,
}

/// Results from checking a set of workspaces.
#[derive(Debug, Default)]
pub struct CheckResults {
    pub workspaces: usize,
    pub findings: Vec<CheckFinding>,
}

impl CheckResults {
    pub fn has_errors(&self) -> bool {
        !self.findings.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.findings.len()
    }

    /// Print human-readable summary.
    pub fn print_summary(&self) {
        if !self.findings.is_empty() {
            println!("\n❌ Errors ({}):", self.findings.len());
            println!("{}", "─".repeat(60));
            for finding in &self.findings {
                println!(
                    "  ✗ [{}] {:?} at {}: {}",
                    finding.workspace, finding.kind, finding.path, finding.message
                );
            }
        }

        println!();
        println!("{}", "═".repeat(60));
        if self.findings.is_empty() {
            println!("✅ {} workspace(s) checked, all selections valid", self.workspaces);
        } else {
            println!(
                "Summary: {} error(s) in {} workspace(s)",
                self.error_count(),
                self.workspaces
            );
        }
    }
}

fn load(path: &Path) -> Result<Vec<WorkspaceDefinition>> {
    if path.is_dir() {
        config::load_dir(path)
            .with_context(|| format!("Failed to load workspaces from {}", path.display()))
    } else {
        let workspace = WorkspaceDefinition::from_file(path)
            .with_context(|| format!("Failed to load workspace {}", path.display()))?;
        Ok(vec![workspace])
    }
}

/// Check workspaces without printing anything.
pub fn run_quiet(path: &Path) -> Result<CheckResults> {
    let validator = SelectionValidator::new();
    let workspaces = load(path)?;

    let mut results = CheckResults {
        workspaces: workspaces.len(),
        findings: Vec::new(),
    };
    for workspace in &workspaces {
        let errors = validator.validate(&workspace.selections);
        tracing::debug!(workspace = %workspace.name, errors = errors.len(), "checked workspace");
        results
            .findings
            .extend(errors.into_iter().map(|err| CheckFinding {
                workspace: workspace.name.clone(),
                kind: err.kind,
                path: err.path,
                message: err.message,
            }));
    }

    Ok(results)
}

pub fn run(path: &Path) -> Result<()> {
    let results = run_quiet(path)?;
    results.print_summary();

    if results.has_errors() {
        bail!("{} selection error(s) found", results.error_count());
    }
    Ok(())
}
