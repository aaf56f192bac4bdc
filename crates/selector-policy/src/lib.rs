//! Selection policy: validation and evaluation.
//!
//! A declarative [`SelectionSetDefinition`](selector_core::SelectionSetDefinition)
//! is checked by the [`validator`], which reports every violation at once and
//! produces a typed [`WorkspaceSelectionSet`](selector_core::WorkspaceSelectionSet).
//! The [`evaluator`] then decides whether an asset, described by its
//! [`AssetAttributes`], belongs to the workspace.

pub mod asset;
pub mod error;
pub mod evaluator;
pub mod validator;

pub use asset::AssetAttributes;
pub use error::{ValidationError, ValidationErrorKind, ValidationErrors};
pub use evaluator::{
    ConditionTrace, SelectionTrace, SetExplanation, evaluate, evaluate_condition, evaluate_set,
    explain, explain_set,
};
pub use validator::{SelectionValidator, compile, validate};
