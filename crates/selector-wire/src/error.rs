//! Wire mapping errors.

use selector_policy::ValidationErrors;
use thiserror::Error;

/// Errors raised while reading a wire payload.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("{path}: unknown condition variant '{typename}'")]
    UnknownVariant { typename: String, path: String },

    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
}

impl WireError {
    /// The validation errors, if the payload decoded but did not validate.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            WireError::Invalid(errors) => Some(errors),
            WireError::UnknownVariant { .. } => None,
        }
    }
}
