//! Workspace asset-selection model.
//!
//! - [`registry`]: closed catalogs of fields and operators per condition type
//! - [`codec`]: typed decoding of declarative condition values
//! - [`condition`]: the typed condition model consumed by evaluation and wire mapping
//! - [`config`]: the declarative (YAML) form with one optional slot per condition type

pub mod codec;
pub mod condition;
pub mod config;
pub mod registry;

pub use codec::{CodecError, ValueCodec};
pub use condition::{
    Condition, IntCondition, JoinOperator, JoinedCondition, KeyValueCondition, KeyValuePair,
    RatingCondition, Selection, StringCondition, WorkspaceSelectionSet,
};
pub use config::{
    ConditionDefinition, ConfigError, JoinedConditionDefinition, SelectionDefinition,
    SelectionSetDefinition, WorkspaceDefinition,
};
pub use registry::{
    ConditionType, IntField, IntOperator, KeyValueField, KeyValueOperator, Rating, RatingField,
    RatingOperator, StringField, StringOperator,
};
