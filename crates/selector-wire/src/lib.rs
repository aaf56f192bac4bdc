//! Wire mapping for workspace selections.
//!
//! Locally a joined condition has one explicit slot per condition type; the
//! remote GraphQL API uses a union discriminated by `__typename`. This crate
//! translates between the two without loss:
//!
//! - [`to_wire`] writes a typed set as a [`WireSelectionSet`]
//! - [`read_definition`] reads a payload into the declarative form and
//!   collects the wire errors next to it
//! - [`definition_from_wire`] does the same but fails on any wire error
//! - [`from_wire`] reads and validates a payload into the typed form

pub mod error;
pub mod mapper;
pub mod schema;

pub use error::WireError;
pub use mapper::{WireDefinition, definition_from_wire, from_wire, read_definition, to_wire};
pub use schema::{
    WireCondition, WireIntCondition, WireJoinedCondition, WireKeyValueCondition,
    WireRatingCondition, WireSelection, WireSelectionSet, WireStringCondition,
};
