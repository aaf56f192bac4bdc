//! Field registry.
//!
//! Static catalogs of the fields and operators each condition type accepts.
//! Every catalog is declared once with `catalog!`, which generates the typed
//! enum together with its declarative and wire name tables. Adding a field or
//! operator is an edit to one of those declarations.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The four kinds of selection condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionType {
    String,
    Int,
    Rating,
    KeyValue,
}

impl ConditionType {
    /// All condition types in declaration order.
    pub const ALL: [ConditionType; 4] = [
        ConditionType::String,
        ConditionType::Int,
        ConditionType::Rating,
        ConditionType::KeyValue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionType::String => "string",
            ConditionType::Int => "int",
            ConditionType::Rating => "rating",
            ConditionType::KeyValue => "key_value",
        }
    }

    /// Name of the declarative slot that holds a condition of this type.
    pub fn slot_name(&self) -> &'static str {
        match self {
            ConditionType::String => "string_condition",
            ConditionType::Int => "int_condition",
            ConditionType::Rating => "rating_condition",
            ConditionType::KeyValue => "key_value_condition",
        }
    }
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A name that is not part of a catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{name}' is not a valid {catalog}")]
pub struct UnknownName {
    pub catalog: &'static str,
    pub name: String,
}

macro_rules! catalog {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $decl:literal, $wire:literal; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every entry of the catalog.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            /// Declarative names, in catalog order.
            pub const NAMES: &'static [&'static str] = &[$($decl),+];
            /// Wire names, in catalog order.
            pub const WIRE_NAMES: &'static [&'static str] = &[$($wire),+];

            /// Declarative name.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $decl, )+
                }
            }

            /// Name used by the remote API.
            pub fn wire_name(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire, )+
                }
            }

            pub fn from_wire(wire: &str) -> Option<Self> {
                match wire {
                    $( $wire => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownName;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $decl => Ok($name::$variant), )+
                    _ => Err(UnknownName {
                        catalog: $label,
                        name: s.to_string(),
                    }),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

catalog! {
    /// Fields of string conditions.
    StringField ("string field") {
        Platform => "platform", "PLATFORM";
        PlatformVersion => "platform_version", "PLATFORM_VERSION";
        AssetName => "asset_name", "ASSET_NAME";
        AssetKind => "asset_kind", "ASSET_KIND";
        Technology => "technology", "TECHNOLOGY";
    }
}

catalog! {
    /// Fields of int conditions.
    IntField ("int field") {
        RiskScore => "risk_score", "RISK_SCORE";
    }
}

catalog! {
    /// Fields of rating conditions.
    RatingField ("rating field") {
        Risk => "risk", "RISK";
    }
}

catalog! {
    /// Fields of key-value conditions.
    KeyValueField ("key-value field") {
        Labels => "labels", "LABELS";
        Annotations => "annotations", "ANNOTATIONS";
    }
}

catalog! {
    /// Operators of string conditions.
    StringOperator ("string operator") {
        Equal => "equal", "EQUAL";
        NotEqual => "not_equal", "NOT_EQUAL";
        /// Substring match.
        Contains => "contains", "CONTAINS";
    }
}

catalog! {
    /// Operators of int conditions.
    IntOperator ("int operator") {
        Equal => "equal", "EQUAL";
        NotEqual => "not_equal", "NOT_EQUAL";
        GreaterThan => "greater_than", "GREATER_THAN";
        LessThan => "less_than", "LESS_THAN";
    }
}

catalog! {
    /// Operators of rating conditions.
    RatingOperator ("rating operator") {
        Equal => "equal", "EQUAL";
        NotEqual => "not_equal", "NOT_EQUAL";
    }
}

catalog! {
    /// Operators of key-value conditions.
    KeyValueOperator ("key-value operator") {
        /// The asset carries the exact key/value pair.
        Contains => "contains", "CONTAINS";
    }
}

catalog! {
    /// Risk rating tokens.
    Rating ("rating") {
        None => "none", "NONE";
        Low => "low", "LOW";
        Medium => "medium", "MEDIUM";
        High => "high", "HIGH";
        Critical => "critical", "CRITICAL";
    }
}

/// Declarative names of the fields valid for a condition type.
pub fn fields_for(kind: ConditionType) -> &'static [&'static str] {
    match kind {
        ConditionType::String => StringField::NAMES,
        ConditionType::Int => IntField::NAMES,
        ConditionType::Rating => RatingField::NAMES,
        ConditionType::KeyValue => KeyValueField::NAMES,
    }
}

/// Declarative names of the operators valid for a condition type.
pub fn operators_for(kind: ConditionType) -> &'static [&'static str] {
    match kind {
        ConditionType::String => StringOperator::NAMES,
        ConditionType::Int => IntOperator::NAMES,
        ConditionType::Rating => RatingOperator::NAMES,
        ConditionType::KeyValue => KeyValueOperator::NAMES,
    }
}

/// Wire names of the fields valid for a condition type.
pub fn field_wire_names(kind: ConditionType) -> &'static [&'static str] {
    match kind {
        ConditionType::String => StringField::WIRE_NAMES,
        ConditionType::Int => IntField::WIRE_NAMES,
        ConditionType::Rating => RatingField::WIRE_NAMES,
        ConditionType::KeyValue => KeyValueField::WIRE_NAMES,
    }
}

/// Wire names of the operators valid for a condition type.
pub fn operator_wire_names(kind: ConditionType) -> &'static [&'static str] {
    match kind {
        ConditionType::String => StringOperator::WIRE_NAMES,
        ConditionType::Int => IntOperator::WIRE_NAMES,
        ConditionType::Rating => RatingOperator::WIRE_NAMES,
        ConditionType::KeyValue => KeyValueOperator::WIRE_NAMES,
    }
}

pub fn is_valid_field(kind: ConditionType, field: &str) -> bool {
    fields_for(kind).contains(&field)
}

pub fn is_valid_operator(kind: ConditionType, operator: &str) -> bool {
    operators_for(kind).contains(&operator)
}

/// The condition type that owns a field name, if any.
pub fn condition_type_of_field(field: &str) -> Option<ConditionType> {
    ConditionType::ALL
        .into_iter()
        .find(|kind| is_valid_field(*kind, field))
}

/// Translate a declarative field name into its wire name.
pub fn field_wire_name(kind: ConditionType, field: &str) -> Option<&'static str> {
    translate(fields_for(kind), field_wire_names(kind), field)
}

/// Translate a wire field name into its declarative name.
pub fn field_from_wire(kind: ConditionType, wire: &str) -> Option<&'static str> {
    translate(field_wire_names(kind), fields_for(kind), wire)
}

/// Translate a declarative operator name into its wire name.
pub fn operator_wire_name(kind: ConditionType, operator: &str) -> Option<&'static str> {
    translate(operators_for(kind), operator_wire_names(kind), operator)
}

/// Translate a wire operator name into its declarative name.
pub fn operator_from_wire(kind: ConditionType, wire: &str) -> Option<&'static str> {
    translate(operator_wire_names(kind), operators_for(kind), wire)
}

fn translate(
    from: &'static [&'static str],
    to: &'static [&'static str],
    name: &str,
) -> Option<&'static str> {
    from.iter()
        .position(|candidate| *candidate == name)
        .map(|idx| to[idx])
}
