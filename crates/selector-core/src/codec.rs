//! Condition value codec.
//!
//! Converts between the loosely typed values of the declarative form
//! (strings, `i64`, rating tokens as strings, key/value pairs) and the typed
//! values carried by a [`Condition`](crate::condition::Condition).

use thiserror::Error;

use crate::condition::KeyValuePair;
use crate::registry::Rating;

/// A value list that cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("at least one value is required")]
    Empty,

    #[error("value #{index} ({value}) is not a valid {expected}")]
    TypeMismatch {
        index: usize,
        value: String,
        expected: &'static str,
    },
}

/// A typed condition value and its declarative representation.
pub trait ValueCodec: Sized {
    /// Declarative representation.
    type Raw;

    /// Description of what a well-typed value looks like.
    const EXPECTED: &'static str;

    fn decode(raw: &Self::Raw) -> Option<Self>;

    fn encode(&self) -> Self::Raw;

    /// Rendering of a raw value for error messages.
    fn describe(raw: &Self::Raw) -> String;
}

impl ValueCodec for String {
    type Raw = String;
    const EXPECTED: &'static str = "string";

    fn decode(raw: &String) -> Option<Self> {
        Some(raw.clone())
    }

    fn encode(&self) -> String {
        self.clone()
    }

    fn describe(raw: &String) -> String {
        format!("'{}'", raw)
    }
}

impl ValueCodec for i32 {
    type Raw = i64;
    const EXPECTED: &'static str = "32-bit integer";

    fn decode(raw: &i64) -> Option<Self> {
        i32::try_from(*raw).ok()
    }

    fn encode(&self) -> i64 {
        i64::from(*self)
    }

    fn describe(raw: &i64) -> String {
        raw.to_string()
    }
}

impl ValueCodec for Rating {
    type Raw = String;
    const EXPECTED: &'static str = "rating (none, low, medium, high, critical)";

    fn decode(raw: &String) -> Option<Self> {
        raw.parse().ok()
    }

    fn encode(&self) -> String {
        self.as_str().to_string()
    }

    fn describe(raw: &String) -> String {
        format!("'{}'", raw)
    }
}

impl ValueCodec for KeyValuePair {
    type Raw = KeyValuePair;
    const EXPECTED: &'static str = "key/value pair with a non-empty key";

    fn decode(raw: &KeyValuePair) -> Option<Self> {
        if raw.key.is_empty() {
            None
        } else {
            Some(raw.clone())
        }
    }

    fn encode(&self) -> KeyValuePair {
        self.clone()
    }

    fn describe(raw: &KeyValuePair) -> String {
        format!("'{}'='{}'", raw.key, raw.value)
    }
}

/// Decode a declarative value list, reporting every element that fails.
pub fn decode_values<T: ValueCodec>(raw: &[T::Raw]) -> Result<Vec<T>, Vec<CodecError>> {
    if raw.is_empty() {
        return Err(vec![CodecError::Empty]);
    }

    let mut values = Vec::with_capacity(raw.len());
    let mut errors = Vec::new();
    for (index, item) in raw.iter().enumerate() {
        match T::decode(item) {
            Some(value) => values.push(value),
            None => errors.push(CodecError::TypeMismatch {
                index,
                value: T::describe(item),
                expected: T::EXPECTED,
            }),
        }
    }

    if errors.is_empty() {
        Ok(values)
    } else {
        Err(errors)
    }
}

pub fn encode_values<T: ValueCodec>(values: &[T]) -> Vec<T::Raw> {
    values.iter().map(T::encode).collect()
}
