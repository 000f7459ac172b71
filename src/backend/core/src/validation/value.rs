//! Runtime type tags for JSON values.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Closed set of runtime types a decoded JSON value can have.
///
/// Numbers that fit a 64-bit integer are [`DataType::Integer`]; every other
/// number (anything written with a fraction or exponent) is
/// [`DataType::Float`]. There is a single text type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Text,
    Integer,
    Float,
    Boolean,
    Null,
    Mapping,
    Sequence,
}

impl DataType {
    /// The tag of a concrete value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => Self::Text,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Float,
            Value::Bool(_) => Self::Boolean,
            Value::Null => Self::Null,
            Value::Object(_) => Self::Mapping,
            Value::Array(_) => Self::Sequence,
        }
    }

    /// Name used in client-facing messages.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Mapping => "object",
            Self::Sequence => "array",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Text form of a value, used for pattern matching.
///
/// Strings are used verbatim; anything else is rendered as compact JSON.
pub(crate) fn text_form(value: &Value) -> std::borrow::Cow<'_, str> {
    match value {
        Value::String(s) => std::borrow::Cow::Borrowed(s.as_str()),
        other => std::borrow::Cow::Owned(other.to_string()),
    }
}
