//! UTF-8 JSON body decoder.
//!
//! Decoding is a two-step process: the bytes must be valid UTF-8, and the
//! resulting text must be a JSON document whose top level is an object. An
//! empty payload is not an error and yields an empty body.

use crate::validation::DataType;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;
use tracing::debug;

// ═══════════════════════════════════════════════════════════════════════════════
// Decode Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Client-facing category of a decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DecodeErrorKind {
    /// The payload is not valid UTF-8.
    InvalidEncoding,
    /// The payload is not a JSON object.
    #[serde(rename = "MalformedJSON")]
    MalformedJson,
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEncoding => write!(f, "InvalidEncoding"),
            Self::MalformedJson => write!(f, "MalformedJSON"),
        }
    }
}

/// Failure to turn a request payload into a [`DecodedBody`].
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("request body is not valid UTF-8: {0}")]
    InvalidEncoding(#[source] std::str::Utf8Error),

    #[error("request body is not valid JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("request body must be a JSON object, found {found}")]
    NotAnObject { found: DataType },
}

impl DecodeError {
    /// The category reported to clients.
    pub fn kind(&self) -> DecodeErrorKind {
        match self {
            Self::InvalidEncoding(_) => DecodeErrorKind::InvalidEncoding,
            Self::MalformedJson(_) | Self::NotAnObject { .. } => DecodeErrorKind::MalformedJson,
        }
    }

    /// Short title for the rejection response.
    pub fn title(&self) -> &'static str {
        match self.kind() {
            DecodeErrorKind::InvalidEncoding => "Invalid encoding",
            DecodeErrorKind::MalformedJson => "Malformed JSON",
        }
    }

    /// Human-readable description for the rejection response.
    ///
    /// Parser positions stay out of it; they are logged instead.
    pub fn description(&self) -> String {
        match self {
            Self::InvalidEncoding(_) => "Could not decode as UTF-8".to_string(),
            Self::MalformedJson(_) => "Syntax error".to_string(),
            Self::NotAnObject { found } => {
                format!("Expected a JSON object but found '{}'", found)
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Decoded Body
// ═══════════════════════════════════════════════════════════════════════════════

/// The parsed request payload.
///
/// Created once per request and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedBody {
    fields: Map<String, Value>,
}

impl DecodedBody {
    /// An empty body, as produced for requests without a payload.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Names of all top-level fields. The order is unspecified.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl From<Map<String, Value>> for DecodedBody {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl TryFrom<Value> for DecodedBody {
    type Error = DecodeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(DecodeError::NotAnObject {
                found: DataType::of(&other),
            }),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Decoder
// ═══════════════════════════════════════════════════════════════════════════════

/// Stateless decoder for JSON request payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyDecoder;

impl BodyDecoder {
    /// Decode a raw payload.
    pub fn decode(raw: &[u8]) -> Result<DecodedBody, DecodeError> {
        if raw.is_empty() {
            return Ok(DecodedBody::empty());
        }

        let text = std::str::from_utf8(raw).map_err(|e| {
            debug!(valid_up_to = e.valid_up_to(), "Request body is not valid UTF-8");
            DecodeError::InvalidEncoding(e)
        })?;

        let value: Value = serde_json::from_str(text).map_err(|e| {
            debug!(line = e.line(), column = e.column(), error = %e, "Request body is not valid JSON");
            DecodeError::MalformedJson(e)
        })?;

        let body = DecodedBody::try_from(value)?;
        debug!(fields = body.len(), "Decoded request body");
        Ok(body)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
