//! Per-request JSON context and response payload.
//!
//! [`JsonBody`] is what handlers see of the decoded request: it is inserted
//! into the request extensions by [`JsonifyLayer`](super::JsonifyLayer) and
//! extracted like any other axum extractor. [`JsonPayload`] travels the
//! other way; a handler attaches it to its response and the layer turns it
//! into the response body.
//!
//! # Example
//!
//! ```rust,ignore
//! use jsonify_core::middleware::{JsonBody, JsonPayload, Rejection};
//! use jsonify_core::validation::FieldConstraint;
//!
//! async fn create_user(body: JsonBody) -> Result<JsonPayload, Rejection> {
//!     let name = body.get_json("name", &FieldConstraint::text().min_value(3))?;
//!     let age: u8 = body.get_as("age", &FieldConstraint::integer().max_value(150))?;
//!     Ok(JsonPayload::new(serde_json::json!({"name": name, "age": age})))
//! }
//! ```

use crate::body::DecodedBody;
use crate::error::JsonifyError;
use crate::middleware::rejection::Rejection;
use crate::validation::{DataType, FieldConstraint, FieldValidator, ValidationFailure};
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, IntoResponseParts, Response, ResponseParts},
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::convert::Infallible;
use std::sync::Arc;

// ═══════════════════════════════════════════════════════════════════════════════
// Request Context
// ═══════════════════════════════════════════════════════════════════════════════

/// Decoded request body plus the verbosity flag for its rejections.
#[derive(Debug, Clone)]
pub struct JsonBody {
    body: Arc<DecodedBody>,
    help_messages: bool,
}

impl JsonBody {
    pub fn new(body: DecodedBody, help_messages: bool) -> Self {
        Self {
            body: Arc::new(body),
            help_messages,
        }
    }

    pub fn body(&self) -> &DecodedBody {
        &self.body
    }

    pub fn help_messages(&self) -> bool {
        self.help_messages
    }

    pub fn validator(&self) -> FieldValidator<'_> {
        FieldValidator::new(&self.body)
    }

    /// Resolve and validate `field`.
    ///
    /// The default, if any, comes from `constraint`.
    pub fn get_json(&self, field: &str, constraint: &FieldConstraint) -> Result<Value, Rejection> {
        self.validator()
            .validate(field, constraint)
            .map_err(|failure| self.reject(failure))
    }

    /// Validate `default` in place of the body's value for `field`.
    pub fn get_json_or(
        &self,
        field: &str,
        default: impl Into<Value>,
        constraint: &FieldConstraint,
    ) -> Result<Value, Rejection> {
        let default = default.into();
        self.validator()
            .resolve_and_validate(field, Some(&default), constraint)
            .map_err(|failure| self.reject(failure))
    }

    /// Validate `field` and convert it into `T`.
    ///
    /// A value that passes the constraint but does not fit `T` is reported
    /// as a type mismatch.
    pub fn get_as<T: DeserializeOwned>(
        &self,
        field: &str,
        constraint: &FieldConstraint,
    ) -> Result<T, Rejection> {
        let value = self.get_json(field, constraint)?;
        let actual = DataType::of(&value);
        serde_json::from_value(value).map_err(|_| {
            self.reject(ValidationFailure::type_mismatch(
                field,
                actual,
                short_type_name::<T>(),
            ))
        })
    }

    /// Build a rejection honouring this request's verbosity.
    pub fn reject(&self, error: impl Into<JsonifyError>) -> Rejection {
        Rejection::new(error, self.help_messages)
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    if full.contains('<') {
        return full;
    }
    full.rsplit("::").next().unwrap_or(full)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<JsonBody>()
            .cloned()
            .ok_or_else(|| Rejection::bare(JsonifyError::MissingLayer))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Response Payload
// ═══════════════════════════════════════════════════════════════════════════════

/// A value to be serialized as the response body.
///
/// Only takes effect behind [`JsonifyLayer`](super::JsonifyLayer).
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPayload(Value);

impl JsonPayload {
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, JsonifyError> {
        Ok(Self(serde_json::to_value(value)?))
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl IntoResponseParts for JsonPayload {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        res.extensions_mut().insert(self);
        Ok(res)
    }
}

impl IntoResponse for JsonPayload {
    fn into_response(self) -> Response {
        let mut response = StatusCode::OK.into_response();
        response.extensions_mut().insert(self);
        response
    }
}
