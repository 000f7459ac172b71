#![allow(clippy::result_large_err)]
//! # Jsonify Core
//!
//! JSON request-body decoding and per-field validation for axum services.
//!
//! ## Architecture
//!
//! - **Body**: decodes the raw payload once per request into a read-only
//!   [`DecodedBody`](body::DecodedBody)
//! - **Validation**: resolves named fields and checks type, bounds and
//!   pattern constraints, failing fast on the first violation
//! - **Middleware**: a tower layer that wires both into the request cycle,
//!   turns failures into 400 responses and encodes response payloads
//! - **Telemetry**: structured logging initialisation
//! - **Config**: layered environment/file configuration

pub mod api;
pub mod body;
pub mod config;
pub mod error;
pub mod middleware;
pub mod telemetry;
pub mod validation;

pub use error::{ErrorCode, JsonifyError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::body::{BodyDecoder, DecodeError, DecodeErrorKind, DecodedBody};
    pub use crate::error::{ErrorCode, JsonifyError, Result};
    pub use crate::middleware::{
        JsonBody, JsonPayload, JsonifyConfig, JsonifyLayer, Rejection, RejectionBody,
    };
    pub use crate::validation::{
        resolve_and_validate, DataType, FieldConstraint, FieldValidator, ValidationFailure,
        ValidationFailureKind, ValidationOutcome,
    };
}
