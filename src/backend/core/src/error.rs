//! Error handling for the JSON body layer.
//!
//! This module provides:
//! - [`JsonifyError`], the crate-wide error enum
//! - [`ErrorCode`], stable machine-readable codes with HTTP status mapping
//! - Client-safe titles and descriptions for every error
//! - Logging and metrics hooks used when an error becomes a response
//!
//! Client errors (4xx) carry a description that is safe to show when
//! verbose mode is on. Server errors (5xx) never expose their internals.

use crate::body::DecodeError;
use crate::validation::{ValidationFailure, ValidationFailureKind};
use axum::http::StatusCode;
use metrics::counter;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{error, warn};

// ═══════════════════════════════════════════════════════════════════════════════
// Result Type Alias
// ═══════════════════════════════════════════════════════════════════════════════

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, JsonifyError>;

// ═══════════════════════════════════════════════════════════════════════════════
// Error Codes
// ═══════════════════════════════════════════════════════════════════════════════

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Body Errors (1000-1099)
    InvalidEncoding,
    MalformedJson,
    PayloadTooLarge,
    BodyReadFailed,

    // Validation Errors (1100-1199)
    MissingField,
    TypeMismatch,
    BelowMinLength,
    AboveMaxLength,
    BelowMinValue,
    AboveMaxValue,
    PatternMismatch,

    // Internal Errors (9000-9099)
    InvalidPattern,
    SerializationError,
    MissingLayer,
}

impl ErrorCode {
    /// Get the numeric code for this error.
    pub const fn numeric_code(&self) -> u32 {
        match self {
            Self::InvalidEncoding => 1000,
            Self::MalformedJson => 1001,
            Self::PayloadTooLarge => 1002,
            Self::BodyReadFailed => 1003,

            Self::MissingField => 1100,
            Self::TypeMismatch => 1101,
            Self::BelowMinLength => 1102,
            Self::AboveMaxLength => 1103,
            Self::BelowMinValue => 1104,
            Self::AboveMaxValue => 1105,
            Self::PatternMismatch => 1106,

            Self::InvalidPattern => 9000,
            Self::SerializationError => 9001,
            Self::MissingLayer => 9002,
        }
    }

    /// Get the HTTP status code for this error.
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,

            Self::InvalidEncoding
            | Self::MalformedJson
            | Self::BodyReadFailed
            | Self::MissingField
            | Self::TypeMismatch
            | Self::BelowMinLength
            | Self::AboveMaxLength
            | Self::BelowMinValue
            | Self::AboveMaxValue
            | Self::PatternMismatch => StatusCode::BAD_REQUEST,

            Self::InvalidPattern | Self::SerializationError | Self::MissingLayer => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error category for grouping.
    pub const fn category(&self) -> &'static str {
        match self.numeric_code() {
            1000..=1099 => "body",
            1100..=1199 => "validation",
            9000..=9099 => "internal",
            _ => "unknown",
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.http_status().is_client_error()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl From<ValidationFailureKind> for ErrorCode {
    fn from(kind: ValidationFailureKind) -> Self {
        match kind {
            ValidationFailureKind::MissingField => Self::MissingField,
            ValidationFailureKind::TypeMismatch => Self::TypeMismatch,
            ValidationFailureKind::BelowMinLength => Self::BelowMinLength,
            ValidationFailureKind::AboveMaxLength => Self::AboveMaxLength,
            ValidationFailureKind::BelowMinValue => Self::BelowMinValue,
            ValidationFailureKind::AboveMaxValue => Self::AboveMaxValue,
            ValidationFailureKind::PatternMismatch => Self::PatternMismatch,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Main Error Type
// ═══════════════════════════════════════════════════════════════════════════════

/// The main error type for the JSON body layer.
#[derive(Debug, Error)]
pub enum JsonifyError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("failed to read request body: {0}")]
    BodyRead(String),

    #[error("invalid field pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("failed to serialize response payload: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("JsonBody extracted without JsonifyLayer installed")]
    MissingLayer,
}

impl JsonifyError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Decode(e) => match e.kind() {
                crate::body::DecodeErrorKind::InvalidEncoding => ErrorCode::InvalidEncoding,
                crate::body::DecodeErrorKind::MalformedJson => ErrorCode::MalformedJson,
            },
            Self::Validation(f) => f.kind().into(),
            Self::PayloadTooLarge { .. } => ErrorCode::PayloadTooLarge,
            Self::BodyRead(_) => ErrorCode::BodyReadFailed,
            Self::InvalidPattern(_) => ErrorCode::InvalidPattern,
            Self::Serialization(_) => ErrorCode::SerializationError,
            Self::MissingLayer => ErrorCode::MissingLayer,
        }
    }

    pub fn http_status(&self) -> StatusCode {
        self.code().http_status()
    }

    /// Short, client-safe title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Decode(e) => e.title(),
            Self::Validation(f) => f.title(),
            Self::PayloadTooLarge { .. } => "Payload too large",
            Self::BodyRead(_) => "Unreadable body",
            Self::InvalidPattern(_) | Self::Serialization(_) | Self::MissingLayer => {
                "Internal error"
            }
        }
    }

    /// Client-safe description.
    pub fn description(&self) -> String {
        match self {
            Self::Decode(e) => e.description(),
            Self::Validation(f) => f.description().to_string(),
            Self::PayloadTooLarge { limit } => {
                format!("Request body must not exceed {} bytes", limit)
            }
            Self::BodyRead(_) => "Could not read the request body".to_string(),
            Self::InvalidPattern(_) | Self::Serialization(_) | Self::MissingLayer => {
                "An internal error occurred".to_string()
            }
        }
    }

    /// The field a validation failure refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation(f) => Some(f.field()),
            _ => None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Logging
    // ─────────────────────────────────────────────────────────────────────────

    /// Log this error at a level matching who caused it.
    pub fn log(&self) {
        let code = self.code();
        let status = code.http_status().as_u16();

        if code.is_client_error() {
            warn!(
                error_code = %code,
                category = code.category(),
                http_status = status,
                field = self.field().unwrap_or(""),
                description = %self.description(),
                "Request rejected"
            );
        } else {
            error!(
                error_code = %code,
                category = code.category(),
                http_status = status,
                error = %self,
                "Request failed"
            );
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Metrics
    // ─────────────────────────────────────────────────────────────────────────

    /// Record a rejection metric.
    pub fn record_metrics(&self) {
        let code = self.code();
        counter!(
            "jsonify_rejections_total",
            "code" => code.to_string(),
            "category" => code.category().to_string(),
        )
        .increment(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
