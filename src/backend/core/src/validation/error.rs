//! Field validation failures.
//!
//! Each failed lookup produces exactly one [`ValidationFailure`]: checks
//! short-circuit, so there is never more than one reason per field and no
//! aggregation across fields.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Title shared by every constraint violation.
pub const VALIDATION_ERROR_TITLE: &str = "Validation error";

/// Title used when a required field is absent.
pub const MISSING_FIELD_TITLE: &str = "Missing JSON field";

// ═══════════════════════════════════════════════════════════════════════════════
// Failure Kinds
// ═══════════════════════════════════════════════════════════════════════════════

/// The rule a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationFailureKind {
    /// Field is absent and no default was supplied.
    MissingField,
    /// Runtime type differs from the declared type.
    TypeMismatch,
    /// Text is shorter than the minimum.
    BelowMinLength,
    /// Text is longer than the maximum.
    AboveMaxLength,
    /// Number is below the minimum.
    BelowMinValue,
    /// Number is above the maximum.
    AboveMaxValue,
    /// Text form does not match the pattern.
    PatternMismatch,
}

impl ValidationFailureKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::TypeMismatch => "type_mismatch",
            Self::BelowMinLength => "below_min_length",
            Self::AboveMaxLength => "above_max_length",
            Self::BelowMinValue => "below_min_value",
            Self::AboveMaxValue => "above_max_value",
            Self::PatternMismatch => "pattern_mismatch",
        }
    }
}

impl fmt::Display for ValidationFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Validation Failure
// ═══════════════════════════════════════════════════════════════════════════════

/// A categorized rejection reason for one field.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{title}: {description}")]
pub struct ValidationFailure {
    kind: ValidationFailureKind,
    field: String,
    title: &'static str,
    description: String,
}

impl ValidationFailure {
    fn new(kind: ValidationFailureKind, field: &str, description: String) -> Self {
        let title = match kind {
            ValidationFailureKind::MissingField => MISSING_FIELD_TITLE,
            _ => VALIDATION_ERROR_TITLE,
        };
        Self {
            kind,
            field: field.to_string(),
            title,
            description,
        }
    }

    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ValidationFailureKind::MissingField,
            field,
            format!("Field '{}' is required", field),
        )
    }

    pub fn type_mismatch(field: &str, actual: impl fmt::Display, expected: impl fmt::Display) -> Self {
        Self::new(
            ValidationFailureKind::TypeMismatch,
            field,
            format!(
                "Data type for '{}' is '{}' but should be '{}'",
                field, actual, expected
            ),
        )
    }

    pub fn below_min_length(field: &str, min: f64) -> Self {
        Self::new(
            ValidationFailureKind::BelowMinLength,
            field,
            format!("Minimum length for '{}' is '{}'", field, min),
        )
    }

    pub fn above_max_length(field: &str, max: f64) -> Self {
        Self::new(
            ValidationFailureKind::AboveMaxLength,
            field,
            format!("Maximum length for '{}' is '{}'", field, max),
        )
    }

    pub fn below_min_value(field: &str, min: f64) -> Self {
        Self::new(
            ValidationFailureKind::BelowMinValue,
            field,
            format!("Minimum value for '{}' is '{}'", field, min),
        )
    }

    pub fn above_max_value(field: &str, max: f64) -> Self {
        Self::new(
            ValidationFailureKind::AboveMaxValue,
            field,
            format!("Maximum value for '{}' is '{}'", field, max),
        )
    }

    pub fn pattern_mismatch(field: &str, pattern: &str) -> Self {
        Self::new(
            ValidationFailureKind::PatternMismatch,
            field,
            format!("'{}' does not match Regex: {}", field, pattern),
        )
    }

    pub fn kind(&self) -> ValidationFailureKind {
        self.kind
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Result of a single field validation.
pub type ValidationOutcome<T> = std::result::Result<T, ValidationFailure>;
