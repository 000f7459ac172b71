//! Per-field validation of decoded request bodies.
//!
//! This module provides:
//!
//! - **Type tags**: [`DataType`], the closed set of runtime JSON types
//! - **Constraints**: [`FieldConstraint`], a builder for type, bounds,
//!   pattern and default of one field
//! - **Validator**: [`FieldValidator`], which resolves a field from a
//!   [`DecodedBody`](crate::body::DecodedBody) and checks it
//! - **Failures**: [`ValidationFailure`], one categorized reason per failed
//!   lookup
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use jsonify_core::body::BodyDecoder;
//! use jsonify_core::validation::{FieldConstraint, FieldValidator};
//!
//! let body = BodyDecoder::decode(br#"{"name": "Alice", "age": 30}"#)?;
//! let validator = FieldValidator::new(&body);
//!
//! let name = validator.validate("name", &FieldConstraint::text().min_value(3))?;
//! let age = validator.validate("age", &FieldConstraint::integer().max_value(150))?;
//! let page = validator.validate("page", &FieldConstraint::integer().with_default(1))?;
//! ```
//!
//! Lookups are independent: each one stops at its first failure, and
//! nothing is shared between fields.

pub mod constraint;
pub mod error;
pub mod validator;
pub mod value;

// ═══════════════════════════════════════════════════════════════════════════════
// Re-exports
// ═══════════════════════════════════════════════════════════════════════════════

pub use constraint::FieldConstraint;
pub use error::{
    ValidationFailure, ValidationFailureKind, ValidationOutcome, MISSING_FIELD_TITLE,
    VALIDATION_ERROR_TITLE,
};
pub use validator::{resolve_and_validate, FieldValidator};
pub use value::DataType;

/// Common imports for validation.
pub mod prelude {
    pub use super::{
        resolve_and_validate, DataType, FieldConstraint, FieldValidator, ValidationFailure,
        ValidationFailureKind, ValidationOutcome,
    };
}
