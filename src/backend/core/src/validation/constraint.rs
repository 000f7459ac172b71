//! Per-field constraint declarations.
//!
//! A [`FieldConstraint`] is attached to one field lookup. Every part is
//! optional and independent of the others; the validator checks whichever
//! parts are set, always in the order type, bounds, pattern.
//!
//! # Example
//!
//! ```rust,ignore
//! use jsonify_core::validation::{DataType, FieldConstraint};
//!
//! let name = FieldConstraint::text().min_value(3).max_value(64);
//! let age = FieldConstraint::integer().min_value(0).max_value(150);
//! let code = FieldConstraint::new().try_pattern(r"^\d+$")?;
//! ```

use crate::validation::value::DataType;
use regex::Regex;
use serde_json::Value;

/// Declarative rules for a single field.
///
/// Bounds are inclusive. They apply to character length for text values and
/// to the value itself for numbers. Values of any other runtime type pass
/// the bounds check untouched.
#[derive(Debug, Clone, Default)]
pub struct FieldConstraint {
    data_type: Option<DataType>,
    min_value: Option<f64>,
    max_value: Option<f64>,
    pattern: Option<Regex>,
    default: Option<Value>,
}

impl FieldConstraint {
    /// A constraint that accepts any value.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text() -> Self {
        Self::new().data_type(DataType::Text)
    }

    pub fn integer() -> Self {
        Self::new().data_type(DataType::Integer)
    }

    pub fn float() -> Self {
        Self::new().data_type(DataType::Float)
    }

    pub fn boolean() -> Self {
        Self::new().data_type(DataType::Boolean)
    }

    /// Require an exact runtime type.
    pub fn data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    /// Minimum length (text) or value (numbers).
    pub fn min_value(mut self, min: impl Into<f64>) -> Self {
        self.min_value = Some(min.into());
        self
    }

    /// Maximum length (text) or value (numbers).
    pub fn max_value(mut self, max: impl Into<f64>) -> Self {
        self.max_value = Some(max.into());
        self
    }

    /// Require the value's text form to match `regex` from its first character.
    pub fn pattern(mut self, regex: Regex) -> Self {
        self.pattern = Some(regex);
        self
    }

    /// Compile and attach a pattern.
    pub fn try_pattern(self, pattern: &str) -> Result<Self, regex::Error> {
        Ok(self.pattern(Regex::new(pattern)?))
    }

    /// Value used in place of whatever the body holds for the field.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn expected_type(&self) -> Option<DataType> {
        self.data_type
    }

    pub fn min(&self) -> Option<f64> {
        self.min_value
    }

    pub fn max(&self) -> Option<f64> {
        self.max_value
    }

    pub fn regex(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// True if no check would be performed.
    pub fn is_unconstrained(&self) -> bool {
        self.data_type.is_none()
            && self.min_value.is_none()
            && self.max_value.is_none()
            && self.pattern.is_none()
    }
}
