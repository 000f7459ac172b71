//! Field resolution and constraint checking.
//!
//! [`FieldValidator`] borrows a decoded body and answers one field lookup
//! at a time. A lookup resolves the value (a supplied default, otherwise
//! the body), then runs
//! the constraint checks in a fixed order and stops at the first failure:
//!
//! 1. type: exact tag equality against the declared [`DataType`]
//! 2. bounds: character length for text, the value itself for numbers
//! 3. pattern: the value's text form must match from its first character
//!
//! Bounds are only defined for text and numbers. Booleans, nulls, objects
//! and arrays pass the bounds check without being inspected, even when a
//! bound is declared; pair bounds with a `data_type` to rule them out.
//!
//! The validated value is returned as-is. Nothing is coerced, and the body
//! is never modified, so repeating a lookup always gives the same answer.

use crate::body::DecodedBody;
use crate::validation::constraint::FieldConstraint;
use crate::validation::error::{ValidationFailure, ValidationOutcome};
use crate::validation::value::{text_form, DataType};
use regex::Regex;
use serde_json::Value;

// ═══════════════════════════════════════════════════════════════════════════════
// Field Validator
// ═══════════════════════════════════════════════════════════════════════════════

/// Resolves and validates named fields of one decoded body.
#[derive(Debug, Clone, Copy)]
pub struct FieldValidator<'a> {
    body: &'a DecodedBody,
}

impl<'a> FieldValidator<'a> {
    pub fn new(body: &'a DecodedBody) -> Self {
        Self { body }
    }

    pub fn body(&self) -> &'a DecodedBody {
        self.body
    }

    /// Find the value for `field`.
    ///
    /// A supplied `default` is the value, whether or not the body has the
    /// field. Without one, the body must contain it.
    pub fn resolve(&self, field: &str, default: Option<&Value>) -> ValidationOutcome<Value> {
        match (default, self.body.get(field)) {
            (Some(default), _) => Ok(default.clone()),
            (None, Some(value)) => Ok(value.clone()),
            (None, None) => Err(ValidationFailure::missing_field(field)),
        }
    }

    /// Run every check declared by `constraint` against `value`.
    pub fn check(
        &self,
        field: &str,
        value: &Value,
        constraint: &FieldConstraint,
    ) -> ValidationOutcome<()> {
        if constraint.is_unconstrained() {
            return Ok(());
        }
        check_type(field, value, constraint)?;
        check_bounds(field, value, constraint)?;
        check_pattern(field, value, constraint)
    }

    /// Resolve `field` and validate it against `constraint`.
    pub fn resolve_and_validate(
        &self,
        field: &str,
        default: Option<&Value>,
        constraint: &FieldConstraint,
    ) -> ValidationOutcome<Value> {
        let value = self.resolve(field, default)?;
        self.check(field, &value, constraint)?;
        Ok(value)
    }

    /// Like [`resolve_and_validate`](Self::resolve_and_validate), taking the
    /// default from the constraint itself.
    pub fn validate(&self, field: &str, constraint: &FieldConstraint) -> ValidationOutcome<Value> {
        self.resolve_and_validate(field, constraint.default_value(), constraint)
    }
}

/// Resolve and validate a single field of `body`.
pub fn resolve_and_validate(
    body: &DecodedBody,
    field: &str,
    default: Option<&Value>,
    constraint: &FieldConstraint,
) -> ValidationOutcome<Value> {
    FieldValidator::new(body).resolve_and_validate(field, default, constraint)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Checks
// ═══════════════════════════════════════════════════════════════════════════════

fn check_type(field: &str, value: &Value, constraint: &FieldConstraint) -> ValidationOutcome<()> {
    let Some(expected) = constraint.expected_type() else {
        return Ok(());
    };

    let actual = DataType::of(value);
    if actual != expected {
        return Err(ValidationFailure::type_mismatch(field, actual, expected));
    }
    Ok(())
}

fn check_bounds(field: &str, value: &Value, constraint: &FieldConstraint) -> ValidationOutcome<()> {
    let (min, max) = (constraint.min(), constraint.max());
    if min.is_none() && max.is_none() {
        return Ok(());
    }

    match value {
        Value::String(text) => {
            let len = text.chars().count() as f64;
            if let Some(min) = min.filter(|min| len < *min) {
                return Err(ValidationFailure::below_min_length(field, min));
            }
            if let Some(max) = max.filter(|max| len > *max) {
                return Err(ValidationFailure::above_max_length(field, max));
            }
        }
        Value::Number(number) => {
            let Some(n) = number.as_f64() else {
                return Ok(());
            };
            if let Some(min) = min.filter(|min| n < *min) {
                return Err(ValidationFailure::below_min_value(field, min));
            }
            if let Some(max) = max.filter(|max| n > *max) {
                return Err(ValidationFailure::above_max_value(field, max));
            }
        }
        // bounds are not defined for these
        Value::Bool(_) | Value::Null | Value::Object(_) | Value::Array(_) => {}
    }
    Ok(())
}

fn check_pattern(field: &str, value: &Value, constraint: &FieldConstraint) -> ValidationOutcome<()> {
    let Some(regex) = constraint.regex() else {
        return Ok(());
    };

    if !matches_from_start(regex, &text_form(value)) {
        return Err(ValidationFailure::pattern_mismatch(field, regex.as_str()));
    }
    Ok(())
}

/// True if some match of `regex` begins at the first character of `text`.
///
/// The leftmost match is the earliest-starting one, so checking its start
/// is enough.
fn matches_from_start(regex: &Regex, text: &str) -> bool {
    regex.find(text).is_some_and(|m| m.start() == 0)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyDecoder;
    use crate::validation::error::ValidationFailureKind;
    use serde_json::json;

    fn body(json: Value) -> DecodedBody {
        DecodedBody::try_from(json).unwrap()
    }

    fn kind_of(outcome: ValidationOutcome<Value>) -> ValidationFailureKind {
        outcome.unwrap_err().kind()
    }

    #[test]
    fn test_resolve_present_field() {
        let b = body(json!({"name": "Alice"}));
        let v = FieldValidator::new(&b);
        assert_eq!(v.resolve("name", None).unwrap(), json!("Alice"));
    }

    #[test]
    fn test_missing_field() {
        let b = DecodedBody::empty();
        let outcome = resolve_and_validate(&b, "id", None, &FieldConstraint::new());
        let failure = outcome.unwrap_err();
        assert_eq!(failure.kind(), ValidationFailureKind::MissingField);
        assert!(failure.description().contains("'id'"));
    }

    #[test]
    fn test_default_used_when_absent() {
        let b = DecodedBody::empty();
        let outcome = resolve_and_validate(&b, "limit", Some(&json!(20)), &FieldConstraint::new());
        assert_eq!(outcome.unwrap(), json!(20));
    }

    #[test]
    fn test_falsy_default_used_when_absent() {
        let b = DecodedBody::empty();
        let v = FieldValidator::new(&b);
        assert_eq!(v.resolve("n", Some(&json!(0))).unwrap(), json!(0));
        assert_eq!(v.resolve("s", Some(&json!(""))).unwrap(), json!(""));
        assert_eq!(v.resolve("b", Some(&json!(false))).unwrap(), json!(false));
    }

    #[test]
    fn test_default_wins_over_body_value() {
        let b = body(json!({"limit": 5}));
        let outcome = resolve_and_validate(&b, "limit", Some(&json!(20)), &FieldConstraint::new());
        assert_eq!(outcome.unwrap(), json!(20));

        // falsy defaults replace the body value too
        let v = FieldValidator::new(&b);
        assert_eq!(v.resolve("limit", Some(&json!(0))).unwrap(), json!(0));
    }

    #[test]
    fn test_unconstrained_accepts_any_value() {
        let b = body(json!({"x": [1, {"y": null}]}));
        let v = FieldValidator::new(&b);
        let c = FieldConstraint::new().with_default(json!(null));
        for value in [json!(null), json!([1, 2]), json!({"k": "v"}), json!(""), json!(-1.5)] {
            assert!(v.check("x", &value, &c).is_ok());
        }
    }

    #[test]
    fn test_invalid_body_value_ignored_with_default() {
        let b = body(json!({"limit": "lots"}));
        let c = FieldConstraint::integer().with_default(20);
        assert_eq!(FieldValidator::new(&b).validate("limit", &c).unwrap(), json!(20));
    }

    #[test]
    fn test_constraints_apply_to_default() {
        let b = DecodedBody::empty();
        let c = FieldConstraint::integer().max_value(10).with_default(50);
        assert_eq!(
            kind_of(FieldValidator::new(&b).validate("limit", &c)),
            ValidationFailureKind::AboveMaxValue
        );
    }

    #[test]
    fn test_type_match() {
        let b = body(json!({"s": "x", "i": 1, "f": 1.5, "b": true}));
        let v = FieldValidator::new(&b);
        assert!(v.validate("s", &FieldConstraint::text()).is_ok());
        assert!(v.validate("i", &FieldConstraint::integer()).is_ok());
        assert!(v.validate("f", &FieldConstraint::float()).is_ok());
        assert!(v.validate("b", &FieldConstraint::boolean()).is_ok());
    }

    #[test]
    fn test_type_mismatch() {
        let b = body(json!({"age": "30", "flag": true, "n": 3, "x": null}));
        let v = FieldValidator::new(&b);

        let failure = v.validate("age", &FieldConstraint::integer()).unwrap_err();
        assert_eq!(failure.kind(), ValidationFailureKind::TypeMismatch);
        assert!(failure.description().contains("'string'"));
        assert!(failure.description().contains("'integer'"));

        // booleans are not integers
        assert_eq!(kind_of(v.validate("flag", &FieldConstraint::integer())), ValidationFailureKind::TypeMismatch);
        // integers are not floats
        assert_eq!(kind_of(v.validate("n", &FieldConstraint::float())), ValidationFailureKind::TypeMismatch);
        assert_eq!(kind_of(v.validate("x", &FieldConstraint::text())), ValidationFailureKind::TypeMismatch);
    }

    #[test]
    fn test_text_length_bounds() {
        let b = body(json!({"short": "ab", "ok": "abc", "long": "abcdefghijk"}));
        let v = FieldValidator::new(&b);
        let c = FieldConstraint::new().min_value(3).max_value(10);

        assert_eq!(kind_of(v.validate("short", &c)), ValidationFailureKind::BelowMinLength);
        assert_eq!(v.validate("ok", &c).unwrap(), json!("abc"));
        assert_eq!(kind_of(v.validate("long", &c)), ValidationFailureKind::AboveMaxLength);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let b = body(json!({"name": "Zoë"}));
        let c = FieldConstraint::text().max_value(3);
        assert!(FieldValidator::new(&b).validate("name", &c).is_ok());
    }

    #[test]
    fn test_numeric_bounds_inclusive() {
        let b = body(json!({"low": -1, "zero": 0, "ten": 10, "high": 15, "frac": 10.5}));
        let v = FieldValidator::new(&b);
        let c = FieldConstraint::new().min_value(0).max_value(10);

        assert_eq!(kind_of(v.validate("low", &c)), ValidationFailureKind::BelowMinValue);
        assert!(v.validate("zero", &c).is_ok());
        assert!(v.validate("ten", &c).is_ok());
        assert_eq!(kind_of(v.validate("high", &c)), ValidationFailureKind::AboveMaxValue);
        assert_eq!(kind_of(v.validate("frac", &c)), ValidationFailureKind::AboveMaxValue);
    }

    #[test]
    fn test_bounds_skip_other_types() {
        let b = body(json!({"b": true, "n": null, "o": {"a": 1}, "a": [1, 2, 3, 4]}));
        let v = FieldValidator::new(&b);
        let c = FieldConstraint::new().min_value(5).max_value(1);
        for field in ["b", "n", "o", "a"] {
            assert!(v.validate(field, &c).is_ok(), "bounds applied to {}", field);
        }
    }

    #[test]
    fn test_pattern() {
        let b = body(json!({"digits": "123", "letters": "abc", "mixed": "12ab"}));
        let v = FieldValidator::new(&b);
        let c = FieldConstraint::new().try_pattern(r"^\d+$").unwrap();

        assert!(v.validate("digits", &c).is_ok());
        let failure = v.validate("letters", &c).unwrap_err();
        assert_eq!(failure.kind(), ValidationFailureKind::PatternMismatch);
        assert_eq!(failure.description(), r"'letters' does not match Regex: ^\d+$");
        assert_eq!(kind_of(v.validate("mixed", &c)), ValidationFailureKind::PatternMismatch);
    }

    #[test]
    fn test_pattern_is_anchored_at_start_only() {
        let b = body(json!({"code": "12ab", "late": "ab12"}));
        let v = FieldValidator::new(&b);
        let c = FieldConstraint::new().try_pattern(r"\d+").unwrap();

        assert!(v.validate("code", &c).is_ok());
        assert_eq!(kind_of(v.validate("late", &c)), ValidationFailureKind::PatternMismatch);
    }

    #[test]
    fn test_pattern_matches_raw_text() {
        let b = body(json!({"host": "a.b"}));
        let c = FieldConstraint::new().try_pattern(r"^a\.b$").unwrap();
        assert!(FieldValidator::new(&b).validate("host", &c).is_ok());
    }

    #[test]
    fn test_pattern_on_number_uses_json_text() {
        let b = body(json!({"n": 42}));
        let c = FieldConstraint::new().try_pattern(r"^\d{2}$").unwrap();
        assert!(FieldValidator::new(&b).validate("n", &c).is_ok());
    }

    #[test]
    fn test_check_order_type_before_bounds() {
        let b = body(json!({"name": "ab"}));
        let c = FieldConstraint::integer().min_value(3);
        assert_eq!(
            kind_of(FieldValidator::new(&b).validate("name", &c)),
            ValidationFailureKind::TypeMismatch
        );
    }

    #[test]
    fn test_check_order_bounds_before_pattern() {
        let b = body(json!({"code": "ab"}));
        let c = FieldConstraint::new().min_value(3).try_pattern(r"^\d+$").unwrap();
        assert_eq!(
            kind_of(FieldValidator::new(&b).validate("code", &c)),
            ValidationFailureKind::BelowMinLength
        );
    }

    #[test]
    fn test_zero_min_bound_is_honoured() {
        let b = body(json!({"delta": -3}));
        let c = FieldConstraint::new().min_value(0);
        assert_eq!(
            kind_of(FieldValidator::new(&b).validate("delta", &c)),
            ValidationFailureKind::BelowMinValue
        );
    }

    #[test]
    fn test_value_returned_unchanged() {
        let b = body(json!({"tags": ["a", "b"], "n": 3}));
        let v = FieldValidator::new(&b);
        assert_eq!(v.validate("tags", &FieldConstraint::new()).unwrap(), json!(["a", "b"]));
        assert_eq!(v.validate("n", &FieldConstraint::new().max_value(5)).unwrap(), json!(3));
    }

    #[test]
    fn test_repeated_lookup_is_idempotent() {
        let b = BodyDecoder::decode(br#"{"name": "Al"}"#).unwrap();
        let snapshot = b.clone();
        let c = FieldConstraint::text().min_value(3);

        let first = resolve_and_validate(&b, "name", None, &c);
        let second = resolve_and_validate(&b, "name", None, &c);
        assert_eq!(first, second);
        assert_eq!(b, snapshot);
    }
}
