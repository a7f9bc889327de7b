//! Numeric range check

use log::warn;

use super::Validator;
use crate::Value;

/// Requires an integer value of at least `min`, and at most `max` when an
/// upper bound is configured.
///
/// Bounds are kept as raw configuration values. A `min` that is not a
/// well-formed integer makes the validator fail closed; a malformed `max`
/// degrades to "no upper bound".
#[derive(Debug, Clone)]
pub struct Range {
    message: String,
    min: Value,
    max: Value,
}

impl Range {
    /// Lower bound only.
    pub fn at_least(message: impl Into<String>, min: impl Into<Value>) -> Self {
        Self {
            message: message.into(),
            min: min.into(),
            max: Value::Null,
        }
    }

    /// Inclusive lower and upper bounds.
    pub fn between(
        message: impl Into<String>,
        min: impl Into<Value>,
        max: impl Into<Value>,
    ) -> Self {
        Self {
            message: message.into(),
            min: min.into(),
            max: max.into(),
        }
    }
}

impl Validator for Range {
    fn check(&self, value: &Value) -> bool {
        let Some(min) = self.min.as_int() else {
            warn!(
                "range validator has a non-integer minimum ({}), failing closed",
                self.min.type_name()
            );
            return false;
        };

        let Some(candidate) = value.as_int() else {
            return false;
        };

        match self.max.as_int() {
            Some(max) => candidate >= min && candidate <= max,
            None => candidate >= min,
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        let v = Range::between("out of range", 1, 10);
        assert!(v.check(&Value::from(1i64)));
        assert!(v.check(&Value::from(10i64)));
        assert!(!v.check(&Value::from(0i64)));
        assert!(!v.check(&Value::from(11i64)));
    }

    #[test]
    fn test_coerces_submitted_strings() {
        let v = Range::between("out of range", 1, 10);
        assert!(v.check(&Value::from("10")));
        assert!(!v.check(&Value::from("11")));
        assert!(!v.check(&Value::from("ten")));
    }

    #[test]
    fn test_min_only() {
        let v = Range::at_least("too small", 18);
        assert!(v.check(&Value::from(18i64)));
        assert!(v.check(&Value::from(200i64)));
        assert!(!v.check(&Value::from(17i64)));
    }

    #[test]
    fn test_malformed_min_fails_closed() {
        let v = Range::at_least("too small", "not a number");
        assert!(!v.check(&Value::from(5i64)));
    }

    #[test]
    fn test_malformed_max_means_unbounded() {
        let v = Range::between("out of range", 1, "huge");
        assert!(v.check(&Value::from(1_000_000i64)));
        assert!(!v.check(&Value::from(0i64)));
    }
}
