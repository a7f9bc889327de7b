//! Field validators.
//!
//! A validator is a single-purpose predicate plus the error message shown on
//! failure. Validators are stateless with respect to the candidate value:
//! constructed once when a form field is declared and reused for every
//! validation pass on that field.
//!
//! Malformed validator *configuration* (a non-integer range bound, a regex
//! that does not compile) never panics; the validator degrades to
//! always-invalid so a misconfigured field fails safely instead of silently
//! passing.

mod choice;
mod date_time;
mod email;
mod not_empty;
mod pattern;
mod range;

pub use choice::Choice;
pub use date_time::DateTimeParsable;
pub use email::Email;
pub use not_empty::NotEmpty;
pub use pattern::Pattern;
pub use range::Range;

use std::fmt;

use crate::Value;
use crate::error::ValidationError;

/// A reusable predicate attached to a field.
pub trait Validator: fmt::Debug {
    /// Checks the candidate value.
    fn check(&self, value: &Value) -> bool;

    /// The message shown when the check fails.
    fn message(&self) -> &str;

    /// Runs the check, failing with the configured message. This is the only
    /// error path a validator has; there is no partial success.
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        if self.check(value) {
            Ok(())
        } else {
            Err(ValidationError::new(self.message()))
        }
    }
}
