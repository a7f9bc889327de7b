//! Non-empty check

use super::Validator;
use crate::Value;

/// Rejects null values, blank strings (after trimming), and empty lists.
#[derive(Debug, Clone)]
pub struct NotEmpty {
    message: String,
}

impl NotEmpty {
    /// Creates the validator with the message shown on failure.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Validator for NotEmpty {
    fn check(&self, value: &Value) -> bool {
        !value.is_empty()
    }

    fn message(&self) -> &str {
        &self.message
    }
}
