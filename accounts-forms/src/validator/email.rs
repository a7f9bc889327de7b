//! Email grammar check

use super::Validator;
use crate::Value;

/// Requires a well-formed email address.
#[derive(Debug, Clone)]
pub struct Email {
    message: String,
}

impl Email {
    /// Creates the validator with the message shown on failure.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Validator for Email {
    fn check(&self, value: &Value) -> bool {
        match value.as_str() {
            Some(s) => email_address::EmailAddress::is_valid(s),
            None => false,
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}
