//! Choice membership check

use super::Validator;
use crate::Value;

/// Requires the value to be a strict member of a configured choice set.
///
/// Membership uses `Value` equality, so both the type and the value must
/// match: a submitted `"1"` does not satisfy a choice set holding `1`.
#[derive(Debug, Clone)]
pub struct Choice {
    message: String,
    choices: Vec<Value>,
}

impl Choice {
    /// Creates the validator over the given choice set.
    pub fn new<I, V>(message: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            message: message.into(),
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }
}

impl Validator for Choice {
    fn check(&self, value: &Value) -> bool {
        self.choices.contains(value)
    }

    fn message(&self) -> &str {
        &self.message
    }
}
