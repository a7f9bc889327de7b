//! Full-match regex check

use log::warn;
use regex::Regex;

use super::Validator;
use crate::Value;

/// Requires the whole value to match a regular expression.
///
/// The pattern is anchored at construction so partial matches do not pass.
/// A pattern that does not compile leaves the validator failing closed.
#[derive(Debug, Clone)]
pub struct Pattern {
    message: String,
    regex: Option<Regex>,
}

impl Pattern {
    /// Creates the validator from a pattern source.
    pub fn new(message: impl Into<String>, pattern: &str) -> Self {
        let regex = match Regex::new(&format!("^(?:{pattern})$")) {
            Ok(regex) => Some(regex),
            Err(err) => {
                warn!("pattern validator does not compile, failing closed: {err}");
                None
            }
        };

        Self {
            message: message.into(),
            regex,
        }
    }
}

impl Validator for Pattern {
    fn check(&self, value: &Value) -> bool {
        match (&self.regex, value.as_str()) {
            (Some(regex), Some(s)) => regex.is_match(s),
            _ => false,
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}
