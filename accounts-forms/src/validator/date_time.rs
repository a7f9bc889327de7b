//! Date/time parsability check

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;

use super::Validator;
use crate::Value;

/// Timestamp formats accepted besides RFC 3339, matching what the HTML
/// `datetime-local` control submits plus the space-separated spelling.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// Requires a value that parses as a calendar date, time of day, or
/// timestamp. Unparsable input is invalid, never an error.
#[derive(Debug, Clone)]
pub struct DateTimeParsable {
    message: String,
}

impl DateTimeParsable {
    /// Creates the validator with the message shown on failure.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn parses(input: &str) -> bool {
    let input = input.trim();
    if input.is_empty() {
        return false;
    }

    if DateTime::parse_from_rfc3339(input).is_ok() {
        return true;
    }
    if DATE_TIME_FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(input, fmt).is_ok())
    {
        return true;
    }
    if NaiveDate::parse_from_str(input, "%Y-%m-%d").is_ok() {
        return true;
    }
    if TIME_FORMATS
        .iter()
        .any(|fmt| NaiveTime::parse_from_str(input, fmt).is_ok())
    {
        return true;
    }

    // month inputs submit year and month only
    NaiveDate::parse_from_str(&format!("{input}-01"), "%Y-%m-%d").is_ok()
}

impl Validator for DateTimeParsable {
    fn check(&self, value: &Value) -> bool {
        match value.as_str() {
            Some(s) => parses(s),
            None => false,
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
    fn test_accepted_formats() {
        let v = DateTimeParsable::new("bad date");
        assert!(v.check(&Value::from("2024-05-17")));
        assert!(v.check(&Value::from("2024-05-17T09:30")));
        assert!(v.check(&Value::from("2024-05-17 09:30:00")));
        assert!(v.check(&Value::from("2024-05-17T09:30:00+02:00")));
        assert!(v.check(&Value::from("09:30")));
        assert!(v.check(&Value::from("2024-05")));
    }

    #[test]
    fn test_rejected_input() {
        let v = DateTimeParsable::new("bad date");
        assert!(!v.check(&Value::from("yesterday")));
        assert!(!v.check(&Value::from("2024-13-01")));
        assert!(!v.check(&Value::from("")));
        assert!(!v.check(&Value::Null));
    }
}
