//! Typed form fields.
//!
//! A field is a named, renderable unit holding a value, a label, a required
//! flag, and an ordered list of validators. The set of field kinds is a
//! closed enum; declaring an unknown kind name falls back to
//! [`FieldKind::Dummy`], which renders nothing and always validates, so
//! callers can declare forward-compatible or intentionally inert fields
//! without the engine rejecting them.

mod render;

pub use render::CHECK_ON;

use crate::Value;
use crate::error::ValidationError;
use crate::validator::Validator;

/// Message used when a required field is empty and no message was
/// configured for it.
pub const DEFAULT_REQUIRED_MESSAGE: &str = "This field is required.";

/// The kind of control a field renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    Password,
    Hidden,
    Color,
    Date,
    DateTime,
    DateTimeLocal,
    Email,
    Month,
    Number,
    Search,
    Time,
    Url,
    Week,
    Multiple,
    Radio,
    Select,
    Textarea,
    Checkbox,
    File,
    /// Inert placeholder: renders nothing and always validates.
    Dummy,
}

impl FieldKind {
    /// Resolves a declared kind name. Unknown names map to `Dummy` instead
    /// of failing.
    pub fn parse(name: &str) -> Self {
        match name {
            "text" => Self::Text,
            "password" => Self::Password,
            "hidden" => Self::Hidden,
            "color" => Self::Color,
            "date" => Self::Date,
            "datetime" => Self::DateTime,
            "datetime-local" => Self::DateTimeLocal,
            "email" => Self::Email,
            "month" => Self::Month,
            "number" => Self::Number,
            "search" => Self::Search,
            "time" => Self::Time,
            "url" => Self::Url,
            "week" => Self::Week,
            "multiple" => Self::Multiple,
            "radio" => Self::Radio,
            "select" => Self::Select,
            "textarea" => Self::Textarea,
            "checkbox" => Self::Checkbox,
            "file" => Self::File,
            _ => Self::Dummy,
        }
    }

    /// The `type` attribute for kinds rendered as a bare `<input>`.
    pub(crate) fn input_type(self) -> Option<&'static str> {
        match self {
            Self::Text => Some("text"),
            Self::Password => Some("password"),
            Self::Hidden => Some("hidden"),
            Self::Color => Some("color"),
            Self::Date => Some("date"),
            Self::DateTime => Some("datetime"),
            Self::DateTimeLocal => Some("datetime-local"),
            Self::Email => Some("email"),
            Self::Month => Some("month"),
            Self::Number => Some("number"),
            Self::Search => Some("search"),
            Self::Time => Some("time"),
            Self::Url => Some("url"),
            Self::Week => Some("week"),
            Self::File => Some("file"),
            _ => None,
        }
    }
}

/// Declarative configuration for a single field.
///
/// # Example
///
/// ```
/// use accounts_forms::field::FieldConfig;
/// use accounts_forms::validator::{Email, NotEmpty};
///
/// let config = FieldConfig::email()
///     .label("Email")
///     .required()
///     .validator(NotEmpty::new("Please enter an email."))
///     .validator(Email::new("Please enter a valid email."));
/// ```
#[derive(Debug, Default)]
pub struct FieldConfig {
    pub(crate) kind: FieldKind,
    pub(crate) label: Option<String>,
    pub(crate) required: bool,
    pub(crate) required_message: Option<String>,
    pub(crate) class: Option<String>,
    pub(crate) choices: Vec<(String, String)>,
    pub(crate) min: Option<Value>,
    pub(crate) max: Option<Value>,
    pub(crate) step: Option<Value>,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) validators: Vec<Box<dyn Validator>>,
}

impl FieldConfig {
    /// Configuration for the given kind.
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Configuration from a declared kind name; unknown names fall back to
    /// the inert dummy kind.
    pub fn of_type(name: &str) -> Self {
        Self::new(FieldKind::parse(name))
    }

    pub fn text() -> Self {
        Self::new(FieldKind::Text)
    }

    pub fn password() -> Self {
        Self::new(FieldKind::Password)
    }

    pub fn hidden() -> Self {
        Self::new(FieldKind::Hidden)
    }

    pub fn email() -> Self {
        Self::new(FieldKind::Email)
    }

    pub fn number() -> Self {
        Self::new(FieldKind::Number)
    }

    pub fn checkbox() -> Self {
        Self::new(FieldKind::Checkbox)
    }

    pub fn radio() -> Self {
        Self::new(FieldKind::Radio)
    }

    pub fn select() -> Self {
        Self::new(FieldKind::Select)
    }

    pub fn textarea() -> Self {
        Self::new(FieldKind::Textarea)
    }

    /// Sets the label shown next to the control.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Marks the field required. The required check runs before any
    /// validators.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Message used when the required check fails, replacing the generic
    /// default.
    pub fn required_message(mut self, message: impl Into<String>) -> Self {
        self.required_message = Some(message.into());
        self
    }

    /// CSS class emitted on the control.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Adds one choice (submitted value, visible label) for radio/select
    /// controls.
    pub fn choice(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.choices.push((value.into(), label.into()));
        self
    }

    /// Replaces the choice set.
    pub fn choices<I, K, L>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = (K, L)>,
        K: Into<String>,
        L: Into<String>,
    {
        self.choices = choices
            .into_iter()
            .map(|(value, label)| (value.into(), label.into()))
            .collect();
        self
    }

    /// Minimum attribute for number controls.
    pub fn min(mut self, min: impl Into<Value>) -> Self {
        self.min = Some(min.into());
        self
    }

    /// Maximum attribute for number controls.
    pub fn max(mut self, max: impl Into<Value>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// Step attribute for number controls.
    pub fn step(mut self, step: impl Into<Value>) -> Self {
        self.step = Some(step.into());
        self
    }

    /// Free-form extra attribute emitted on the control.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Appends a validator. Validators run in declaration order and the
    /// first failure wins.
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }
}

/// A single named, typed input unit within a form.
///
/// The name is immutable after construction; the value may be reassigned any
/// number of times before validation.
#[derive(Debug)]
pub struct Field {
    name: String,
    config: FieldConfig,
    value: Value,
}

impl Field {
    /// Builds a field from its declared configuration. This is the factory
    /// end of `Form::add_field`; the kind is resolved through the closed
    /// [`FieldKind`] enum rather than any runtime lookup.
    pub fn new(name: impl Into<String>, config: FieldConfig) -> Self {
        Self {
            name: name.into(),
            config,
            value: Value::Null,
        }
    }

    /// The field name, unique within its form.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.config.kind
    }

    pub fn label(&self) -> Option<&str> {
        self.config.label.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.config.required
    }

    /// The current value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Replaces the current value.
    pub fn set_value(&mut self, value: impl Into<Value>) -> &mut Self {
        self.value = value.into();
        self
    }

    /// Replaces the label after construction.
    pub fn set_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.config.label = Some(label.into());
        self
    }

    /// Toggles the required flag after construction.
    pub fn set_required(&mut self, required: bool) -> &mut Self {
        self.config.required = required;
        self
    }

    /// Appends a validator after construction.
    pub fn add_validator(&mut self, validator: impl Validator + 'static) -> &mut Self {
        self.config.validators.push(Box::new(validator));
        self
    }

    /// Validates the current value.
    ///
    /// The required check runs first; after it, validators run in
    /// declaration order and the first failure ends the pass, so at most one
    /// error surfaces per field per pass. Dummy fields always validate.
    pub fn validate(&self) -> Result<Value, ValidationError> {
        if self.config.kind == FieldKind::Dummy {
            return Ok(self.value.clone());
        }

        if self.config.required && self.value.is_empty() {
            let message = self
                .config
                .required_message
                .clone()
                .unwrap_or_else(|| DEFAULT_REQUIRED_MESSAGE.to_string());
            return Err(ValidationError::new(message));
        }

        for validator in &self.config.validators {
            validator.validate(&self.value)?;
        }

        Ok(self.value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::NotEmpty;
    use crate::validator::Range;

    #[test]
    fn test_unknown_kind_falls_back_to_dummy() {
        assert_eq!(FieldKind::parse("no-such-type"), FieldKind::Dummy);
        assert_eq!(FieldKind::parse("password"), FieldKind::Password);
    }

    #[test]
    fn test_required_check_runs_before_validators() {
        let field = Field::new(
            "name",
            FieldConfig::text()
                .required()
                .required_message("Name is required.")
                .validator(NotEmpty::new("not empty")),
        );
        let err = field.validate().unwrap_err();
        assert_eq!(err.message(), "Name is required.");
    }

    #[test]
    fn test_required_default_message() {
        let field = Field::new("name", FieldConfig::text().required());
        let err = field.validate().unwrap_err();
        assert_eq!(err.message(), DEFAULT_REQUIRED_MESSAGE);
    }

    #[test]
    fn test_first_validator_failure_wins() {
        let mut field = Field::new(
            "age",
            FieldConfig::number()
                .validator(NotEmpty::new("first"))
                .validator(Range::at_least("second", 1)),
        );
        let err = field.validate().unwrap_err();
        assert_eq!(err.message(), "first");

        field.set_value("0");
        let err = field.validate().unwrap_err();
        assert_eq!(err.message(), "second");
    }

    #[test]
    fn test_dummy_always_validates() {
        let mut field = Field::new("x", FieldConfig::of_type("no-such-type"));
        field.set_value("whatever");
        assert_eq!(field.validate().unwrap(), Value::from("whatever"));
    }

    #[test]
    fn test_validators_run_on_optional_empty_fields() {
        // optional fields with NotEmpty attached still error when blank
        let field = Field::new("nickname", FieldConfig::text().validator(NotEmpty::new("blank")));
        assert_eq!(field.validate().unwrap_err().message(), "blank");
    }
}
