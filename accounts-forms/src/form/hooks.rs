//! Extension hooks a host can attach to a form.
//!
//! Hooks are explicit callbacks owned by the form and registered at
//! construction time, so nothing outside the form instance can observe or
//! alter it.

use crate::field::Field;

/// Replaces a freshly built field with a host-supplied one.
pub type FieldFilter = Box<dyn Fn(Field) -> Field>;

/// Produces markup injected around a field row, or text overriding the row
/// wrapper tag/class.
pub type MarkupHook = Box<dyn Fn(&Field) -> String>;

/// Callback registrations consumed while building and rendering a form.
///
/// Markup hooks fire per field row, in registration order: `before_label`,
/// then the label, `before_input`, the control, `after_input`.
#[derive(Default)]
pub struct FormHooks {
    pub(crate) field_filter: Option<FieldFilter>,
    pub(crate) before_label: Vec<MarkupHook>,
    pub(crate) before_input: Vec<MarkupHook>,
    pub(crate) after_input: Vec<MarkupHook>,
    pub(crate) wrap_tag: Option<MarkupHook>,
    pub(crate) wrap_class: Option<MarkupHook>,
}

impl FormHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs on every field built by `add_field`; may return a different
    /// field entirely.
    pub fn field_filter(mut self, filter: impl Fn(Field) -> Field + 'static) -> Self {
        self.field_filter = Some(Box::new(filter));
        self
    }

    /// Injects markup before the field label.
    pub fn before_label(mut self, hook: impl Fn(&Field) -> String + 'static) -> Self {
        self.before_label.push(Box::new(hook));
        self
    }

    /// Injects markup between the label and the control.
    pub fn before_input(mut self, hook: impl Fn(&Field) -> String + 'static) -> Self {
        self.before_input.push(Box::new(hook));
        self
    }

    /// Injects markup after the control.
    pub fn after_input(mut self, hook: impl Fn(&Field) -> String + 'static) -> Self {
        self.after_input.push(Box::new(hook));
        self
    }

    /// Overrides the row wrapper tag (default `p`).
    pub fn wrap_tag(mut self, hook: impl Fn(&Field) -> String + 'static) -> Self {
        self.wrap_tag = Some(Box::new(hook));
        self
    }

    /// Overrides the row wrapper class (default `account-field-wrap {name}`).
    pub fn wrap_class(mut self, hook: impl Fn(&Field) -> String + 'static) -> Self {
        self.wrap_class = Some(Box::new(hook));
        self
    }
}
