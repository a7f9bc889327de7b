//! Ordered field collection with binding, validation, and rendering.

mod hooks;

pub use hooks::FormHooks;

use std::collections::HashMap;
use std::fmt::Write;

use log::debug;

use crate::Value;
use crate::error::FormError;
use crate::escape::esc_attr;
use crate::field::Field;
use crate::field::FieldConfig;
use crate::field::FieldKind;

/// An ordered collection of fields for one request.
///
/// Fields render and validate in insertion order. A form is created by its
/// section, bound once with submitted data, validated, and discarded at the
/// end of the request; nothing is persisted.
///
/// # Example
///
/// ```
/// use accounts_forms::field::FieldConfig;
/// use accounts_forms::form::Form;
///
/// let mut form = Form::create([("redirect_to", "/account/edit")]);
/// form.add_field("redirect_to", FieldConfig::hidden());
///
/// assert!(form.render().contains("/account/edit"));
/// ```
#[derive(Default)]
pub struct Form {
    fields: Vec<Field>,
    initial: HashMap<String, Value>,
    bound: HashMap<String, Value>,
    hooks: FormHooks,
}

impl Form {
    /// An empty form with no initial values.
    pub fn new() -> Self {
        Self::default()
    }

    /// A form whose fields pick up defaults from `initial` as they are
    /// added.
    pub fn create<I, K, V>(initial: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            initial: initial
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
            ..Self::default()
        }
    }

    /// Attaches host extension hooks. Meaningful before fields are added,
    /// since the field filter runs inside `add_field`.
    pub fn with_hooks(mut self, hooks: FormHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Builds a field from its configuration, runs it through the host's
    /// field filter, applies any initial value, and stores it.
    ///
    /// Adding a name that already exists silently replaces that field in
    /// place: configuration is last-write-wins and the original slot keeps
    /// its render position. Returns the stored field for further
    /// configuration.
    pub fn add_field(&mut self, name: impl Into<String>, config: FieldConfig) -> &mut Field {
        let name = name.into();
        let mut field = Field::new(name.clone(), config);

        if let Some(filter) = &self.hooks.field_filter {
            field = filter(field);
        }
        if let Some(value) = self.initial.get(&name) {
            field.set_value(value.clone());
        }

        let slot = match self.fields.iter().position(|f| f.name() == name) {
            Some(idx) => {
                self.fields[idx] = field;
                idx
            }
            None => {
                self.fields.push(field);
                self.fields.len() - 1
            }
        };

        &mut self.fields[slot]
    }

    /// Removes a field by name. Absence is an expected outcome, not an
    /// error.
    pub fn remove_field(&mut self, name: &str) -> bool {
        match self.fields.iter().position(|f| f.name() == name) {
            Some(idx) => {
                self.fields.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Looks up a field by name for mutation.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name() == name)
    }

    /// The fields in insertion order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Records submitted data for the next validation pass. Field values
    /// are not touched until `validate` runs.
    pub fn bind<I, K, V>(&mut self, data: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.bound = data
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        debug!("bound {} submitted entries", self.bound.len());
        self
    }

    /// Binds from a decoded JSON object. Anything other than an object
    /// binds nothing.
    pub fn bind_json(&mut self, data: serde_json::Value) -> &mut Self {
        let entries: HashMap<String, Value> = match data {
            serde_json::Value::Object(map) => map
                .into_iter()
                .map(|(name, value)| (name, Value::from(value)))
                .collect(),
            _ => HashMap::new(),
        };
        self.bind(entries)
    }

    /// Validates every field in insertion order, first copying in any bound
    /// value for that field.
    ///
    /// Validation never stops early across fields, so the caller gets the
    /// complete error set in one pass. Successes land in the values map,
    /// failures in the errors map, both keyed by field name. Re-running
    /// without rebinding produces the same result.
    pub fn validate(&mut self) -> (HashMap<String, Value>, HashMap<String, String>) {
        let mut values = HashMap::new();
        let mut errors = HashMap::new();

        let Self { fields, bound, .. } = self;
        for field in fields.iter_mut() {
            if let Some(value) = bound.get(field.name()) {
                field.set_value(value.clone());
            }

            match field.validate() {
                Ok(value) => {
                    values.insert(field.name().to_string(), value);
                }
                Err(err) => {
                    debug!("field '{}' failed validation: {err}", field.name());
                    errors.insert(field.name().to_string(), err.message().to_string());
                }
            }
        }

        (values, errors)
    }

    /// Renders every field row in insertion order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for field in &self.fields {
            self.render_row(field, &mut out);
        }
        out
    }

    /// Renders a single field's row.
    ///
    /// Fails loudly when the name was never added; an unknown name here is
    /// a bug in the calling code, not bad user input.
    pub fn render_field(&self, name: &str) -> Result<String, FormError> {
        let field = self
            .field(name)
            .ok_or_else(|| FormError::unknown_field(name))?;

        let mut out = String::new();
        self.render_row(field, &mut out);
        Ok(out)
    }

    fn render_row(&self, field: &Field, out: &mut String) {
        match field.kind() {
            // inert fields produce no markup at all
            FieldKind::Dummy => return,
            // hidden inputs get no wrapper or label
            FieldKind::Hidden => {
                out.push_str(&field.render());
                return;
            }
            _ => {}
        }

        let tag = self
            .hooks
            .wrap_tag
            .as_ref()
            .map(|hook| hook(field))
            .unwrap_or_else(|| "p".to_string());
        let class = self
            .hooks
            .wrap_class
            .as_ref()
            .map(|hook| hook(field))
            .unwrap_or_else(|| format!("account-field-wrap {}", field.name()));

        let _ = write!(out, "<{} class=\"{}\">", esc_attr(&tag), esc_attr(&class));
        for hook in &self.hooks.before_label {
            out.push_str(&hook(field));
        }
        out.push_str(&field.render_label());
        for hook in &self.hooks.before_input {
            out.push_str(&hook(field));
        }
        out.push_str(&field.render());
        for hook in &self.hooks.after_input {
            out.push_str(&hook(field));
        }
        let _ = write!(out, "</{}>", esc_attr(&tag));
    }
}
