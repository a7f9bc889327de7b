//! Form-level errors

/// Error type for form operations that reference a field by name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// The referenced field was never added to the form. Raised by
    /// `render_field`; looking up or removing an absent field is an
    /// expected outcome and returns `Option`/`bool` instead.
    #[error("Field '{field}' does not exist")]
    UnknownField { field: String },
}

impl FormError {
    /// Creates a new unknown-field error.
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }
}
