//! Form engine for front end account pages
//!
//! A declarative field/validator engine behind the account pages end users
//! see (login, registration, password reset, profile edit). The engine binds
//! untrusted submitted data to typed fields, validates field by field,
//! aggregates errors, and renders markup. Routing, sessions, and persistence
//! stay outside: the [`section`] controllers talk to them through
//! collaborator traits and the core itself performs no I/O.
//!
//! # Example
//!
//! ```
//! use accounts_forms::field::FieldConfig;
//! use accounts_forms::form::Form;
//! use accounts_forms::validator::NotEmpty;
//!
//! let mut form = Form::new();
//! form.add_field(
//!     "log",
//!     FieldConfig::text()
//!         .label("Username")
//!         .validator(NotEmpty::new("Please enter a username")),
//! );
//!
//! form.bind([("log", "alice")]);
//! let (values, errors) = form.validate();
//!
//! assert!(errors.is_empty());
//! assert_eq!(values["log"].as_str(), Some("alice"));
//! ```

pub mod error;
pub mod escape;
pub mod field;
pub mod form;
pub mod section;
pub mod validator;

mod value;

pub use value::Value;
