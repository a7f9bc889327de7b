//! Error types

mod account;
mod form;
mod validation;

pub use account::*;
pub use form::*;
pub use validation::*;
