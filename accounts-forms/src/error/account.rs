//! Collaborator errors surfaced by account sections

/// Error type returned by the host collaborators a section drives
/// (authentication, user storage, mail). Sections convert these into
/// notices; they never escape a section entry point.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountError {
    /// Credentials did not match a known account.
    #[error("Invalid username and/or password")]
    InvalidCredentials,

    /// An account with the given email already exists.
    #[error("An account with that email already exists")]
    EmailExists,

    /// An account with the given username already exists.
    #[error("An account with that username already exists")]
    UsernameExists,

    /// The user record could not be loaded or persisted.
    #[error("Account storage error: {0}")]
    Storage(String),

    /// Account mail could not be handed off for delivery.
    #[error("Mail delivery error: {0}")]
    Mail(String),
}
