//! Account page controllers.
//!
//! One section per route segment. A section owns exactly one form (built
//! lazily, memoized for the request), binds the submitted data, interprets
//! validation results, and hands the domain action to the host's
//! collaborators. Authentication, persistence, mail, and redirects are all
//! behind the traits here; the section itself performs no I/O.
//!
//! Every section follows the same lifecycle:
//! `Initial -> AwaitingInput` (GET render) or
//! `Initial -> Validating -> ActionFailed | ActionSucceeded | Aborted`
//! (POST submit).

mod account;
mod forgot_password;
mod login;
mod register;
mod reset_password;

pub use account::Account;
pub use forgot_password::ForgotPassword;
pub use login::Login;
pub use register::Register;
pub use reset_password::ResetPassword;

use std::collections::HashMap;
use std::fmt::Write;

use crate::Value;
use crate::error::AccountError;
use crate::escape::esc_attr;
use crate::escape::esc_html;
use crate::form::Form;

/// Where a section is in its request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionState {
    #[default]
    Initial,
    /// Rendering the form, waiting for a submission.
    AwaitingInput,
    /// A submission is being bound and validated.
    Validating,
    /// Validation or the domain action failed; re-render with notices.
    ActionFailed,
    /// The domain action was performed.
    ActionSucceeded,
    /// A precondition failed hard; the page is treated as not found.
    Aborted,
}

/// What the host should do after handing a request to a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionOutcome {
    /// Render the page, including any accumulated notices.
    Render,
    /// The domain action succeeded; issue a redirect to the given location.
    Redirect(String),
    /// Treat the page as not found (for example an invalid reset key).
    Abort,
}

/// A keyed, human-readable message shown above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub key: String,
    pub message: String,
}

impl Notice {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Snapshot of the user record a section works against. Loaded and
/// persisted by the host's [`UserStore`]; the section only edits the copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSnapshot {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub display_name: String,
    pub description: String,
}

/// Checks credentials and establishes a session.
pub trait Authenticator {
    fn sign_on(
        &self,
        username: &str,
        password: &str,
        remember: bool,
    ) -> Result<UserSnapshot, AccountError>;
}

/// Loads and persists user records.
pub trait UserStore {
    /// The user the current request is authenticated as, if any.
    fn current_user(&self) -> Option<UserSnapshot>;

    fn find_by_login(&self, login: &str) -> Option<UserSnapshot>;

    fn find_by_email(&self, email: &str) -> Option<UserSnapshot>;

    /// Looks up the user a password-reset key was issued for.
    fn find_by_reset_key(&self, key: &str) -> Option<UserSnapshot>;

    /// Issues a fresh password-reset key for the user.
    fn issue_reset_key(&self, user_id: u64) -> Result<String, AccountError>;

    fn set_password(&self, user_id: u64, password: &str) -> Result<(), AccountError>;

    /// Persists an edited snapshot, changing the password as well when one
    /// is supplied. Returns the saved user's id.
    fn update(&self, user: &UserSnapshot, new_password: Option<&str>)
    -> Result<u64, AccountError>;

    /// Creates a new account with a generated password.
    fn register(&self, email: &str, username: &str) -> Result<UserSnapshot, AccountError>;
}

/// Sends account mail. The section only decides *that* mail goes out.
pub trait Mailer {
    fn send_password_reset(
        &self,
        user: &UserSnapshot,
        reset_url: &str,
    ) -> Result<(), AccountError>;

    fn send_registration(&self, user: &UserSnapshot, login_url: &str)
    -> Result<(), AccountError>;
}

/// Host callbacks that run while a section assembles its form.
#[derive(Default)]
pub struct SectionHooks {
    pub(crate) initial_filter:
        Option<Box<dyn Fn(HashMap<String, Value>) -> HashMap<String, Value>>>,
    pub(crate) alter_form: Option<Box<dyn Fn(&mut Form)>>,
}

impl SectionHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the initial values before the field set is built.
    pub fn initial_filter(
        mut self,
        filter: impl Fn(HashMap<String, Value>) -> HashMap<String, Value> + 'static,
    ) -> Self {
        self.initial_filter = Some(Box::new(filter));
        self
    }

    /// Runs after all stock fields are added, so the host can add, remove,
    /// or reconfigure fields.
    pub fn alter_form(mut self, alter: impl Fn(&mut Form) + 'static) -> Self {
        self.alter_form = Some(Box::new(alter));
        self
    }
}

/// Builds the path for an account area, e.g. `/account/login` or
/// `/account/reset_password/{key}`. Mapping this path onto real routes is
/// the host's concern.
pub fn account_url(area: &str, additional: Option<&str>) -> String {
    match additional {
        Some(extra) => format!("/account/{area}/{extra}"),
        None => format!("/account/{area}"),
    }
}

/// The interface every account page controller implements.
pub trait Section {
    /// Route segment for this section.
    fn name(&self) -> &'static str;

    /// Page title.
    fn title(&self) -> String;

    /// GET-style entry point: prepare the page and check preconditions.
    fn handle_init(&mut self, additional: Option<&str>) -> SectionOutcome;

    /// POST-style entry point: bind, validate, and perform the domain
    /// action.
    fn handle_submit(
        &mut self,
        data: HashMap<String, Value>,
        additional: Option<&str>,
    ) -> SectionOutcome;

    /// Current lifecycle state.
    fn state(&self) -> SectionState;

    /// Notices accumulated so far.
    fn notices(&self) -> &[Notice];

    /// Renders the notices, the form, and the submit control.
    fn render(&mut self) -> String;
}

pub(crate) fn render_notices(notices: &[Notice]) -> String {
    if notices.is_empty() {
        return String::new();
    }

    let mut out = String::from("<ul class=\"account-notices\">");
    for notice in notices {
        let _ = write!(
            out,
            "<li class=\"account-notice {}\">{}</li>",
            esc_attr(&notice.key),
            esc_html(&notice.message),
        );
    }
    out.push_str("</ul>");
    out
}

pub(crate) fn submit_button(label: &str) -> String {
    format!(
        "<p class=\"account-submit\"><button type=\"submit\">{}</button></p>",
        esc_html(label)
    )
}

/// Converts a validation error map into `validation_{field}` notices.
pub(crate) fn validation_notices(notices: &mut Vec<Notice>, errors: &HashMap<String, String>) {
    for (field, message) in errors {
        notices.push(Notice::new(format!("validation_{field}"), message.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_url() {
        assert_eq!(account_url("login", None), "/account/login");
        assert_eq!(
            account_url("reset_password", Some("abc123")),
            "/account/reset_password/abc123"
        );
    }

    #[test]
    fn test_render_notices_escapes_messages() {
        let notices = vec![Notice::new("success", "saved <ok>")];
        let markup = render_notices(&notices);
        assert!(markup.contains("saved &lt;ok&gt;"));
        assert!(markup.contains(r#"class="account-notice success""#));
    }

    #[test]
    fn test_render_notices_empty() {
        assert_eq!(render_notices(&[]), "");
    }
}
