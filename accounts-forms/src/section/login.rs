//! Login section.

use std::collections::HashMap;

use log::debug;
use log::warn;

use super::Authenticator;
use super::Notice;
use super::Section;
use super::SectionHooks;
use super::SectionOutcome;
use super::SectionState;
use super::account_url;
use super::render_notices;
use super::submit_button;
use super::validation_notices;
use crate::Value;
use crate::escape::esc_attr;
use crate::field::FieldConfig;
use crate::form::Form;
use crate::validator::NotEmpty;

/// The login page: username, password, remember-me, and a hidden redirect
/// target echoed back through the form.
pub struct Login<'a> {
    auth: &'a dyn Authenticator,
    hooks: SectionHooks,
    redirect_to: Option<String>,
    form: Option<Form>,
    notices: Vec<Notice>,
    state: SectionState,
}

impl<'a> Login<'a> {
    pub fn new(auth: &'a dyn Authenticator) -> Self {
        Self {
            auth,
            hooks: SectionHooks::default(),
            redirect_to: None,
            form: None,
            notices: Vec::new(),
            state: SectionState::Initial,
        }
    }

    pub fn with_hooks(mut self, hooks: SectionHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Redirect target picked up from the request query, echoed through the
    /// hidden `redirect_to` field.
    pub fn with_redirect_to(mut self, target: impl Into<String>) -> Self {
        self.redirect_to = Some(target.into());
        self
    }

    fn form(&mut self) -> &mut Form {
        let form = match self.form.take() {
            Some(form) => form,
            None => self.build_form(),
        };
        self.form.insert(form)
    }

    fn build_form(&self) -> Form {
        let mut initial: HashMap<String, Value> = HashMap::new();
        if let Some(target) = &self.redirect_to {
            initial.insert("redirect_to".to_string(), Value::from(target.clone()));
        }
        if let Some(filter) = &self.hooks.initial_filter {
            initial = filter(initial);
        }

        let mut form = Form::create(initial);
        form.add_field(
            "log",
            FieldConfig::text()
                .label("Username")
                .validator(NotEmpty::new("Please enter a username")),
        );
        form.add_field(
            "pwd",
            FieldConfig::password()
                .label("Password")
                .validator(NotEmpty::new("Please enter a password")),
        );
        form.add_field("rememberme", FieldConfig::checkbox().label("Remember Me"));
        form.add_field("redirect_to", FieldConfig::hidden());

        if let Some(alter) = &self.hooks.alter_form {
            alter(&mut form);
        }
        form
    }
}

impl Section for Login<'_> {
    fn name(&self) -> &'static str {
        "login"
    }

    fn title(&self) -> String {
        "Login".to_string()
    }

    fn handle_init(&mut self, additional: Option<&str>) -> SectionOutcome {
        match additional {
            Some("password_reset") => self.notices.push(Notice::new(
                "password_reset",
                "Your password has been reset. Please log in.",
            )),
            Some("registration_complete") => self.notices.push(Notice::new(
                "registration_complete",
                "Registration complete. Check your email for a password.",
            )),
            _ => {}
        }

        self.state = SectionState::AwaitingInput;
        SectionOutcome::Render
    }

    fn handle_submit(
        &mut self,
        data: HashMap<String, Value>,
        _additional: Option<&str>,
    ) -> SectionOutcome {
        self.state = SectionState::Validating;

        let form = self.form();
        form.bind(data);
        let (values, errors) = form.validate();

        if !errors.is_empty() {
            validation_notices(&mut self.notices, &errors);
            self.state = SectionState::ActionFailed;
            return SectionOutcome::Render;
        }

        let username = values
            .get("log")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let password = values
            .get("pwd")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let remember = values.get("rememberme").and_then(Value::as_str) == Some("on");

        match self.auth.sign_on(username, password, remember) {
            Ok(user) => {
                debug!("user '{}' logged in", user.username);
                let target = values
                    .get("redirect_to")
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| account_url("edit", None));
                self.state = SectionState::ActionSucceeded;
                SectionOutcome::Redirect(target)
            }
            Err(err) => {
                warn!("login failed for '{username}': {err}");
                self.notices.push(Notice::new("login_failed", err.to_string()));
                self.state = SectionState::ActionFailed;
                SectionOutcome::Render
            }
        }
    }

    fn state(&self) -> SectionState {
        self.state
    }

    fn notices(&self) -> &[Notice] {
        &self.notices
    }

    fn render(&mut self) -> String {
        let mut out = render_notices(&self.notices);
        out.push_str(&self.form().render());
        out.push_str(&submit_button("Login"));
        out.push_str(&format!(
            "<p class=\"account-forgot-password\"><a href=\"{}\">Forgot password?</a></p>",
            esc_attr(&account_url("forgot_password", None)),
        ));
        out
    }
}
