//! Forgot-password section.

use std::collections::HashMap;

use log::debug;
use log::warn;

use super::Mailer;
use super::Notice;
use super::Section;
use super::SectionHooks;
use super::SectionOutcome;
use super::SectionState;
use super::UserStore;
use super::account_url;
use super::render_notices;
use super::submit_button;
use super::validation_notices;
use crate::Value;
use crate::field::FieldConfig;
use crate::form::Form;
use crate::validator::NotEmpty;

/// Asks for a username or email and mails a password-reset link when the
/// account exists. The response is the same neutral notice either way, so
/// the page cannot be used to probe which accounts exist.
pub struct ForgotPassword<'a> {
    store: &'a dyn UserStore,
    mailer: &'a dyn Mailer,
    hooks: SectionHooks,
    form: Option<Form>,
    notices: Vec<Notice>,
    state: SectionState,
}

const NEUTRAL_NOTICE: &str =
    "If that account exists, a password reset link is on its way. Check your email.";

impl<'a> ForgotPassword<'a> {
    pub fn new(store: &'a dyn UserStore, mailer: &'a dyn Mailer) -> Self {
        Self {
            store,
            mailer,
            hooks: SectionHooks::default(),
            form: None,
            notices: Vec::new(),
            state: SectionState::Initial,
        }
    }

    pub fn with_hooks(mut self, hooks: SectionHooks) -> Self {
        self.hooks = hooks;
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
        if let Some(filter) = &self.hooks.initial_filter {
            initial = filter(initial);
        }

        let mut form = Form::create(initial);
        form.add_field(
            "login",
            FieldConfig::text()
                .label("Username or Email")
                .validator(NotEmpty::new("Please enter a username or email.")),
        );

        if let Some(alter) = &self.hooks.alter_form {
            alter(&mut form);
        }
        form
    }

    fn send_reset(&self, login: &str) {
        let user = self
            .store
            .find_by_login(login)
            .or_else(|| self.store.find_by_email(login));

        let Some(user) = user else {
            debug!("password reset requested for unknown account");
            return;
        };

        let key = match self.store.issue_reset_key(user.id) {
            Ok(key) => key,
            Err(err) => {
                warn!("issuing reset key for user {} failed: {err}", user.id);
                return;
            }
        };

        let reset_url = account_url("reset_password", Some(&key));
        if let Err(err) = self.mailer.send_password_reset(&user, &reset_url) {
            warn!("sending reset mail for user {} failed: {err}", user.id);
        }
    }
}

impl Section for ForgotPassword<'_> {
    fn name(&self) -> &'static str {
        "forgot_password"
    }

    fn title(&self) -> String {
        "Forgot Password".to_string()
    }

    fn handle_init(&mut self, _additional: Option<&str>) -> SectionOutcome {
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

        let login = values
            .get("login")
            .and_then(Value::as_str)
            .unwrap_or_default();
        self.send_reset(login);

        // same notice whether or not the lookup matched
        self.notices.push(Notice::new("check_email", NEUTRAL_NOTICE));
        self.state = SectionState::ActionSucceeded;
        SectionOutcome::Render
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
        out.push_str(&submit_button("Reset Password"));
        out
    }
}
