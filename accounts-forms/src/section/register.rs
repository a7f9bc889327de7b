//! Registration section.

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
use crate::validator::Email;
use crate::validator::NotEmpty;

/// Creates a new account from an email and username. The store generates
/// the password; the mailer sends it along with the login link.
pub struct Register<'a> {
    store: &'a dyn UserStore,
    mailer: &'a dyn Mailer,
    hooks: SectionHooks,
    form: Option<Form>,
    notices: Vec<Notice>,
    state: SectionState,
}

impl<'a> Register<'a> {
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
            "email",
            FieldConfig::email()
                .label("Email")
                .required()
                .validator(NotEmpty::new("Please enter an email."))
                .validator(Email::new("Please enter a valid email.")),
        );
        form.add_field(
            "username",
            FieldConfig::text()
                .label("Username")
                .validator(NotEmpty::new("Please enter a username.")),
        );

        if let Some(alter) = &self.hooks.alter_form {
            alter(&mut form);
        }
        form
    }
}

impl Section for Register<'_> {
    fn name(&self) -> &'static str {
        "register"
    }

    fn title(&self) -> String {
        "Register".to_string()
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

        let email = values
            .get("email")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let username = values
            .get("username")
            .and_then(Value::as_str)
            .unwrap_or_default();

        match self.store.register(email, username) {
            Ok(user) => {
                debug!("registered user '{}'", user.username);
                let login_url = account_url("login", Some("registration_complete"));
                if let Err(err) = self.mailer.send_registration(&user, &login_url) {
                    warn!("sending registration mail for user {} failed: {err}", user.id);
                }
                self.state = SectionState::ActionSucceeded;
                SectionOutcome::Redirect(login_url)
            }
            Err(err) => {
                self.notices
                    .push(Notice::new("registration_failed", err.to_string()));
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
        out.push_str(&submit_button("Register"));
        out
    }
}
