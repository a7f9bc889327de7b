//! Reset-password section.

use std::collections::HashMap;

use log::warn;

use super::Notice;
use super::Section;
use super::SectionHooks;
use super::SectionOutcome;
use super::SectionState;
use super::UserSnapshot;
use super::UserStore;
use super::render_notices;
use super::submit_button;
use super::validation_notices;
use crate::Value;
use crate::field::FieldConfig;
use crate::form::Form;
use crate::validator::NotEmpty;

/// Sets a new password for the user a reset key was issued to. An unknown
/// or missing key aborts: the page behaves as if it does not exist.
pub struct ResetPassword<'a> {
    store: &'a dyn UserStore,
    hooks: SectionHooks,
    form: Option<Form>,
    user: Option<UserSnapshot>,
    notices: Vec<Notice>,
    state: SectionState,
}

impl<'a> ResetPassword<'a> {
    pub fn new(store: &'a dyn UserStore) -> Self {
        Self {
            store,
            hooks: SectionHooks::default(),
            form: None,
            user: None,
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
            "password",
            FieldConfig::password()
                .label("Password")
                .required()
                .validator(NotEmpty::new("Please enter a new password.")),
        );
        form.add_field(
            "password_again",
            FieldConfig::password()
                .label("Password Again")
                .validator(NotEmpty::new("Please enter your new password again.")),
        );

        if let Some(alter) = &self.hooks.alter_form {
            alter(&mut form);
        }
        form
    }

    fn user_for_key(&mut self, reset_key: Option<&str>) -> Option<UserSnapshot> {
        if self.user.is_none() {
            self.user = reset_key.and_then(|key| self.store.find_by_reset_key(key));
        }
        self.user.clone()
    }
}

impl Section for ResetPassword<'_> {
    fn name(&self) -> &'static str {
        "reset_password"
    }

    fn title(&self) -> String {
        "Reset Password".to_string()
    }

    fn handle_init(&mut self, additional: Option<&str>) -> SectionOutcome {
        match self.user_for_key(additional) {
            Some(_) => {
                self.state = SectionState::AwaitingInput;
                SectionOutcome::Render
            }
            None => {
                self.state = SectionState::Aborted;
                SectionOutcome::Abort
            }
        }
    }

    fn handle_submit(
        &mut self,
        data: HashMap<String, Value>,
        additional: Option<&str>,
    ) -> SectionOutcome {
        let Some(user) = self.user_for_key(additional) else {
            self.state = SectionState::Aborted;
            return SectionOutcome::Abort;
        };
        self.state = SectionState::Validating;

        let form = self.form();
        form.bind(data);
        let (values, errors) = form.validate();

        if !errors.is_empty() {
            validation_notices(&mut self.notices, &errors);
            self.state = SectionState::ActionFailed;
            return SectionOutcome::Render;
        }

        let password = values
            .get("password")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let password_again = values
            .get("password_again")
            .and_then(Value::as_str)
            .unwrap_or_default();

        if password != password_again {
            self.notices
                .push(Notice::new("password_match", "Passwords do not match."));
            self.state = SectionState::ActionFailed;
            return SectionOutcome::Render;
        }

        match self.store.set_password(user.id, password) {
            Ok(()) => {
                self.notices
                    .push(Notice::new("success", "Your password has been reset."));
                self.state = SectionState::ActionSucceeded;
                SectionOutcome::Render
            }
            Err(err) => {
                warn!("resetting password for user {} failed: {err}", user.id);
                self.notices
                    .push(Notice::new("save_error", "Error saving! Try again."));
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
        out.push_str(&submit_button("Reset Password"));
        out
    }
}
