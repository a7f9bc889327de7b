//! Account (profile edit) section.

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
use crate::validator::Email;
use crate::validator::NotEmpty;

/// The profile edit page for the currently signed-in user. Requests with no
/// current user abort; the host is expected to send them to the login page.
pub struct Account<'a> {
    store: &'a dyn UserStore,
    hooks: SectionHooks,
    form: Option<Form>,
    user: Option<UserSnapshot>,
    notices: Vec<Notice>,
    state: SectionState,
}

impl<'a> Account<'a> {
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
        let user = self.user.clone().unwrap_or_default();
        let mut initial: HashMap<String, Value> = [
            ("email", user.email),
            ("first_name", user.first_name),
            ("last_name", user.last_name),
            ("nickname", user.nickname),
            ("display_name", user.display_name),
            ("description", user.description),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), Value::from(value)))
        .collect();

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
        form.add_field("first_name", FieldConfig::text().label("First Name"));
        form.add_field("last_name", FieldConfig::text().label("Last Name"));
        form.add_field(
            "nickname",
            FieldConfig::text()
                .label("Nickname")
                .validator(NotEmpty::new("Please enter a nickname.")),
        );
        form.add_field("display_name", FieldConfig::text().label("Display Name"));
        form.add_field("description", FieldConfig::textarea().label("Description"));
        form.add_field("new_password", FieldConfig::password().label("New Password"));
        form.add_field(
            "new_password_again",
            FieldConfig::password().label("New Password Again"),
        );

        if let Some(alter) = &self.hooks.alter_form {
            alter(&mut form);
        }
        form
    }

    fn edited_snapshot(&self, user: &UserSnapshot, values: &HashMap<String, Value>) -> UserSnapshot {
        let text = |name: &str| -> String {
            values
                .get(name)
                .and_then(Value::as_str)
                .map(str::trim)
                .unwrap_or_default()
                .to_string()
        };

        let mut edited = user.clone();
        // an empty email keeps the stored address; the other fields may be
        // cleared outright
        let email = text("email");
        if !email.is_empty() {
            edited.email = email;
        }
        edited.first_name = text("first_name");
        edited.last_name = text("last_name");
        edited.nickname = text("nickname");
        edited.display_name = text("display_name");
        edited.description = text("description");
        edited
    }
}

impl Section for Account<'_> {
    fn name(&self) -> &'static str {
        "edit"
    }

    fn title(&self) -> String {
        "Account".to_string()
    }

    fn handle_init(&mut self, _additional: Option<&str>) -> SectionOutcome {
        match self.store.current_user() {
            Some(user) => {
                self.user = Some(user);
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
        _additional: Option<&str>,
    ) -> SectionOutcome {
        let Some(user) = self.store.current_user() else {
            self.state = SectionState::Aborted;
            return SectionOutcome::Abort;
        };
        self.user = Some(user.clone());
        self.state = SectionState::Validating;

        let form = self.form();
        form.bind(data);
        let (values, errors) = form.validate();

        if !errors.is_empty() {
            validation_notices(&mut self.notices, &errors);
            self.state = SectionState::ActionFailed;
            return SectionOutcome::Render;
        }

        let new_password = values
            .get("new_password")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty());
        let password_again = values
            .get("new_password_again")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty());

        let mut password_change = None;
        if let Some(password) = new_password {
            if Some(password) == password_again {
                password_change = Some(password);
            } else {
                self.notices
                    .push(Notice::new("pass_error", "Could not update password."));
            }
        }

        let edited = self.edited_snapshot(&user, &values);
        match self.store.update(&edited, password_change) {
            Ok(_) => {
                self.notices.push(Notice::new("success", "Account updated."));
                self.state = SectionState::ActionSucceeded;
                SectionOutcome::Render
            }
            Err(err) => {
                warn!("saving account for user {} failed: {err}", user.id);
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
        out.push_str(&submit_button("Save"));
        out
    }
}
