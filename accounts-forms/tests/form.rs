//! Tests for the form engine's observable contract.

use accounts_forms::Value;
use accounts_forms::field::FieldConfig;
use accounts_forms::form::Form;
use accounts_forms::validator::NotEmpty;
use accounts_forms::validator::Range;

#[test]
fn test_validate_is_idempotent() {
    let mut form = Form::new();
    form.add_field(
        "log",
        FieldConfig::text().validator(NotEmpty::new("Please enter a username")),
    );
    form.add_field(
        "age",
        FieldConfig::number().validator(Range::between("Out of range", 1, 10)),
    );
    form.bind([("log", "alice"), ("age", "11")]);

    let first = form.validate();
    let second = form.validate();
    assert_eq!(first, second);
}

#[test]
fn test_render_order_matches_insertion_order() {
    let mut form = Form::new();
    form.add_field("zeta", FieldConfig::text().label("Zeta"));
    form.add_field("alpha", FieldConfig::text().label("Alpha"));
    form.add_field("mid", FieldConfig::text().label("Mid"));

    // validation outcome must not affect ordering
    form.bind([("zeta", "")]);
    form.validate();

    let markup = form.render();
    let zeta = markup.find("name=\"zeta\"").unwrap();
    let alpha = markup.find("name=\"alpha\"").unwrap();
    let mid = markup.find("name=\"mid\"").unwrap();
    assert!(zeta < alpha && alpha < mid);
}

#[test]
fn test_add_field_last_write_wins() {
    let mut form = Form::new();
    form.add_field("x", FieldConfig::text().label("First"));
    form.add_field("x", FieldConfig::password().label("Second"));

    assert_eq!(form.fields().len(), 1);
    let field = form.field("x").unwrap();
    assert_eq!(field.label(), Some("Second"));
    assert!(field.render().contains("type=\"password\""));
}

#[test]
fn test_replacement_keeps_render_position() {
    let mut form = Form::new();
    form.add_field("a", FieldConfig::text());
    form.add_field("b", FieldConfig::text());
    form.add_field("a", FieldConfig::password());

    let markup = form.render();
    assert!(markup.find("name=\"a\"").unwrap() < markup.find("name=\"b\"").unwrap());
}

#[test]
fn test_all_field_errors_collected_in_one_pass() {
    let mut form = Form::new();
    form.add_field("a", FieldConfig::text().validator(NotEmpty::new("a empty")));
    form.add_field("b", FieldConfig::text().validator(NotEmpty::new("b empty")));
    form.bind([("a", ""), ("b", "")]);

    let (values, errors) = form.validate();
    assert!(values.is_empty());
    assert_eq!(errors.len(), 2);
    assert_eq!(errors["a"], "a empty");
    assert_eq!(errors["b"], "b empty");
}

#[test]
fn test_required_check_precedes_validators() {
    let mut form = Form::new();
    form.add_field(
        "log",
        FieldConfig::text()
            .required()
            .required_message("Username is required.")
            .validator(NotEmpty::new("validator message")),
    );
    form.bind([("log", "")]);

    let (_, errors) = form.validate();
    assert_eq!(errors["log"], "Username is required.");
}

#[test]
fn test_password_value_never_rendered() {
    let mut form = Form::new();
    form.add_field("pwd", FieldConfig::password().label("Password"));
    form.bind([("pwd", "secret123")]);
    form.validate();

    let markup = form.render();
    assert!(!markup.contains("secret123"));
    assert!(markup.contains("value=\"\""));
}

#[test]
fn test_unknown_type_is_inert_but_passes_values_through() {
    let mut form = Form::new();
    form.add_field("x", FieldConfig::of_type("no-such-type"));
    form.bind([("x", "carried along")]);

    let (values, errors) = form.validate();
    assert_eq!(values["x"], Value::from("carried along"));
    assert!(errors.is_empty());

    assert_eq!(form.render(), "");
    assert_eq!(form.render_field("x").unwrap(), "");
}

#[test]
fn test_successful_login_scenario() {
    let mut form = Form::new();
    form.add_field(
        "log",
        FieldConfig::text().validator(NotEmpty::new("Please enter a username")),
    );
    form.add_field(
        "pwd",
        FieldConfig::password().validator(NotEmpty::new("Please enter a password")),
    );
    form.bind([("log", "alice"), ("pwd", "hunter2")]);

    let (values, errors) = form.validate();
    assert!(errors.is_empty());
    assert_eq!(values["log"], Value::from("alice"));
    assert_eq!(values["pwd"], Value::from("hunter2"));
}

#[test]
fn test_failed_required_field_keeps_other_values() {
    let mut form = Form::new();
    form.add_field(
        "log",
        FieldConfig::text().validator(NotEmpty::new("Please enter a username")),
    );
    form.add_field(
        "pwd",
        FieldConfig::password().validator(NotEmpty::new("Please enter a password")),
    );
    form.bind([("log", ""), ("pwd", "hunter2")]);

    let (values, errors) = form.validate();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors["log"], "Please enter a username");
    assert_eq!(values["pwd"], Value::from("hunter2"));
    assert!(!values.contains_key("log"));
}

#[test]
fn test_range_validator_boundaries() {
    let mut form = Form::new();
    form.add_field(
        "age",
        FieldConfig::number().validator(Range::between("Out of range", 1, 10)),
    );

    form.bind([("age", "10")]);
    let (_, errors) = form.validate();
    assert!(errors.is_empty());

    form.bind([("age", "11")]);
    let (_, errors) = form.validate();
    assert_eq!(errors["age"], "Out of range");

    form.bind([("age", "1")]);
    let (_, errors) = form.validate();
    assert!(errors.is_empty());
}

#[test]
fn test_bound_values_survive_failed_validation() {
    // the user's input is preserved for re-rendering, not reset
    let mut form = Form::new();
    form.add_field(
        "email",
        FieldConfig::email().validator(NotEmpty::new("Please enter an email.")),
    );
    form.add_field("nickname", FieldConfig::text());
    form.bind([("email", ""), ("nickname", "typed by user")]);
    form.validate();

    assert!(form.render().contains("typed by user"));
}

#[test]
fn test_bind_json_object() {
    let mut form = Form::new();
    form.add_field("log", FieldConfig::text());
    form.add_field("age", FieldConfig::number());
    form.bind_json(serde_json::json!({"log": "alice", "age": 42}));

    let (values, errors) = form.validate();
    assert!(errors.is_empty());
    assert_eq!(values["log"], Value::from("alice"));
    assert_eq!(values["age"], Value::from(42i64));
}
