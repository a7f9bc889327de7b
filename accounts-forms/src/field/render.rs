//! Field markup generation.

use std::fmt::Write;

use super::Field;
use super::FieldKind;
use crate::Value;
use crate::escape::attrs_to_string;
use crate::escape::esc_attr;
use crate::escape::esc_html;

/// Sentinel value that marks a checkbox as checked.
pub const CHECK_ON: &str = "on";

impl Field {
    /// Renders the control markup only. The label and wrapper element are
    /// the form's concern.
    pub fn render(&self) -> String {
        match self.kind() {
            FieldKind::Dummy => String::new(),
            FieldKind::Checkbox => self.render_checkbox(),
            FieldKind::Radio => self.render_radio(),
            FieldKind::Select => self.render_select(false),
            FieldKind::Multiple => self.render_select(true),
            FieldKind::Textarea => self.render_textarea(),
            _ => self.render_input(),
        }
    }

    /// Renders the `<label>` element for the control.
    ///
    /// Checkbox fields render their label inline with the control, so this
    /// is a no-op for them (avoids a double label). Dummy fields render
    /// nothing at all.
    pub fn render_label(&self) -> String {
        match self.kind() {
            FieldKind::Checkbox | FieldKind::Dummy => String::new(),
            _ => format!(
                "<label for=\"{}\">{}</label>",
                esc_attr(self.name()),
                esc_html(self.label().unwrap_or_default()),
            ),
        }
    }

    fn base_attributes(&self) -> Vec<(String, String)> {
        let mut attrs = Vec::new();
        if let Some(class) = &self.config.class {
            attrs.push(("class".to_string(), class.clone()));
        }
        if self.config.required {
            attrs.push(("required".to_string(), "required".to_string()));
        }
        attrs.extend(self.config.attributes.iter().cloned());
        attrs
    }

    fn render_input(&self) -> String {
        let Some(input_type) = self.kind().input_type() else {
            return String::new();
        };

        let mut attrs = self.base_attributes();
        if self.kind() == FieldKind::Number {
            for (key, bound) in [
                ("min", &self.config.min),
                ("max", &self.config.max),
                ("step", &self.config.step),
            ] {
                if let Some(bound) = bound {
                    attrs.push((key.to_string(), bound.to_form_string()));
                }
            }
        }

        // password and file inputs never echo the current value into markup
        let value = match self.kind() {
            FieldKind::Password | FieldKind::File => String::new(),
            _ => self.value().to_form_string(),
        };

        format!(
            "<input type=\"{ty}\" id=\"{name}\" name=\"{name}\" value=\"{value}\"{attrs} />",
            ty = esc_attr(input_type),
            name = esc_attr(self.name()),
            value = esc_attr(&value),
            attrs = attrs_to_string(&attrs),
        )
    }

    fn render_checkbox(&self) -> String {
        let mut attrs = self.base_attributes();
        if self.value().as_str() == Some(CHECK_ON) {
            attrs.push(("checked".to_string(), "checked".to_string()));
        }

        format!(
            "<label for=\"{name}\"><input type=\"checkbox\" id=\"{name}\" name=\"{name}\" \
             value=\"1\"{attrs} /> {label}</label>",
            name = esc_attr(self.name()),
            attrs = attrs_to_string(&attrs),
            label = esc_html(self.label().unwrap_or_default()),
        )
    }

    fn render_radio(&self) -> String {
        let attrs = attrs_to_string(&self.base_attributes());
        let mut out = String::new();

        for (key, label) in &self.config.choices {
            let checked = if self.value().as_str() == Some(key.as_str()) {
                " checked=\"checked\""
            } else {
                ""
            };
            let _ = write!(
                out,
                "<label for=\"{name}[{key}]\"><input type=\"radio\" name=\"{name}\" \
                 id=\"{name}[{key}]\" value=\"{key}\"{attrs}{checked} /> {label}</label><br />",
                name = esc_attr(self.name()),
                key = esc_attr(key),
                label = esc_html(label),
            );
        }

        out
    }

    fn render_select(&self, multiple: bool) -> String {
        let mut attrs = self.base_attributes();
        let name_attr = if multiple {
            attrs.push(("multiple".to_string(), "multiple".to_string()));
            format!("{}[]", self.name())
        } else {
            self.name().to_string()
        };

        let mut out = format!(
            "<select id=\"{id}\" name=\"{name}\"{attrs}>",
            id = esc_attr(self.name()),
            name = esc_attr(&name_attr),
            attrs = attrs_to_string(&attrs),
        );

        for (key, label) in &self.config.choices {
            let selected = if self.is_selected(key) {
                " selected=\"selected\""
            } else {
                ""
            };
            let _ = write!(
                out,
                "<option value=\"{key}\"{selected}>{label}</option>",
                key = esc_attr(key),
                label = esc_html(label),
            );
        }

        out.push_str("</select>");
        out
    }

    fn is_selected(&self, key: &str) -> bool {
        match self.value() {
            Value::List(items) => items.iter().any(|item| item.as_str() == Some(key)),
            other => other.as_str() == Some(key),
        }
    }

    fn render_textarea(&self) -> String {
        format!(
            "<textarea id=\"{name}\" name=\"{name}\"{attrs}>{value}</textarea>",
            name = esc_attr(self.name()),
            attrs = attrs_to_string(&self.base_attributes()),
            value = esc_html(&self.value().to_form_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldConfig;

    #[test]
    fn test_text_input_echoes_value() {
        let mut field = Field::new("log", FieldConfig::text());
        field.set_value("alice");
        assert_eq!(
            field.render(),
            r#"<input type="text" id="log" name="log" value="alice" />"#
        );
    }

    #[test]
    fn test_password_never_echoed() {
        let mut field = Field::new("pwd", FieldConfig::password());
        field.set_value("secret123");
        let markup = field.render();
        assert!(markup.contains(r#"value="""#));
        assert!(!markup.contains("secret123"));
    }

    #[test]
    fn test_value_is_attribute_escaped() {
        let mut field = Field::new("q", FieldConfig::text());
        field.set_value(r#""><script>"#);
        let markup = field.render();
        assert!(!markup.contains("<script>"));
        assert!(markup.contains("&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn test_number_bounds_attributes() {
        let field = Field::new("age", FieldConfig::number().min(1).max(10).step(1));
        let markup = field.render();
        assert!(markup.contains(r#"min="1""#));
        assert!(markup.contains(r#"max="10""#));
        assert!(markup.contains(r#"step="1""#));
    }

    #[test]
    fn test_checkbox_inline_label_and_sentinel() {
        let mut field = Field::new("rememberme", FieldConfig::checkbox().label("Remember Me"));
        assert_eq!(field.render_label(), "");
        assert!(!field.render().contains("checked"));

        field.set_value(CHECK_ON);
        let markup = field.render();
        assert!(markup.contains(r#"checked="checked""#));
        assert!(markup.contains("Remember Me"));
    }

    #[test]
    fn test_radio_marks_current_choice() {
        let mut field = Field::new(
            "color",
            FieldConfig::radio().choice("red", "Red").choice("blue", "Blue"),
        );
        field.set_value("blue");
        let markup = field.render();
        assert_eq!(markup.matches("type=\"radio\"").count(), 2);
        assert_eq!(markup.matches("checked=\"checked\"").count(), 1);
        assert!(markup.contains(r#"value="blue" checked="checked""#));
    }

    #[test]
    fn test_select_options() {
        let mut field = Field::new(
            "plan",
            FieldConfig::select().choice("free", "Free").choice("pro", "Pro"),
        );
        field.set_value("pro");
        let markup = field.render();
        assert!(markup.starts_with(r#"<select id="plan" name="plan">"#));
        assert!(markup.contains(r#"<option value="pro" selected="selected">Pro</option>"#));
        assert!(markup.contains(r#"<option value="free">Free</option>"#));
    }

    #[test]
    fn test_multiple_select() {
        let mut field = Field::new(
            "tags",
            FieldConfig::new(FieldKind::Multiple)
                .choice("a", "A")
                .choice("b", "B")
                .choice("c", "C"),
        );
        field.set_value(vec!["a", "c"]);
        let markup = field.render();
        assert!(markup.contains(r#"name="tags[]""#));
        assert!(markup.contains(r#"multiple="multiple""#));
        assert_eq!(markup.matches("selected=\"selected\"").count(), 2);
    }

    #[test]
    fn test_textarea_escapes_content() {
        let mut field = Field::new("description", FieldConfig::textarea());
        field.set_value("<b>bold</b>");
        assert_eq!(
            field.render(),
            r#"<textarea id="description" name="description">&lt;b&gt;bold&lt;/b&gt;</textarea>"#
        );
    }

    #[test]
    fn test_dummy_renders_nothing() {
        let field = Field::new("x", FieldConfig::of_type("future-widget"));
        assert_eq!(field.render(), "");
        assert_eq!(field.render_label(), "");
    }
}
