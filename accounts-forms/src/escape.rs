//! Markup escaping utilities.

/// Escapes a string for use in HTML text content.
pub fn esc_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escapes a string for use in a double-quoted HTML attribute value.
pub fn esc_attr(s: &str) -> String {
    esc_html(s).replace('"', "&quot;").replace('\'', "&#039;")
}

/// Renders attribute pairs as ` key="value"` text, each pair preceded by a
/// single space so the result can be appended directly after other
/// attributes.
pub fn attrs_to_string(attrs: &[(String, String)]) -> String {
    attrs
        .iter()
        .map(|(key, value)| format!(" {}=\"{}\"", esc_attr(key), esc_attr(value)))
        .collect()
}
