//! Message templates for failed rules.
//!
//! Templates use two positional placeholders: `%1$` is replaced with the
//! field name and `%2$` with the location name. `%2$` is only substituted
//! when the template contains it.

use std::collections::HashMap;

/// Rule name used for the whole-location emptiness check.
pub const EMPTY_RULE: &str = "isEmpty";

const FIELD_PLACEHOLDER: &str = "%1$";
const LOCATION_PLACEHOLDER: &str = "%2$";

/// Built-in templates, one per shipped general rule plus `isEmpty`.
const DEFAULT_TEMPLATES: &[(&str, &str)] = &[
    ("isEmpty", "Bad request. Empty '%1$' provided."),
    ("isNotEmpty", "Bad request. Empty '%1$' provided."),
    ("isExists", "Bad request. Required '%1$' is missing in %2$."),
    ("isString", "Bad request. Provided '%1$' is not a string."),
    ("isNumber", "Bad request. Provided '%1$' is not a number."),
    ("isBoolean", "Bad request. Provided '%1$' is not a boolean."),
    ("isObject", "Bad request. Provided '%1$' is not an object."),
    ("isArray", "Bad request. Provided '%1$' is not an array."),
    ("isMongoId", "Bad request. Provided '%1$' is not a Mongo ID."),
    ("isFirebaseId", "Bad request. Provided '%1$' is not a Firebase ID."),
    ("isUUIDv1", "Bad request. Provided '%1$' is not a UUID Version 1."),
    ("isUUIDv4", "Bad request. Provided '%1$' is not a UUID Version 4."),
    ("hasLength", "Bad request. Provided '%1$' has incorrect length."),
    ("hasArrayItem", "Bad request. Provided '%1$' does not contain the required item."),
    ("hasObjectKey", "Bad request. Provided '%1$' does not contain the required key."),
];

/// Returns the built-in templates keyed by rule name.
pub fn default_templates() -> HashMap<String, String> {
    DEFAULT_TEMPLATES
        .iter()
        .map(|(rule, template)| (rule.to_string(), template.to_string()))
        .collect()
}

/// Merges caller templates over `defaults`. Caller entries win.
pub fn merge_templates(
    mut defaults: HashMap<String, String>,
    overrides: impl IntoIterator<Item = (String, String)>,
) -> HashMap<String, String> {
    defaults.extend(overrides);
    defaults
}

/// Renders a template for a failed rule.
///
/// # Examples
///
/// ```
/// use input_guard::messages::format_message;
///
/// let msg = format_message("Bad request. '%1$' missing in %2$.", "id", Some("params"));
/// assert_eq!(msg, "Bad request. 'id' missing in params.");
/// ```
pub fn format_message(template: &str, field: &str, location: Option<&str>) -> String {
    let message = template.replacen(FIELD_PLACEHOLDER, field, 1);

    match location {
        Some(location) if template.contains(LOCATION_PLACEHOLDER) => {
            message.replacen(LOCATION_PLACEHOLDER, location, 1)
        }
        _ => message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbatim_defaults() {
        let templates = default_templates();

        assert_eq!(templates["isEmpty"], "Bad request. Empty '%1$' provided.");
        assert_eq!(
            templates["isMongoId"],
            "Bad request. Provided '%1$' is not a Mongo ID."
        );
        assert_eq!(
            templates["isFirebaseId"],
            "Bad request. Provided '%1$' is not a Firebase ID."
        );
        assert_eq!(
            templates["isUUIDv4"],
            "Bad request. Provided '%1$' is not a UUID Version 4."
        );
    }

    #[test]
    fn caller_templates_win() {
        let merged = merge_templates(
            default_templates(),
            [("isMongoId".to_string(), "bad id %1$".to_string())],
        );

        assert_eq!(merged["isMongoId"], "bad id %1$");
        assert_eq!(merged["isEmpty"], "Bad request. Empty '%1$' provided.");
    }

    #[test]
    fn location_substituted_only_when_placeholder_present() {
        assert_eq!(
            format_message("Empty '%1$'.", "title", Some("query")),
            "Empty 'title'."
        );
        assert_eq!(
            format_message("'%1$' in %2$", "title", Some("query")),
            "'title' in query"
        );
        assert_eq!(format_message("'%1$' in %2$", "title", None), "'title' in %2$");
    }

    #[test]
    fn only_first_placeholder_replaced() {
        assert_eq!(format_message("%1$ %1$", "a", None), "a %1$");
    }
}
