//! Coercion of rule arguments from their string form.

use serde_json::{Number, Value};

/// Converts a `name:argument` rule argument into a typed value.
///
/// - numeric-looking strings become numbers
/// - `"true"` / `"false"` become booleans
/// - `"null"` becomes [`Value::Null`]
/// - `"undefined"` becomes `None` (no argument)
/// - anything else stays a string
///
/// # Examples
///
/// ```
/// use input_guard::coerce;
/// use serde_json::json;
///
/// assert_eq!(coerce("24"), Some(json!(24)));
/// assert_eq!(coerce("true"), Some(json!(true)));
/// assert_eq!(coerce("null"), Some(json!(null)));
/// assert_eq!(coerce("undefined"), None);
/// assert_eq!(coerce("abc"), Some(json!("abc")));
/// ```
pub fn coerce(raw: &str) -> Option<Value> {
    match raw {
        "true" => return Some(Value::Bool(true)),
        "false" => return Some(Value::Bool(false)),
        "null" => return Some(Value::Null),
        "undefined" => return None,
        _ => {}
    }

    Some(parse_number(raw).map_or_else(|| Value::String(raw.to_string()), Value::Number))
}

fn parse_number(raw: &str) -> Option<Number> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(Number::from(n));
    }

    // `parse::<f64>` accepts "inf" and "NaN"; those stay strings
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .and_then(Number::from_f64)
}

/// Compares two values, treating numbers by numeric value (`1 == 1.0`).
pub(crate) fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers_and_floats_become_numbers() {
        assert_eq!(coerce("24"), Some(json!(24)));
        assert_eq!(coerce("-3"), Some(json!(-3)));
        assert_eq!(coerce("2.5"), Some(json!(2.5)));
    }

    #[test]
    fn keywords_are_recognized() {
        assert_eq!(coerce("true"), Some(json!(true)));
        assert_eq!(coerce("false"), Some(json!(false)));
        assert_eq!(coerce("null"), Some(Value::Null));
        assert_eq!(coerce("undefined"), None);
    }

    #[test]
    fn other_strings_are_unchanged() {
        assert_eq!(coerce("abc"), Some(json!("abc")));
        assert_eq!(coerce(""), Some(json!("")));
        assert_eq!(coerce("NaN"), Some(json!("NaN")));
        assert_eq!(coerce("inf"), Some(json!("inf")));
    }

    #[test]
    fn loose_eq_ignores_integer_float_distinction() {
        assert!(loose_eq(&json!(2), &json!(2.0)));
        assert!(!loose_eq(&json!(2), &json!("2")));
        assert!(loose_eq(&json!("a"), &json!("a")));
    }
}
