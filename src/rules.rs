//! The shipped rule set.
//!
//! To add a rule, load it here under a new name with [`Rule::general`] and
//! give it a message template in [`crate::messages`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::coerce::loose_eq;
use crate::escape::HtmlEscaper;
use crate::injection::lookup_injection;
use crate::registry::{Rule, RuleLoader, RuleOptions};
use crate::Error;

static MONGO_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9a-fA-F]{24}$").unwrap());

static FIREBASE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]{28,32}$").unwrap());

static UUID_V1: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[0-9A-F]{8}-[0-9A-F]{4}-1[0-9A-F]{3}-[89AB][0-9A-F]{3}-[0-9A-F]{12}$").unwrap()
});

static UUID_V4: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[0-9A-F]{8}-[0-9A-F]{4}-4[0-9A-F]{3}-[89AB][0-9A-F]{3}-[0-9A-F]{12}$").unwrap()
});

/// Registers every shipped rule through `loader`.
///
/// # Errors
///
/// Returns [`Error::DuplicateRule`] if a name is registered twice.
pub fn register_builtin(loader: &mut RuleLoader) -> Result<(), Error> {
    loader.load("isNotEmpty", Rule::general(|v, _| is_not_empty(v)))?;
    loader.load("isExists", Rule::general(|v, _| !v.is_null()))?;
    loader.load("isString", Rule::general(|v, _| v.is_string()))?;
    loader.load("isNumber", Rule::general(|v, _| v.is_number()))?;
    loader.load("isBoolean", Rule::general(|v, _| v.is_boolean()))?;
    loader.load("isObject", Rule::general(|v, _| v.is_object() || v.is_array()))?;
    loader.load("isArray", Rule::general(|v, _| v.is_array()))?;
    loader.load("isMongoId", Rule::general(|v, _| matches_str(&MONGO_ID, v)))?;
    loader.load("isFirebaseId", Rule::general(|v, _| matches_str(&FIREBASE_ID, v)))?;
    loader.load("isUUIDv1", Rule::general(|v, _| matches_str(&UUID_V1, v)))?;
    loader.load("isUUIDv4", Rule::general(|v, _| matches_str(&UUID_V4, v)))?;
    loader.load("hasLength", Rule::general(has_length))?;
    loader.load("hasArrayItem", Rule::general(has_array_item))?;
    loader.load("hasObjectKey", Rule::general(has_object_key))?;

    loader.load(
        "isInjected",
        Rule::custom(|value, options| lookup_injection(value, options, &HtmlEscaper)),
    )?;

    Ok(())
}

/// False for null, empty containers and blank strings.
fn is_not_empty(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

fn matches_str(re: &Regex, value: &Value) -> bool {
    value.as_str().is_some_and(|s| re.is_match(s))
}

/// Character count for strings, element count for containers, 0 otherwise.
fn size(value: &Value) -> usize {
    match value {
        Value::String(s) => s.chars().count(),
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        _ => 0,
    }
}

fn has_length(value: &Value, opts: &RuleOptions<'_>) -> bool {
    let Some(expected) = opts.arg.and_then(Value::as_f64) else {
        return false;
    };

    size(value) as f64 == expected
}

fn has_array_item(value: &Value, opts: &RuleOptions<'_>) -> bool {
    let (Value::Array(items), Some(wanted)) = (value, opts.arg) else {
        return false;
    };

    items.iter().any(|item| loose_eq(item, wanted))
}

fn has_object_key(value: &Value, opts: &RuleOptions<'_>) -> bool {
    // keys are always strings, so only a string argument can match
    match (value, opts.arg) {
        (Value::Object(map), Some(Value::String(key))) => map.contains_key(key),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RuleRegistry, ValidatorOptions};
    use serde_json::json;

    fn check(rule: &str, value: Value, arg: Option<Value>) -> bool {
        let registry = RuleRegistry::builtin().unwrap();
        let options = ValidatorOptions::default();
        let predicate = registry.general(rule).unwrap();

        predicate(
            &value,
            &RuleOptions {
                arg: arg.as_ref(),
                options: &options,
            },
        )
    }

    #[test]
    fn is_not_empty_rejects_blank_values() {
        assert!(!check("isNotEmpty", Value::Null, None));
        assert!(!check("isNotEmpty", json!(""), None));
        assert!(!check("isNotEmpty", json!("   \t"), None));
        assert!(!check("isNotEmpty", json!({}), None));
        assert!(!check("isNotEmpty", json!([]), None));

        assert!(check("isNotEmpty", json!("a"), None));
        assert!(check("isNotEmpty", json!(0), None));
        assert!(check("isNotEmpty", json!(false), None));
        assert!(check("isNotEmpty", json!({"a": 1}), None));
    }

    #[test]
    fn is_exists_only_rejects_null() {
        assert!(!check("isExists", Value::Null, None));
        assert!(check("isExists", json!(""), None));
        assert!(check("isExists", json!(0), None));
    }

    #[test]
    fn type_predicates() {
        assert!(check("isString", json!("x"), None));
        assert!(!check("isString", json!(1), None));
        assert!(check("isNumber", json!(1.5), None));
        assert!(!check("isNumber", json!("1"), None));
        assert!(check("isBoolean", json!(true), None));
        assert!(!check("isBoolean", json!("true"), None));
        assert!(check("isObject", json!({"token": "yMl.123"}), None));
        assert!(check("isObject", json!([1]), None));
        assert!(!check("isObject", json!("{}"), None));
        assert!(check("isArray", json!([1, 2, 3]), None));
        assert!(!check("isArray", json!({"0": 1}), None));
    }

    #[test]
    fn mongo_id_shape() {
        assert!(check("isMongoId", json!("5e8703d290165868e8c2cd50"), None));
        assert!(!check("isMongoId", json!("5e8703d290165868e8c2cd50xxx"), None));
        assert!(!check("isMongoId", json!(12345), None));
    }

    #[test]
    fn firebase_id_shape() {
        assert!(check("isFirebaseId", json!("A1pE4Up36ORa3QcWBMxrrnKjIK72"), None));
        assert!(!check("isFirebaseId", json!("JUA84jfA73Dp"), None));
        assert!(!check("isFirebaseId", json!("A1pE4Up36ORa3QcWBMxrrnKjIK7|"), None));
        assert!(!check("isFirebaseId", json!("A1pE4Up36ORa3QcWBMxrrnKjIK7?"), None));
    }

    #[test]
    fn uuid_versions() {
        let v1 = json!("307d2376-91f9-11ea-bb37-0242ac130002");
        let v4 = json!("3d1e0dc9-3c5a-43fa-a3ea-5e758e92c6fe");

        assert!(check("isUUIDv1", v1.clone(), None));
        assert!(!check("isUUIDv4", v1, None));
        assert!(check("isUUIDv4", v4.clone(), None));
        assert!(!check("isUUIDv1", v4, None));
        assert!(check(
            "isUUIDv4",
            json!("3D1E0DC9-3C5A-43FA-A3EA-5E758E92C6FE"),
            None
        ));
    }

    #[test]
    fn has_length_counts_elements_and_chars() {
        assert!(check("hasLength", json!([1, 2, 3]), Some(json!(3))));
        assert!(!check("hasLength", json!([1, 2]), Some(json!(3))));
        assert!(check("hasLength", json!("héllo"), Some(json!(5))));
        assert!(check("hasLength", json!({"a": 1}), Some(json!(1))));
    }

    #[test]
    fn has_length_needs_numeric_argument() {
        assert!(!check("hasLength", json!([1, 2, 3]), None));
        assert!(!check("hasLength", json!([1, 2, 3]), Some(json!("three"))));
    }

    #[test]
    fn has_array_item() {
        assert!(check("hasArrayItem", json!([1, 2, 3]), Some(json!(2))));
        assert!(check("hasArrayItem", json!([1.0, 2.0]), Some(json!(2))));
        assert!(!check("hasArrayItem", json!([1, 2, 3]), Some(json!("2"))));
        assert!(!check("hasArrayItem", json!({"a": 2}), Some(json!(2))));
        assert!(!check("hasArrayItem", json!([null]), None));
    }

    #[test]
    fn has_object_key() {
        let value = json!({"token": "yMl.123"});

        assert!(check("hasObjectKey", value.clone(), Some(json!("token"))));
        assert!(!check("hasObjectKey", value.clone(), Some(json!("other"))));
        assert!(!check("hasObjectKey", value, None));
        assert!(!check("hasObjectKey", json!(["token"]), Some(json!("token"))));
    }
}
