//! Extraction boundary trait for web integration.

use serde_json::Value;

/// Builds a validator input tree from a framework-specific request.
///
/// The tree is a mapping with the five location keys (`params`, `query`,
/// `body`, `headers`, `cookies`) and, when known, `currentUser` and `ip`
/// for log attribution.
///
/// This trait intentionally does NOT validate or sanitize anything. It only
/// maps framework types to the tree the [`Validator`](crate::Validator)
/// reads.
///
/// # Examples
///
/// ```
/// use input_guard::web::ExtractInput;
/// use serde_json::{json, Value};
/// use std::collections::HashMap;
///
/// struct MyFrameworkRequest {
///     query: HashMap<String, String>,
///     body: Value,
/// }
///
/// impl ExtractInput for MyFrameworkRequest {
///     fn extract_input(&self) -> Value {
///         json!({ "query": self.query, "body": self.body })
///     }
/// }
///
/// let req = MyFrameworkRequest {
///     query: HashMap::from([("q".to_string(), "rust".to_string())]),
///     body: json!({"name": "Alice"}),
/// };
/// assert_eq!(req.extract_input()["query"]["q"], "rust");
/// ```
pub trait ExtractInput {
    /// Returns the input tree for this request.
    fn extract_input(&self) -> Value;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct TestRequest {
        id: String,
    }

    impl ExtractInput for TestRequest {
        fn extract_input(&self) -> Value {
            json!({ "params": { "id": self.id } })
        }
    }

    #[test]
    fn extract_input_trait_works() {
        let req = TestRequest {
            id: "test-1".to_string(),
        };

        assert_eq!(req.extract_input(), json!({"params": {"id": "test-1"}}));
    }
}
