//! Request adapter for mapping HTTP requests to validator input trees.

use serde_json::{Map, Value};

use crate::request::Principal;
use crate::Location;

use super::ExtractInput;

/// Adapter for converting framework-specific HTTP requests into an input tree.
///
/// `RequestAdapter` collects the untrusted parts of a request (route params,
/// query string, headers, cookies, body) together with the authenticated
/// principal and client address, and assembles them into the tree a
/// [`Validator`](crate::Validator) checks and cleans.
///
/// # Design Notes
///
/// This type holds simple, owned data so it is not coupled to any specific
/// framework's request types. Framework-specific code should implement
/// `From<FrameworkRequest>` for `RequestAdapter`.
///
/// # Examples
///
/// ```
/// use input_guard::web::{ExtractInput, RequestAdapter};
/// use input_guard::Principal;
/// use serde_json::json;
///
/// let mut adapter = RequestAdapter::new();
/// adapter.set_principal(Some(Principal {
///     id: "user-1".to_string(),
///     name: "Alice".to_string(),
/// }));
/// adapter.add_param("docId", "5e8703d290165868e8c2cd50");
/// adapter.set_body(json!({"role": {"$ne": "admin"}}));
///
/// let input = adapter.extract_input();
/// assert_eq!(input["params"]["docId"], "5e8703d290165868e8c2cd50");
/// assert_eq!(input["currentUser"]["uid"], "user-1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestAdapter {
    /// Authenticated principal (optional)
    principal: Option<Principal>,
    /// Client network address (optional)
    ip: Option<String>,
    /// Path parameters from routing
    params: Map<String, Value>,
    /// Query parameters from URL
    query: Map<String, Value>,
    /// Request headers
    headers: Map<String, Value>,
    /// Request cookies
    cookies: Map<String, Value>,
    /// Parsed body, if the request had one
    body: Option<Value>,
}

impl RequestAdapter {
    /// Creates an empty adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the authenticated principal for this request.
    ///
    /// This should be called after successful authentication, typically
    /// by framework-specific middleware.
    pub fn set_principal(&mut self, principal: Option<Principal>) {
        self.principal = principal;
    }

    /// Sets the client address used when no principal is known.
    pub fn set_ip(&mut self, ip: impl Into<String>) {
        self.ip = Some(ip.into());
    }

    /// Adds a route parameter.
    pub fn add_param(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.params.insert(key.into(), value.into());
    }

    /// Adds a query parameter.
    pub fn add_query_param(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.query.insert(key.into(), value.into());
    }

    /// Adds a header. Names are lowercased.
    pub fn add_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.headers
            .insert(key.into().to_ascii_lowercase(), Value::String(value.into()));
    }

    /// Adds a cookie.
    pub fn add_cookie(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.cookies
            .insert(key.into(), Value::String(value.into()));
    }

    /// Sets the parsed request body.
    pub fn set_body(&mut self, body: Value) {
        self.body = Some(body);
    }

    /// Returns a reference to the principal, if present.
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }
}

impl ExtractInput for RequestAdapter {
    fn extract_input(&self) -> Value {
        let mut root = Map::new();

        for location in Location::ALL {
            let section = match location {
                Location::Params => Value::Object(self.params.clone()),
                Location::Query => Value::Object(self.query.clone()),
                Location::Headers => Value::Object(self.headers.clone()),
                Location::Cookies => Value::Object(self.cookies.clone()),
                Location::Body => self
                    .body
                    .clone()
                    .unwrap_or_else(|| Value::Object(Map::new())),
            };
            root.insert(location.as_str().to_string(), section);
        }

        if let Some(principal) = &self.principal {
            root.insert("currentUser".to_string(), principal.to_value());
        }
        if let Some(ip) = &self.ip {
            root.insert("ip".to_string(), Value::String(ip.clone()));
        }

        Value::Object(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn adapter_builds_all_locations() {
        let adapter = RequestAdapter::new();

        let input = adapter.extract_input();

        for location in Location::ALL {
            assert_eq!(input[location.as_str()], json!({}), "{}", location);
        }
        assert!(input.get("currentUser").is_none());
        assert!(input.get("ip").is_none());
    }

    #[test]
    fn adapter_collects_parts() {
        let mut adapter = RequestAdapter::new();
        adapter.add_param("id", 7);
        adapter.add_query_param("search", "rust policy");
        adapter.add_header("X-Request-Id", "req-1");
        adapter.add_cookie("session", "abc");
        adapter.set_body(json!({"name": "Alice"}));
        adapter.set_ip("10.0.0.1");

        let input = adapter.extract_input();

        assert_eq!(input["params"], json!({"id": 7}));
        assert_eq!(input["query"], json!({"search": "rust policy"}));
        assert_eq!(input["headers"], json!({"x-request-id": "req-1"}));
        assert_eq!(input["cookies"], json!({"session": "abc"}));
        assert_eq!(input["body"], json!({"name": "Alice"}));
        assert_eq!(input["ip"], json!("10.0.0.1"));
    }

    #[test]
    fn adapter_sets_current_user() {
        let mut adapter = RequestAdapter::new();
        adapter.set_principal(Some(Principal {
            id: "user-alice".to_string(),
            name: "Alice".to_string(),
        }));

        let input = adapter.extract_input();

        assert_eq!(input["currentUser"]["uid"], json!("user-alice"));
        assert_eq!(adapter.principal().unwrap().name, "Alice");
    }

    #[test]
    fn adapter_keeps_non_object_body() {
        let mut adapter = RequestAdapter::new();
        adapter.set_body(json!("raw text"));

        assert_eq!(adapter.extract_input()["body"], json!("raw text"));
    }
}
