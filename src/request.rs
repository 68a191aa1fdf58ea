use serde_json::{json, Value};

/// An authenticated user or service making the request.
///
/// Carried into the input tree as `currentUser` so injection warnings can
/// name who sent the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Unique identifier, reported as `currentUser.uid`
    pub id: String,
    /// Display name
    pub name: String,
}

impl Principal {
    /// Returns the `currentUser` entry for an input tree.
    pub fn to_value(&self) -> Value {
        json!({ "uid": self.id, "name": self.name })
    }
}
