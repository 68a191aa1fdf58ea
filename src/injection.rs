//! Recursive removal of NoSQL operator keys and script content.
//!
//! The traversal walks a tree, renames query-operator keys (`$gt` -> `gt`)
//! so the tree can no longer be read as a query filter, and passes string
//! leaves through an [`Escaper`]. Depth is tracked per branch and bounded by
//! [`ValidatorOptions::deep_level`] so adversarial nesting cannot exhaust the
//! stack.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::escape::Escaper;
use crate::ValidatorOptions;

/// Name the traversal is registered under in the custom category.
pub const INJECTION_RULE: &str = "isInjected";

/// Keys that turn a document into a query when it is used as a filter.
pub const FORBIDDEN_KEYS: [&str; 9] = [
    "$eq", "$ne", "$ni", "$gt", "$gte", "$lt", "$lte", "$regex", "$where",
];

/// Outcome of cleaning one subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizeResult {
    /// The cleaned subtree
    pub data: Value,
    /// True if a forbidden key was found anywhere in the subtree
    pub is_nosql_injected: bool,
}

/// Depth accounting threaded through the traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthTracker {
    /// Deepest level reached by any branch so far
    pub max_deep_level: usize,
    /// Level of the branch currently walked
    pub curr_deep_level: usize,
}

impl Default for DepthTracker {
    fn default() -> Self {
        Self {
            max_deep_level: 1,
            curr_deep_level: 1,
        }
    }
}

/// Returns true if `key` is one of [`FORBIDDEN_KEYS`].
pub fn is_forbidden_key(key: &str) -> bool {
    FORBIDDEN_KEYS.contains(&key)
}

/// Removes the first character that is not an ASCII letter or digit.
///
/// ```
/// use input_guard::injection::strip_first_symbol;
///
/// assert_eq!(strip_first_symbol("$eq"), "eq");
/// assert_eq!(strip_first_symbol("a$b$c"), "ab$c");
/// assert_eq!(strip_first_symbol("plain"), "plain");
/// ```
pub fn strip_first_symbol(key: &str) -> String {
    match key.char_indices().find(|(_, c)| !c.is_ascii_alphanumeric()) {
        Some((idx, c)) => {
            let mut stripped = String::with_capacity(key.len());
            stripped.push_str(&key[..idx]);
            stripped.push_str(&key[idx + c.len_utf8()..]);
            stripped
        }
        None => key.to_string(),
    }
}

/// Cleans `value` and reports whether operator keys were found.
///
/// # Examples
///
/// ```
/// use input_guard::{lookup_injection, HtmlEscaper, ValidatorOptions};
/// use serde_json::json;
///
/// let result = lookup_injection(
///     json!({"role": {"$eq": {"$ne": "<b>x</b>"}}}),
///     &ValidatorOptions::default(),
///     &HtmlEscaper,
/// );
///
/// assert!(result.is_nosql_injected);
/// assert_eq!(result.data, json!({"role": {"eq": {"ne": "&lt;b&gt;x&lt;/b&gt;"}}}));
/// ```
pub fn lookup_injection<E>(value: Value, options: &ValidatorOptions, escaper: &E) -> SanitizeResult
where
    E: Escaper + ?Sized,
{
    let mut data = value;
    let mut traversal = Traversal {
        deep_level: options.deep_level(),
        escaper,
        depth: DepthTracker::default(),
        is_nosql_injected: false,
    };

    traversal.visit_node(&mut data);

    SanitizeResult {
        data,
        is_nosql_injected: traversal.is_nosql_injected,
    }
}

struct Traversal<'e, E: ?Sized> {
    deep_level: usize,
    escaper: &'e E,
    depth: DepthTracker,
    is_nosql_injected: bool,
}

impl<E: Escaper + ?Sized> Traversal<'_, E> {
    fn visit_node(&mut self, node: &mut Value) {
        self.depth.max_deep_level = self.depth.max_deep_level.max(self.depth.curr_deep_level);

        if self.depth.curr_deep_level >= self.deep_level {
            tracing::warn!(
                deep_level = self.deep_level,
                "maximum traversal depth reached, branch left as is"
            );
            return;
        }

        match node {
            Value::Object(map) => self.visit_object(map),
            Value::Array(items) => {
                for item in items {
                    self.visit_slot(item);
                }
            }
            _ => {}
        }
    }

    fn visit_object(&mut self, map: &mut Map<String, Value>) {
        let keys: Vec<String> = map.keys().cloned().collect();
        let mut visited: HashSet<String> = HashSet::with_capacity(keys.len());

        for key in keys {
            if visited.contains(&key) {
                continue;
            }

            let key = if is_forbidden_key(&key) {
                self.is_nosql_injected = true;

                let Some(value) = map.shift_remove(&key) else {
                    continue;
                };
                // an existing sibling with the stripped name is overwritten
                let renamed = strip_first_symbol(&key);
                map.insert(renamed.clone(), value);
                renamed
            } else {
                key
            };

            if let Some(slot) = map.get_mut(&key) {
                self.visit_slot(slot);
            }
            visited.insert(key);
        }
    }

    fn visit_slot(&mut self, slot: &mut Value) {
        match slot {
            Value::Object(_) | Value::Array(_) => self.descend(slot),
            Value::String(s) => *s = self.escaper.escape(s),
            _ => {}
        }
    }

    // siblings start at the parent's level
    fn descend(&mut self, child: &mut Value) {
        let level = self.depth.curr_deep_level;
        self.depth.curr_deep_level = level + 1;
        self.visit_node(child);
        self.depth.curr_deep_level = level;
    }
}
