use std::collections::HashMap;

use crate::messages::{default_templates, merge_templates};

/// Traversal ceiling used when none is configured.
pub const DEFAULT_DEEP_LEVEL: usize = 100;

/// Options shared by every rule run through a validator.
///
/// Built with a builder so callers only state what differs from the
/// defaults. Caller templates are merged over the built-in ones.
///
/// # Examples
///
/// ```
/// use input_guard::ValidatorOptions;
///
/// let options = ValidatorOptions::new()
///     .with_deep_level(10)
///     .with_template("isMongoId", "Invalid id '%1$'.");
///
/// assert_eq!(options.deep_level(), 10);
/// assert_eq!(options.template("isMongoId"), Some("Invalid id '%1$'."));
/// assert!(options.template("isEmpty").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorOptions {
    deep_level: usize,
    templates: HashMap<String, String>,
}

impl ValidatorOptions {
    /// Creates options with the default ceiling and templates.
    pub fn new() -> Self {
        Self {
            deep_level: DEFAULT_DEEP_LEVEL,
            templates: default_templates(),
        }
    }

    /// Sets the maximum traversal depth for injection cleaning.
    pub fn with_deep_level(mut self, deep_level: usize) -> Self {
        self.deep_level = deep_level;
        self
    }

    /// Overrides or adds the message template for one rule.
    pub fn with_template(mut self, rule: impl Into<String>, template: impl Into<String>) -> Self {
        self.templates.insert(rule.into(), template.into());
        self
    }

    /// Merges several templates over the current ones.
    pub fn with_templates<I, K, V>(mut self, templates: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.templates = merge_templates(
            self.templates,
            templates.into_iter().map(|(k, v)| (k.into(), v.into())),
        );
        self
    }

    /// Returns the traversal ceiling.
    pub fn deep_level(&self) -> usize {
        self.deep_level
    }

    /// Returns the template for `rule`, if any.
    pub fn template(&self, rule: &str) -> Option<&str> {
        self.templates.get(rule).map(String::as_str)
    }
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self::new()
    }
}
