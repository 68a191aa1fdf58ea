//! Two-tier rule registry: category -> rule name -> rule.
//!
//! A registry is populated once through a registration callback and is
//! immutable afterwards. It is `Send + Sync` and meant to be shared behind an
//! [`Arc`] by every validator built from it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::injection::SanitizeResult;
use crate::{Error, ValidatorOptions};

/// Signature of a general rule: a pure predicate over one value.
pub type GeneralFn = dyn Fn(&Value, &RuleOptions<'_>) -> bool + Send + Sync;

/// Signature of a custom rule: transforms a subtree and reports findings.
pub type CustomFn = dyn Fn(Value, &ValidatorOptions) -> SanitizeResult + Send + Sync;

/// The category a rule is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Pass/fail predicates used by `check_values`
    General,
    /// Transforming rules used by `clean_injections`
    Custom,
}

impl Category {
    /// Returns the lowercase category name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Custom => "custom",
        }
    }

    /// Parses a category name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "general" => Some(Category::General),
            "custom" => Some(Category::Custom),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options handed to a general rule on each call.
#[derive(Debug, Clone, Copy)]
pub struct RuleOptions<'a> {
    /// Coerced argument from a `name:argument` rule string
    pub arg: Option<&'a Value>,
    /// Options of the validator running the rule
    pub options: &'a ValidatorOptions,
}

/// A registered rule. The variant decides its category.
#[derive(Clone)]
pub enum Rule {
    /// A predicate; `false` records a validation error
    General(Arc<GeneralFn>),
    /// A subtree transformation
    Custom(Arc<CustomFn>),
}

impl Rule {
    /// Wraps a predicate as a general rule.
    pub fn general<F>(f: F) -> Self
    where
        F: Fn(&Value, &RuleOptions<'_>) -> bool + Send + Sync + 'static,
    {
        Rule::General(Arc::new(f))
    }

    /// Wraps a transformation as a custom rule.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(Value, &ValidatorOptions) -> SanitizeResult + Send + Sync + 'static,
    {
        Rule::Custom(Arc::new(f))
    }

    /// Returns the category this rule belongs to.
    pub fn category(&self) -> Category {
        match self {
            Rule::General(_) => Category::General,
            Rule::Custom(_) => Category::Custom,
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule::{:?}", self.category())
    }
}

/// Registration callback handed to a registration routine.
///
/// # Examples
///
/// ```
/// use input_guard::{Rule, RuleRegistry};
///
/// let registry = RuleRegistry::load(|loader| {
///     loader.load("isPositive", Rule::general(|v, _| v.as_f64().is_some_and(|n| n > 0.0)))?;
///     Ok(())
/// })
/// .unwrap();
///
/// assert!(registry.general("isPositive").is_some());
/// ```
#[derive(Debug, Default)]
pub struct RuleLoader {
    rules: HashMap<Category, HashMap<String, Rule>>,
}

impl RuleLoader {
    /// Registers `rule` under `name` in the rule's category.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateRule`] if the name is already taken in that
    /// category. The first registration is kept.
    pub fn load(&mut self, name: impl Into<String>, rule: Rule) -> Result<(), Error> {
        let name = name.into();
        let category = rule.category();
        let rules = self.rules.entry(category).or_default();

        if rules.contains_key(&name) {
            return Err(Error::DuplicateRule { category, name });
        }

        tracing::debug!(rule = %name, category = %category, "registered validator");
        rules.insert(name, rule);
        Ok(())
    }
}

/// Immutable mapping of category -> name -> rule.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: HashMap<Category, HashMap<String, Rule>>,
}

impl RuleRegistry {
    /// Builds a registry by running a registration routine against a fresh
    /// [`RuleLoader`].
    ///
    /// # Errors
    ///
    /// Propagates any error from the routine, including duplicate names.
    pub fn load<F>(register: F) -> Result<Self, Error>
    where
        F: FnOnce(&mut RuleLoader) -> Result<(), Error>,
    {
        let mut loader = RuleLoader::default();
        register(&mut loader)?;

        Ok(Self {
            rules: loader.rules,
        })
    }

    /// Builds a shareable registry holding the shipped rule set.
    pub fn builtin() -> Result<Arc<Self>, Error> {
        Self::load(crate::rules::register_builtin).map(Arc::new)
    }

    /// Looks up a rule. Returns `None` when either level is missing.
    pub fn get(&self, category: Category, name: &str) -> Option<&Rule> {
        self.rules.get(&category)?.get(name)
    }

    /// Looks up a rule by category name. Unknown categories are not found.
    pub fn lookup(&self, category: &str, name: &str) -> Option<&Rule> {
        self.get(Category::parse(category)?, name)
    }

    /// Looks up a general rule's predicate.
    pub fn general(&self, name: &str) -> Option<&GeneralFn> {
        match self.get(Category::General, name)? {
            Rule::General(f) => Some(f.as_ref()),
            Rule::Custom(_) => None,
        }
    }

    /// Looks up a custom rule's transformation.
    pub fn custom(&self, name: &str) -> Option<&CustomFn> {
        match self.get(Category::Custom, name)? {
            Rule::Custom(f) => Some(f.as_ref()),
            Rule::General(_) => None,
        }
    }

    /// Returns the names registered in `category`, sorted.
    pub fn names(&self, category: Category) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .rules
            .get(&category)
            .map(|rules| rules.keys().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn always(_: &Value, _: &RuleOptions<'_>) -> bool {
        true
    }

    #[test]
    fn duplicate_in_same_category_fails() {
        let result = RuleRegistry::load(|loader| {
            loader.load("isThing", Rule::general(always))?;
            loader.load("isThing", Rule::general(always))
        });

        assert_eq!(
            result.unwrap_err(),
            Error::DuplicateRule {
                category: Category::General,
                name: "isThing".to_string(),
            }
        );
    }

    #[test]
    fn same_name_in_different_categories_is_allowed() {
        let registry = RuleRegistry::load(|loader| {
            loader.load("isThing", Rule::general(always))?;
            loader.load(
                "isThing",
                Rule::custom(|data, _| SanitizeResult {
                    data,
                    is_nosql_injected: false,
                }),
            )
        })
        .unwrap();

        assert!(registry.general("isThing").is_some());
        assert!(registry.custom("isThing").is_some());
    }

    #[test]
    fn unknown_category_or_name_is_not_found() {
        let registry = RuleRegistry::load(|loader| loader.load("isThing", Rule::general(always)))
            .unwrap();

        assert!(registry.lookup("general", "isThing").is_some());
        assert!(registry.lookup("sanitizers", "isThing").is_none());
        assert!(registry.lookup("general", "isOther").is_none());
        assert!(registry.custom("isThing").is_none());
    }

    #[test]
    fn general_rule_is_callable() {
        let registry = RuleRegistry::load(|loader| {
            loader.load("isTrue", Rule::general(|v, _| v == &json!(true)))
        })
        .unwrap();
        let options = ValidatorOptions::default();
        let rule = registry.general("isTrue").unwrap();

        let opts = RuleOptions {
            arg: None,
            options: &options,
        };
        assert!(rule(&json!(true), &opts));
        assert!(!rule(&json!(false), &opts));
    }

    #[test]
    fn builtin_registry_has_shipped_rules() {
        let registry = RuleRegistry::builtin().unwrap();

        assert_eq!(registry.names(Category::General).len(), 14);
        assert_eq!(registry.names(Category::Custom), vec!["isInjected"]);
    }

    #[test]
    fn registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuleRegistry>();
    }
}
