use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::coerce::coerce;
use crate::injection::INJECTION_RULE;
use crate::messages::{format_message, EMPTY_RULE};
use crate::registry::{Category, RuleOptions, RuleRegistry};
use crate::{Error, ErrorRecord, Location, ValidatorOptions};

/// Validates and sanitizes one request input tree.
///
/// A validator is built for a single request. It borrows the input tree,
/// never mutates it, and accumulates validation errors and sanitized copies
/// of `body`, `params` and `query` as it is used.
///
/// # Examples
///
/// ```
/// use input_guard::{Validator, ValidatorOptions};
/// use serde_json::json;
///
/// let input = json!({
///     "params": {"docId": "5e8703d290165868e8c2cd50xxx"},
///     "body": {"role": {"$eq": "admin"}},
/// });
///
/// let mut validator = Validator::new(&input, ValidatorOptions::default()).unwrap();
/// validator
///     .check_values("params", &json!({"docId": ["isExists", "isMongoId"]}))
///     .unwrap()
///     .clean_injections();
///
/// assert_eq!(
///     validator.first_error().unwrap().message,
///     "Bad request. Provided 'docId' is not a Mongo ID."
/// );
///
/// let safe = validator.safe_object();
/// assert!(safe.is_sanitized());
/// assert_eq!(safe.body, Some(json!({"role": {"eq": "admin"}})));
/// ```
#[derive(Debug)]
pub struct Validator<'a> {
    input: &'a Value,
    options: ValidatorOptions,
    registry: Arc<RuleRegistry>,
    errors: Vec<ErrorRecord>,
    safe: HashMap<Location, Value>,
}

impl<'a> Validator<'a> {
    /// Creates a validator using the shipped rule set.
    ///
    /// # Errors
    ///
    /// See [`Validator::with_registry`].
    pub fn new(input: &'a Value, options: ValidatorOptions) -> Result<Self, Error> {
        Self::with_registry(input, options, RuleRegistry::builtin()?)
    }

    /// Creates a validator sharing an already loaded registry.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] if `input` is not a mapping or has no keys
    /// - [`Error::InvalidLocationShape`] if `params`, `query` or `body` is
    ///   present and neither a mapping nor null
    /// - [`Error::MissingTemplate`] if a general rule (or `isEmpty`) has no
    ///   message template
    pub fn with_registry(
        input: &'a Value,
        options: ValidatorOptions,
        registry: Arc<RuleRegistry>,
    ) -> Result<Self, Error> {
        let root = match input {
            Value::Object(root) if !root.is_empty() => root,
            _ => return Err(Error::EmptyInput),
        };

        for location in [Location::Params, Location::Query, Location::Body] {
            match root.get(location.as_str()) {
                None | Some(Value::Null) | Some(Value::Object(_)) => {}
                Some(_) => {
                    return Err(Error::InvalidLocationShape {
                        location: location.to_string(),
                    })
                }
            }
        }

        let rules = registry.names(Category::General);
        if let Some(rule) = std::iter::once(EMPTY_RULE)
            .chain(rules)
            .find(|rule| options.template(rule).is_none())
        {
            return Err(Error::MissingTemplate {
                rule: rule.to_string(),
            });
        }

        Ok(Self {
            input,
            options,
            registry,
            errors: Vec::new(),
            safe: HashMap::new(),
        })
    }

    /// Runs field rules against one location and records failures.
    ///
    /// `field_rules` maps each field to a rule name or a list of rule names.
    /// A rule may carry an argument after the first `:` (`"hasLength:3"`).
    /// Unknown rule names are logged and skipped. An empty location records
    /// an `isEmpty` error before any field error.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidLocation`] for an unknown location name
    /// - [`Error::InvalidFields`] if `field_rules` is not a non-empty mapping
    ///
    /// The error list is left untouched in both cases.
    pub fn check_values(&mut self, location: &str, field_rules: &Value) -> Result<&mut Self, Error> {
        let location: Location = location.parse()?;

        let fields = match field_rules {
            Value::Object(fields) if !fields.is_empty() => fields,
            _ => {
                return Err(Error::InvalidFields {
                    location: location.to_string(),
                })
            }
        };

        let registry = Arc::clone(&self.registry);
        let input: &'a Value = self.input;
        let subtree = input.get(location.as_str()).unwrap_or(&Value::Null);

        match registry.general("isNotEmpty") {
            Some(is_not_empty) => {
                let passed = is_not_empty(
                    subtree,
                    &RuleOptions {
                        arg: None,
                        options: &self.options,
                    },
                );
                if !passed {
                    self.add_error(EMPTY_RULE, location.as_str(), None);
                }
            }
            None => tracing::warn!(
                location = %location,
                "validator 'isNotEmpty' does not exist, emptiness not checked"
            ),
        }

        for (field, spec) in fields {
            let names: Vec<&str> = match spec {
                Value::Null => continue,
                Value::String(name) => vec![name.as_str()],
                Value::Array(names) => names
                    .iter()
                    .filter_map(|name| {
                        let name = name.as_str();
                        if name.is_none() {
                            tracing::warn!(field = %field, "ignoring non-string rule name");
                        }
                        name
                    })
                    .collect(),
                _ => {
                    tracing::warn!(field = %field, "rule spec must be a name or a list of names");
                    continue;
                }
            };

            let value = subtree.get(field).unwrap_or(&Value::Null);

            for name in names {
                let (rule, arg) = match name.split_once(':') {
                    Some((rule, arg)) => (rule, coerce(arg)),
                    None => (name, None),
                };

                let Some(predicate) = registry.general(rule) else {
                    tracing::warn!(rule = %rule, "validator does not exist");
                    continue;
                };

                let passed = predicate(
                    value,
                    &RuleOptions {
                        arg: arg.as_ref(),
                        options: &self.options,
                    },
                );

                if !passed {
                    self.add_error(rule, field, Some(location));
                }
            }
        }

        Ok(self)
    }

    /// Cleans `body`, `params` and `query` and stores the safe copies.
    ///
    /// Each location present in the input is deep-copied and run through
    /// the `isInjected` custom rule. The original input is never modified.
    /// Does nothing if `isInjected` is not registered.
    pub fn clean_injections(&mut self) -> &mut Self {
        let registry = Arc::clone(&self.registry);
        let Some(is_injected) = registry.custom(INJECTION_RULE) else {
            return self;
        };

        let input: &'a Value = self.input;
        for location in Location::CLEANABLE {
            let Some(subtree) = input.get(location.as_str()) else {
                continue;
            };

            let result = is_injected(subtree.clone(), &self.options);

            if result.is_nosql_injected {
                tracing::warn!(
                    location = %location,
                    user = %self.user_token(),
                    "NoSQL injection detected"
                );
            }

            self.safe.insert(location, result.data);
        }

        self
    }

    /// Returns true if any rule has failed.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the first recorded error.
    pub fn first_error(&self) -> Option<&ErrorRecord> {
        self.errors.first()
    }

    /// Returns every recorded error in evaluation order.
    pub fn errors(&self) -> &[ErrorRecord] {
        &self.errors
    }

    /// Returns the sanitized `body`, `params` and `query`.
    ///
    /// If [`clean_injections`](Self::clean_injections) produced nothing, or
    /// produced a null location, the ORIGINAL unsanitized locations are
    /// returned instead, a warning is logged and
    /// [`SafeObject::is_sanitized`] is false. Check it before trusting the
    /// data.
    pub fn safe_object(&self) -> SafeObject {
        if self.safe.is_empty() || self.safe.values().any(Value::is_null) {
            tracing::warn!("cannot load safe object, using original one");

            let original = |location: Location| self.input.get(location.as_str()).cloned();
            return SafeObject {
                body: original(Location::Body),
                params: original(Location::Params),
                query: original(Location::Query),
                sanitized: false,
            };
        }

        SafeObject {
            body: self.safe.get(&Location::Body).cloned(),
            params: self.safe.get(&Location::Params).cloned(),
            query: self.safe.get(&Location::Query).cloned(),
            sanitized: true,
        }
    }

    /// Returns the untouched input tree.
    pub fn input(&self) -> &'a Value {
        self.input
    }

    /// Returns the options rules run with.
    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Identifies the requester in logs: authenticated uid, else client ip.
    fn user_token(&self) -> String {
        let token = self
            .input
            .get("currentUser")
            .and_then(|user| user.get("uid"))
            .filter(|uid| !uid.is_null())
            .or_else(|| self.input.get("ip").filter(|ip| !ip.is_null()));

        match token {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "unknown".to_string(),
        }
    }

    fn add_error(&mut self, rule: &str, field: &str, location: Option<Location>) {
        let location = location.map(|l| l.as_str());
        // templates for every general rule are checked in `with_registry`
        let template = self.options.template(rule);
        debug_assert!(template.is_some(), "no template for rule '{}'", rule);
        let message = format_message(template.unwrap_or(rule), field, location);

        self.errors.push(ErrorRecord::new(message));
    }
}

/// The `body`, `params` and `query` of a request, cleaned when possible.
#[derive(Debug, Clone, PartialEq)]
pub struct SafeObject {
    /// Request body
    pub body: Option<Value>,
    /// Route parameters
    pub params: Option<Value>,
    /// Query parameters
    pub query: Option<Value>,
    sanitized: bool,
}

impl SafeObject {
    /// Returns false when this holds the original, unsanitized input.
    pub fn is_sanitized(&self) -> bool {
        self.sanitized
    }
}
