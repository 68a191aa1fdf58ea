//! Validation and sanitization of untrusted request input.
//!
//! This crate guards the nested input a web request carries (route params,
//! query string, body, headers, cookies) before application code touches it:
//! - **Rule checking**: named, composable rules run against declared fields,
//!   collecting human-readable errors instead of failing on the first one
//! - **Injection cleaning**: a depth-bounded walk renames NoSQL query operator
//!   keys (`$gt` -> `gt`) and escapes markup in string leaves, on a copy of
//!   the input
//!
//! # Core Types
//!
//! - [`Validator`]: Per-request engine running rules and cleaning input
//! - [`RuleRegistry`]: Immutable, shareable mapping of rule names to rules
//! - [`ValidatorOptions`]: Depth ceiling and message templates
//! - [`SafeObject`]: Cleaned `body`, `params` and `query`
//! - [`Escaper`]: String escaping used on every string leaf
//!
//! # Examples
//!
//! ```
//! use input_guard::{Validator, ValidatorOptions};
//! use serde_json::json;
//!
//! let input = json!({
//!     "params": {"wrongDocId": "5e8703d290165868e8c2cd50xxx"},
//!     "body": {"role": {"$eq": {"$ne": "x"}}},
//! });
//!
//! let mut validator = Validator::new(&input, ValidatorOptions::default())?;
//! validator
//!     .check_values("params", &json!({"wrongDocId": "isMongoId"}))?
//!     .clean_injections();
//!
//! assert!(validator.has_errors());
//! assert_eq!(
//!     validator.first_error().unwrap().message,
//!     "Bad request. Provided 'wrongDocId' is not a Mongo ID."
//! );
//!
//! let safe = validator.safe_object();
//! assert_eq!(safe.body, Some(json!({"role": {"eq": {"ne": "x"}}})));
//! # Ok::<(), input_guard::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod coerce;
mod error;
mod escape;
pub mod injection;
mod location;
pub mod messages;
mod options;
mod registry;
mod request;
pub mod rules;
mod validator;
pub mod web;

pub use coerce::coerce;
pub use error::{Error, ErrorRecord};
pub use escape::{Escaper, HtmlEscaper, IdentityEscaper};
pub use injection::{lookup_injection, DepthTracker, SanitizeResult};
pub use location::Location;
pub use options::{ValidatorOptions, DEFAULT_DEEP_LEVEL};
pub use registry::{Category, CustomFn, GeneralFn, Rule, RuleLoader, RuleOptions, RuleRegistry};
pub use request::Principal;
pub use validator::{SafeObject, Validator};
