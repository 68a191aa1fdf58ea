//! Web framework integration surface.
//!
//! This module provides the boundary between HTTP frameworks and the
//! validator. It handles mapping a request's untrusted parts (route params,
//! query string, headers, cookies, body) plus the requester's identity into
//! the input tree a [`Validator`](crate::Validator) reads.
//!
//! # Design Principles
//!
//! 1. **No Framework Dependencies**: This module contains no framework-specific
//!    code. It defines interfaces that framework-specific code can implement.
//!
//! 2. **Everything Is Untrusted**: Every value collected here is checked and
//!    cleaned by the validator before use.
//!
//! 3. **No Authentication**: The boundary only records the principal the
//!    framework already authenticated, for log attribution.
//!
//! # Example Flow
//!
//! ```
//! use input_guard::web::{ExtractInput, RequestAdapter};
//! use input_guard::{Validator, ValidatorOptions};
//! use serde_json::json;
//!
//! // 1. Extract from HTTP request
//! let mut adapter = RequestAdapter::new();
//! adapter.set_ip("203.0.113.7");
//! adapter.set_body(json!({"username": "John", "password": {"$ne": ""}}));
//! let input = adapter.extract_input();
//!
//! // 2. Validate and clean
//! let mut validator = Validator::new(&input, ValidatorOptions::default())?;
//! validator
//!     .check_values("body", &json!({"username": "isString"}))?
//!     .clean_injections();
//!
//! // 3. Use the safe copy
//! let safe = validator.safe_object();
//! assert!(!validator.has_errors());
//! assert!(safe.is_sanitized());
//! assert_eq!(safe.body.unwrap()["password"], json!({"ne": ""}));
//! # Ok::<(), input_guard::Error>(())
//! ```

mod adapter;
mod extract;

pub use adapter::RequestAdapter;
pub use extract::ExtractInput;
