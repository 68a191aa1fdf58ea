use std::fmt;

use crate::registry::Category;

/// Fatal errors raised by construction and by call-contract violations.
///
/// Validation failures are never reported through this type. They are
/// accumulated as [`ErrorRecord`]s on the validator so every field can be
/// checked in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input object is missing, not a mapping, or has no keys.
    EmptyInput,
    /// A location in the input is present but cannot hold fields.
    InvalidLocationShape {
        /// Name of the malformed location
        location: String,
    },
    /// A rule with the same name was already registered in its category.
    DuplicateRule {
        /// Category the rule was registered under
        category: Category,
        /// Name of the rule
        name: String,
    },
    /// A general rule has no message template to report failures with.
    MissingTemplate {
        /// Name of the rule lacking a template
        rule: String,
    },
    /// `check_values` was called with a name that is not a location.
    InvalidLocation(String),
    /// `check_values` was called with an empty or non-mapping field spec.
    InvalidFields {
        /// Location the field spec was meant for
        location: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => {
                write!(f, "A valid request object is required for validation.")
            }
            Error::InvalidLocationShape { location } => {
                write!(f, "Provided {} in request object is not valid.", location)
            }
            Error::DuplicateRule { category, name } => {
                write!(f, "Validator named '{}' already exists ({}).", name, category)
            }
            Error::MissingTemplate { rule } => {
                write!(f, "No message template defined for validator '{}'.", rule)
            }
            Error::InvalidLocation(name) => write!(f, "Invalid location name: {}", name),
            Error::InvalidFields { location } => {
                write!(f, "Provided {} in request object is not valid.", location)
            }
        }
    }
}

impl std::error::Error for Error {}

/// A failed validation, ready to be shown to the caller's client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    /// HTTP-style status code (400 unless stated otherwise)
    pub code: u16,
    /// Rendered message template
    pub message: String,
}

impl ErrorRecord {
    /// Status code used for every failed rule.
    pub const DEFAULT_CODE: u16 = 400;

    /// Creates a record with the default code.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: Self::DEFAULT_CODE,
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}
