use std::fmt;
use std::str::FromStr;

use crate::Error;

/// A top-level section of a request input tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// Route parameters
    Params,
    /// Query string parameters
    Query,
    /// Parsed request body
    Body,
    /// Request headers
    Headers,
    /// Request cookies
    Cookies,
}

impl Location {
    /// Every recognized location.
    pub const ALL: [Location; 5] = [
        Location::Params,
        Location::Query,
        Location::Body,
        Location::Headers,
        Location::Cookies,
    ];

    /// Locations rewritten by injection cleaning, in cleaning order.
    pub const CLEANABLE: [Location; 3] = [Location::Body, Location::Params, Location::Query];

    /// Returns the key this location occupies in the input tree.
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Params => "params",
            Location::Query => "query",
            Location::Body => "body",
            Location::Headers => "headers",
            Location::Cookies => "cookies",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::ALL
            .into_iter()
            .find(|loc| loc.as_str() == s)
            .ok_or_else(|| Error::InvalidLocation(s.to_string()))
    }
}
