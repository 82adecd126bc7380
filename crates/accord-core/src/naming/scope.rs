use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A hierarchical naming scope: dot-separated segments grouping type names.
///
/// The root scope is the empty string and is a prefix of every scope.
/// Scopes compare exactly (no case folding); the same textual scope observed
/// by the runtime and static evaluators is the same scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamingScope(String);

impl NamingScope {
    /// Create a scope from a dot-separated string (e.g. "app.conventions").
    pub fn new(scope: impl Into<String>) -> Self {
        Self(scope.into())
    }

    /// The root (empty) scope.
    pub fn root() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Segment-aware prefix test: "app.ext" is a prefix of "app.ext.http"
    /// but not of "app.extras". A scope is a prefix of itself.
    pub fn is_prefix_of(&self, other: &NamingScope) -> bool {
        if self.is_root() {
            return true;
        }
        match other.0.strip_prefix(&self.0) {
            Some("") => true,
            Some(rest) => rest.starts_with('.'),
            None => false,
        }
    }

}

impl fmt::Display for NamingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NamingScope {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for NamingScope {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NamingScope {
    fn from(s: String) -> Self {
        Self(s)
    }
}
