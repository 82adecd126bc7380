use super::NamingScope;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prefix the compiler stamps on synthetic (compiler-internal) type names.
/// Types with such names are never filter candidates.
pub const SYNTHETIC_PREFIX: &str = "<";

/// Stable identity of a type: its naming scope plus its simple name.
///
/// Identity is value-based, so the same type observed through loaded metadata
/// and through a static symbol graph compares equal. Nested types use the
/// `Outer.Inner` convention for the simple name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeIdent {
    scope: NamingScope,
    name: String,
}

impl TypeIdent {
    pub fn new(scope: impl Into<NamingScope>, name: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            name: name.into(),
        }
    }

    /// Parse a qualified name, splitting the simple name at the last dot.
    /// A name without a dot lands in the root scope.
    pub fn parse(qualified: &str) -> Self {
        match qualified.rsplit_once('.') {
            Some((scope, name)) => Self::new(scope, name),
            None => Self::new(NamingScope::root(), qualified),
        }
    }

    pub fn scope(&self) -> &NamingScope {
        &self.scope
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fully-qualified name, e.g. "app.ext.HttpConvention".
    pub fn qualified_name(&self) -> String {
        if self.scope.is_root() {
            self.name.clone()
        } else {
            format!("{}.{}", self.scope, self.name)
        }
    }

    /// Whether this names a compiler-synthesized type.
    pub fn is_synthetic(&self) -> bool {
        self.name.starts_with(SYNTHETIC_PREFIX)
    }
}

impl fmt::Display for TypeIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scope.is_root() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.scope, self.name)
        }
    }
}

impl FromStr for TypeIdent {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
