use super::TypeIdent;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a declarative marker type.
///
/// A marker may be referenced by resolved identity or, when the marker is
/// declared in a module the analyzing side cannot resolve, by fully-qualified
/// name. Matching tries identity first and falls back to string comparison of
/// qualified names, so both reference forms select the same types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MarkerRef {
    /// A resolved marker identity.
    Resolved(TypeIdent),
    /// A fully-qualified marker name that could not (or need not) be resolved.
    Named(String),
}

impl MarkerRef {
    pub fn resolved(ident: TypeIdent) -> Self {
        Self::Resolved(ident)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// The fully-qualified name of the referenced marker.
    pub fn qualified_name(&self) -> String {
        match self {
            Self::Resolved(ident) => ident.qualified_name(),
            Self::Named(name) => name.clone(),
        }
    }

    /// Whether two references name the same marker. Resolved references
    /// compare by identity; any mix involving a named reference compares
    /// qualified names.
    pub fn matches(&self, other: &MarkerRef) -> bool {
        match (self, other) {
            (Self::Resolved(a), Self::Resolved(b)) => a == b,
            _ => self.qualified_name() == other.qualified_name(),
        }
    }
}

impl fmt::Display for MarkerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name())
    }
}

impl From<TypeIdent> for MarkerRef {
    fn from(ident: TypeIdent) -> Self {
        Self::Resolved(ident)
    }
}

/// The base identity every declarative marker type derives from. Types whose
/// base chain reaches this identity are annotations, never filter candidates.
pub fn marker_base() -> TypeIdent {
    TypeIdent::new("accord.meta", "Marker")
}
