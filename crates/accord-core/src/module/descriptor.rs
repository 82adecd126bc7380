use crate::naming::{MarkerRef, TypeIdent};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a compiled module.
///
/// Equality is by name plus a version-independent key, never by reference, so
/// the same module resolved at compile time and at run time compares equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleId {
    name: String,
    key: String,
}

impl ModuleId {
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
        }
    }

    /// Identity keyed by name alone (empty key).
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, "")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A module-scoped declarative marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleMarker {
    /// Names the extension-unit types this module contributes. A module may
    /// carry several of these; they are additive.
    ExportsConventions(Vec<TypeIdent>),
    /// An arbitrary marker tag, matchable by module filters.
    Tag(MarkerRef),
}

impl ModuleMarker {
    /// Marker exporting a single extension-unit type.
    pub fn exports(ident: TypeIdent) -> Self {
        Self::ExportsConventions(vec![ident])
    }

    /// Marker exporting a list of extension-unit types.
    pub fn exports_all(idents: impl IntoIterator<Item = TypeIdent>) -> Self {
        Self::ExportsConventions(idents.into_iter().collect())
    }
}
