use crate::facts::{TypeKind, TypeTrait};
use crate::naming::{MarkerRef, NamingScope, TypeIdent};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Name-pattern matching mode.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum NameMode {
    StartsWith,
    EndsWith,
    Contains,
}

/// Naming-scope matching mode.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ScopeMode {
    /// The type's scope equals one of the given scopes.
    Exact,
    /// One of the given scopes is a prefix of the type's scope.
    Prefix,
    /// None of the given scopes is a prefix of the type's scope.
    NotPrefix,
}

/// One declarative type filter descriptor.
///
/// Immutable and value-comparable so filter sets can be deduplicated and used
/// as cache keys. Set-valued arguments are OR'd within the descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TypeFilter {
    AssignableTo(TypeIdent),
    NotAssignableTo(TypeIdent),
    AssignableToAny(BTreeSet<TypeIdent>),
    NotAssignableToAny(BTreeSet<TypeIdent>),
    NameMatches(NameMode, BTreeSet<String>),
    InNamingScope(ScopeMode, BTreeSet<NamingScope>),
    HasMarker(MarkerRef),
    LacksMarker(MarkerRef),
    StructuralKind {
        include: bool,
        kinds: BTreeSet<TypeKind>,
    },
    StructuralInfo {
        include: bool,
        traits: BTreeSet<TypeTrait>,
    },
    AnyOf(Vec<TypeFilter>),
    AllOf(Vec<TypeFilter>),
    Not(Box<TypeFilter>),
}

/// A canonicalized set of type filters, AND'd at evaluation.
///
/// Building sorts and deduplicates, so two sets with the same descriptors
/// compare and hash equal regardless of construction order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterSet {
    filters: Vec<TypeFilter>,
}

impl FilterSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> super::FilterSetBuilder {
        super::FilterSetBuilder::default()
    }

    pub(crate) fn from_filters(mut filters: Vec<TypeFilter>) -> Self {
        filters.sort();
        filters.dedup();
        Self { filters }
    }

    pub fn filters(&self) -> &[TypeFilter] {
        &self.filters
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

/// Filters restricting which modules qualify for type scanning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModuleFilter {
    NameMatches(NameMode, BTreeSet<String>),
    HasMarker(MarkerRef),
    LacksMarker(MarkerRef),
}

impl ModuleFilter {
    pub fn name_matches(
        mode: NameMode,
        patterns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::NameMatches(mode, patterns.into_iter().map(Into::into).collect())
    }
}
