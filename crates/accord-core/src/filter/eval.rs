//! Filter evaluation over the fact traits.
//!
//! This is the single predicate implementation both evaluators share. AND
//! across descriptors in a set, OR across set-valued arguments within one
//! descriptor.

use super::descriptor::{FilterSet, ModuleFilter, NameMode, ScopeMode, TypeFilter};
use crate::facts::{ModuleFacts, TypeFacts};
use crate::naming::NamingScope;
use std::collections::BTreeSet;

/// Whether a type satisfies every filter in the set.
pub fn type_matches<T: TypeFacts + ?Sized>(ty: &T, set: &FilterSet) -> bool {
    set.filters().iter().all(|f| filter_matches(ty, f))
}

/// Whether a type satisfies one filter descriptor.
pub fn filter_matches<T: TypeFacts + ?Sized>(ty: &T, filter: &TypeFilter) -> bool {
    match filter {
        TypeFilter::AssignableTo(target) => ty.is_assignable_to(target),
        TypeFilter::NotAssignableTo(target) => !ty.is_assignable_to(target),
        TypeFilter::AssignableToAny(targets) => {
            targets.iter().any(|t| ty.is_assignable_to(t))
        }
        TypeFilter::NotAssignableToAny(targets) => {
            !targets.iter().any(|t| ty.is_assignable_to(t))
        }
        TypeFilter::NameMatches(mode, patterns) => patterns
            .iter()
            .any(|p| name_matches(ty.ident().name(), *mode, p)),
        TypeFilter::InNamingScope(mode, scopes) => {
            scope_matches(ty.ident().scope(), *mode, scopes)
        }
        TypeFilter::HasMarker(marker) => ty.has_marker(marker),
        TypeFilter::LacksMarker(marker) => !ty.has_marker(marker),
        TypeFilter::StructuralKind { include, kinds } => {
            kinds.contains(&ty.kind()) == *include
        }
        TypeFilter::StructuralInfo { include, traits } => {
            traits.iter().any(|t| ty.traits().contains(t)) == *include
        }
        TypeFilter::AnyOf(filters) => filters.iter().any(|f| filter_matches(ty, f)),
        TypeFilter::AllOf(filters) => filters.iter().all(|f| filter_matches(ty, f)),
        TypeFilter::Not(inner) => !filter_matches(ty, inner),
    }
}

/// Whether a module satisfies one module filter.
pub fn module_matches<M: ModuleFacts + ?Sized>(module: &M, filter: &ModuleFilter) -> bool {
    match filter {
        ModuleFilter::NameMatches(mode, patterns) => patterns
            .iter()
            .any(|p| name_matches(module.id().name(), *mode, p)),
        ModuleFilter::HasMarker(marker) => module.has_marker(marker),
        ModuleFilter::LacksMarker(marker) => !module.has_marker(marker),
    }
}

fn name_matches(name: &str, mode: NameMode, pattern: &str) -> bool {
    match mode {
        NameMode::StartsWith => name.starts_with(pattern),
        NameMode::EndsWith => name.ends_with(pattern),
        NameMode::Contains => name.contains(pattern),
    }
}

fn scope_matches(scope: &NamingScope, mode: ScopeMode, scopes: &BTreeSet<NamingScope>) -> bool {
    match mode {
        ScopeMode::Exact => scopes.contains(scope),
        ScopeMode::Prefix => scopes.iter().any(|s| s.is_prefix_of(scope)),
        ScopeMode::NotPrefix => !scopes.iter().any(|s| s.is_prefix_of(scope)),
    }
}
