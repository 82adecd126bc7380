//! Generic traversal: module resolution → module filters → type filters.

use super::{ModuleFacts, ProgramFacts, TypeFacts};
use crate::filter::{eval, FilterSet, ModuleFilter};
use crate::module::{resolve_modules, ModuleSelection, ResolutionPolicy};

/// Whether a type can be a filter candidate at all. Synthetic
/// (compiler-internal) types and marker/annotation types never qualify.
pub fn is_candidate<T: TypeFacts>(ty: &T) -> bool {
    !ty.is_synthetic() && !ty.is_marker_type()
}

/// Resolve candidate modules and apply module-level filters.
pub fn matching_modules<'a, P: ProgramFacts>(
    program: &'a P,
    selection: &ModuleSelection,
    policy: ResolutionPolicy,
    module_filters: &'a [ModuleFilter],
) -> Vec<&'a P::Module> {
    resolve_modules(program, selection, policy)
        .into_iter()
        .filter(|m| module_filters.iter().all(|f| eval::module_matches(*m, f)))
        .collect()
}

/// Lazily enumerate all candidate types matching every filter in the set.
///
/// The returned iterator is restartable by calling this function again; no
/// two iterators share state. Dropping the iterator early gives the
/// abort-on-first-match traversal used for existence queries.
pub fn matching_types<'a, P: ProgramFacts>(
    program: &'a P,
    selection: &ModuleSelection,
    policy: ResolutionPolicy,
    module_filters: &'a [ModuleFilter],
    type_filters: &'a FilterSet,
) -> impl Iterator<Item = &'a <P::Module as ModuleFacts>::Type> + 'a {
    matching_modules(program, selection, policy, module_filters)
        .into_iter()
        .flat_map(|m| m.declared_types())
        .filter(move |t| is_candidate(*t) && eval::type_matches(*t, type_filters))
}
