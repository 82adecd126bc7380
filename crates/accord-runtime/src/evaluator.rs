//! The runtime filter evaluator: lazy, restartable queries over loaded
//! metadata, built on the shared type-graph walker.

use crate::metadata::{LoadedModules, TypeMetadata};
use accord_core::facts::{matching_types, TypeFacts};
use accord_core::filter::{FilterSet, ModuleFilter};
use accord_core::module::{ModuleSelection, ResolutionPolicy};
use accord_core::naming::TypeIdent;

/// A deferred type query: selection + filters, evaluated on demand.
///
/// `iter` produces a fresh lazy iterator on every call; no two iterations
/// share state, and re-enumeration repeats the scan.
#[derive(Debug, Clone)]
pub struct TypeQuery<'a> {
    program: &'a LoadedModules,
    selection: ModuleSelection,
    policy: ResolutionPolicy,
    module_filters: Vec<ModuleFilter>,
    filters: FilterSet,
}

impl<'a> TypeQuery<'a> {
    pub fn new(program: &'a LoadedModules, selection: ModuleSelection) -> Self {
        Self {
            program,
            selection,
            policy: ResolutionPolicy::default(),
            module_filters: Vec::new(),
            filters: FilterSet::empty(),
        }
    }

    pub fn with_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Restrict which modules qualify for scanning.
    pub fn with_module_filter(mut self, filter: ModuleFilter) -> Self {
        self.module_filters.push(filter);
        self
    }

    pub fn with_filters(mut self, filters: FilterSet) -> Self {
        self.filters = filters;
        self
    }

    /// Lazily enumerate matching types. Fresh iterator per call.
    pub fn iter(&self) -> impl Iterator<Item = &TypeMetadata> + '_ {
        matching_types(
            self.program,
            &self.selection,
            self.policy,
            &self.module_filters,
            &self.filters,
        )
    }

    /// Collect the identities of all matching types, in traversal order.
    pub fn idents(&self) -> Vec<TypeIdent> {
        self.iter().map(|t| t.ident().clone()).collect()
    }

    /// Abort-on-first-match existence query.
    pub fn first(&self) -> Option<&TypeMetadata> {
        self.iter().next()
    }
}
