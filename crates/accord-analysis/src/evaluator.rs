//! The static filter evaluator: the same walker as the runtime side,
//! instantiated over the symbol graph.

use crate::symbols::{SymbolGraph, TypeSymbol};
use accord_core::facts::{matching_types, TypeFacts};
use accord_core::filter::{FilterSet, ModuleFilter};
use accord_core::module::{ModuleSelection, ResolutionPolicy};
use accord_core::naming::TypeIdent;

/// Traversal mode: collect every match, or abort on the first one (used for
/// existence queries such as resolving a single representative type).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    CollectAll,
    FirstMatch,
}

/// A deferred query over the symbol graph.
#[derive(Debug, Clone)]
pub struct SymbolQuery<'a> {
    graph: &'a SymbolGraph,
    selection: ModuleSelection,
    policy: ResolutionPolicy,
    module_filters: Vec<ModuleFilter>,
    filters: FilterSet,
}

impl<'a> SymbolQuery<'a> {
    pub fn new(graph: &'a SymbolGraph, selection: ModuleSelection) -> Self {
        Self {
            graph,
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

    pub fn with_module_filter(mut self, filter: ModuleFilter) -> Self {
        self.module_filters.push(filter);
        self
    }

    pub fn with_filters(mut self, filters: FilterSet) -> Self {
        self.filters = filters;
        self
    }

    /// Lazily enumerate matching symbols. Fresh iterator per call.
    pub fn iter(&self) -> impl Iterator<Item = &TypeSymbol> + '_ {
        matching_types(
            self.graph,
            &self.selection,
            self.policy,
            &self.module_filters,
            &self.filters,
        )
    }

    /// Run the query under the given traversal mode.
    pub fn scan(&self, mode: ScanMode) -> Vec<TypeIdent> {
        match mode {
            ScanMode::CollectAll => self.idents(),
            ScanMode::FirstMatch => self.first().into_iter().collect(),
        }
    }

    /// Identities of all matching symbols, in traversal order.
    pub fn idents(&self) -> Vec<TypeIdent> {
        self.iter().map(|t| t.ident().clone()).collect()
    }

    /// Abort-on-first-match existence query.
    pub fn first(&self) -> Option<TypeIdent> {
        self.iter().next().map(|t| t.ident().clone())
    }
}
