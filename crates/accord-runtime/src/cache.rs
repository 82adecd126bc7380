//! Per-module discovery memoization.
//!
//! The cache is an explicit object with caller-controlled lifetime, passed
//! into each scanner: there is no process-wide state. Population is
//! idempotent — computing the same entry twice yields the same value — so
//! reads are never blocked behind a compute.

use crate::metadata::ModuleMetadata;
use accord_core::facts::ModuleFacts;
use accord_core::module::ModuleId;
use accord_core::naming::TypeIdent;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Memoizes, per module identity, the extension-unit types the module's
/// declarative markers name. Safe to share read-only across scanners.
#[derive(Debug, Default)]
pub struct DiscoveryCache {
    entries: RwLock<HashMap<ModuleId, Arc<[TypeIdent]>>>,
}

impl DiscoveryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the module's exported unit types, scanning its markers on
    /// first request.
    pub fn get_or_scan(&self, module: &ModuleMetadata) -> Arc<[TypeIdent]> {
        if let Some(hit) = self
            .entries
            .read()
            .expect("discovery cache lock poisoned")
            .get(module.id())
        {
            return Arc::clone(hit);
        }

        let scanned: Arc<[TypeIdent]> = module.exported_conventions().into();
        self.entries
            .write()
            .expect("discovery cache lock poisoned")
            .entry(module.id().clone())
            .or_insert_with(|| Arc::clone(&scanned));
        scanned
    }

    /// Drop the entry for one module, forcing a rescan on next request.
    pub fn invalidate(&self, id: &ModuleId) {
        self.entries
            .write()
            .expect("discovery cache lock poisoned")
            .remove(id);
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .expect("discovery cache lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accord_core::module::ModuleMarker;

    fn module() -> ModuleMetadata {
        ModuleMetadata::new(ModuleId::named("app"))
            .with_marker(ModuleMarker::exports(TypeIdent::parse("app.X")))
            .with_marker(ModuleMarker::exports_all([
                TypeIdent::parse("app.Y"),
                TypeIdent::parse("app.Z"),
            ]))
    }

    #[test]
    fn test_markers_union_additively() {
        let cache = DiscoveryCache::new();
        let idents = cache.get_or_scan(&module());
        assert_eq!(
            idents.as_ref(),
            &[
                TypeIdent::parse("app.X"),
                TypeIdent::parse("app.Y"),
                TypeIdent::parse("app.Z"),
            ]
        );
    }

    #[test]
    fn test_population_is_memoized_and_idempotent() {
        let cache = DiscoveryCache::new();
        let module = module();
        let first = cache.get_or_scan(&module);
        let second = cache.get_or_scan(&module);
        assert_eq!(first.as_ref(), second.as_ref());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidate_forces_rescan() {
        let cache = DiscoveryCache::new();
        let module = module();
        cache.get_or_scan(&module);
        cache.invalidate(module.id());
        assert!(cache.is_empty());
        cache.get_or_scan(&module);
        assert_eq!(cache.len(), 1);
    }
}
