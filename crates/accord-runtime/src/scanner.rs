//! Discovery and composition of extension units.
//!
//! The scanner is a two-state machine: unbuilt (accepting overrides) and
//! built (frozen, memoized provider). Any override invalidates the memo and
//! the next build reflects it. Callers must serialize mutations on one
//! scanner (`&mut self` enforces the single-writer discipline); independent
//! scanners are fully concurrent.

use crate::cache::DiscoveryCache;
use crate::error::{ConventionError, Result};
use crate::metadata::LoadedModules;
use crate::provider::ConventionProvider;
use crate::unit::UnitRegistration;
use accord_core::facts::ModuleFacts;
use accord_core::module::{resolve_modules, ModuleId, ModuleSelection, ResolutionPolicy};
use accord_core::naming::TypeIdent;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Host-supplied activation step: constructs a discovered unit type into a
/// registration. Construction may need contextual parameters only the host
/// has, which is why this is pluggable.
pub type Activator = Arc<dyn Fn(&TypeIdent) -> anyhow::Result<UnitRegistration> + Send + Sync>;

/// Discovers extension units from module markers and merges them with
/// caller-supplied prepend/append/except overrides into a frozen,
/// deterministic [`ConventionProvider`].
pub struct ConventionScanner {
    modules: LoadedModules,
    selection: ModuleSelection,
    policy: ResolutionPolicy,
    activator: Activator,
    cache: Arc<DiscoveryCache>,
    prepended: Vec<UnitRegistration>,
    appended: Vec<UnitRegistration>,
    excluded_types: HashSet<TypeIdent>,
    excluded_modules: HashSet<ModuleId>,
    built: Option<Arc<ConventionProvider>>,
    sealed: bool,
}

// Manual impl: the activator is an opaque closure.
impl fmt::Debug for ConventionScanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConventionScanner")
            .field("selection", &self.selection)
            .field("policy", &self.policy)
            .field("prepended", &self.prepended)
            .field("appended", &self.appended)
            .field("excluded_types", &self.excluded_types)
            .field("excluded_modules", &self.excluded_modules)
            .field("built", &self.built.is_some())
            .field("sealed", &self.sealed)
            .finish_non_exhaustive()
    }
}

impl ConventionScanner {
    pub fn new(
        modules: LoadedModules,
        selection: ModuleSelection,
        activator: Activator,
        cache: Arc<DiscoveryCache>,
    ) -> Self {
        Self {
            modules,
            selection,
            policy: ResolutionPolicy::default(),
            activator,
            cache,
            prepended: Vec::new(),
            appended: Vec::new(),
            excluded_types: HashSet::new(),
            excluded_modules: HashSet::new(),
            built: None,
            sealed: false,
        }
    }

    pub fn with_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn modules(&self) -> &LoadedModules {
        &self.modules
    }

    /// Register a unit ahead of every discovered unit.
    pub fn prepend(&mut self, unit: UnitRegistration) -> Result<&mut Self> {
        self.touch()?;
        self.prepended.push(unit);
        Ok(self)
    }

    /// Register a unit after every discovered unit.
    pub fn append(&mut self, unit: UnitRegistration) -> Result<&mut Self> {
        self.touch()?;
        self.appended.push(unit);
        Ok(self)
    }

    /// Exclude discovered units of the given constructed type. Prepended and
    /// appended units are caller intent and are never filtered.
    pub fn except_type(&mut self, ident: TypeIdent) -> Result<&mut Self> {
        self.touch()?;
        self.excluded_types.insert(ident);
        Ok(self)
    }

    /// Exclude every unit discovered in the given module.
    pub fn except_module(&mut self, id: ModuleId) -> Result<&mut Self> {
        self.touch()?;
        self.excluded_modules.insert(id);
        Ok(self)
    }

    /// Refuse all further overrides. Subsequent mutation attempts report
    /// [`ConventionError::Sealed`] immediately; `build` remains available.
    pub fn seal(&mut self) -> &mut Self {
        self.sealed = true;
        self
    }

    /// Drop the memoized provider, forcing rediscovery on the next build.
    pub fn invalidate(&mut self) -> &mut Self {
        self.built = None;
        self
    }

    /// An override transitions Built -> Unbuilt and discards the memo.
    fn touch(&mut self) -> Result<()> {
        if self.sealed {
            return Err(ConventionError::Sealed);
        }
        self.built = None;
        Ok(())
    }

    /// Build (or return the memoized) ordered provider:
    /// `prepended ++ (discovered - excluded) ++ appended`.
    ///
    /// Discovery order is module resolution order, then marker declaration
    /// order within a module. Activation failure is fatal.
    pub fn build(&mut self) -> Result<Arc<ConventionProvider>> {
        if let Some(provider) = &self.built {
            return Ok(Arc::clone(provider));
        }

        let mut units: Vec<UnitRegistration> = self.prepended.clone();

        for module in resolve_modules(&self.modules, &self.selection, self.policy) {
            if self.excluded_modules.contains(module.id()) {
                debug!(module = %module.id(), "module excluded from discovery");
                continue;
            }
            for ident in self.cache.get_or_scan(module).iter() {
                if self.excluded_types.contains(ident) {
                    debug!(unit = %ident, "unit type excluded from discovery");
                    continue;
                }
                let registration =
                    (self.activator)(ident).map_err(|source| ConventionError::Activation {
                        ident: ident.clone(),
                        source,
                    })?;
                units.push(registration.with_origin(module.id().clone()));
            }
        }

        units.extend(self.appended.iter().cloned());

        let provider = Arc::new(ConventionProvider::new(units));
        info!(units = provider.len(), "convention provider built");
        self.built = Some(Arc::clone(&provider));
        Ok(provider)
    }
}
