//! The loaded-metadata model: what the runtime evaluator introspects.
//!
//! `LoadedModules` plays the role of the process's module registry. Modules
//! that could not be loaded are recorded as unresolved and contribute
//! nothing; this is never fatal.

use accord_core::facts::{ModuleFacts, ProgramFacts, TypeFacts, TypeKind, TypeTrait};
use accord_core::module::{ModuleId, ModuleMarker};
use accord_core::naming::{MarkerRef, TypeIdent};
use std::collections::BTreeSet;
use tracing::warn;

/// Introspected metadata for one type declared in a loaded module.
#[derive(Debug, Clone)]
pub struct TypeMetadata {
    ident: TypeIdent,
    kind: TypeKind,
    traits: BTreeSet<TypeTrait>,
    bases: Vec<TypeIdent>,
    markers: Vec<MarkerRef>,
    nested: Vec<TypeMetadata>,
}

impl TypeMetadata {
    pub fn new(ident: TypeIdent, kind: TypeKind) -> Self {
        Self {
            ident,
            kind,
            traits: BTreeSet::new(),
            bases: Vec::new(),
            markers: Vec::new(),
            nested: Vec::new(),
        }
    }

    pub fn with_trait(mut self, t: TypeTrait) -> Self {
        self.traits.insert(t);
        self
    }

    /// Record an identity this type is assignable to (a base type or an
    /// implemented interface). The chain is stored flattened.
    pub fn with_base(mut self, base: TypeIdent) -> Self {
        self.bases.push(base);
        self
    }

    pub fn with_marker(mut self, marker: TypeIdent) -> Self {
        self.markers.push(MarkerRef::resolved(marker));
        self
    }

    pub fn with_nested(mut self, nested: TypeMetadata) -> Self {
        self.nested.push(nested);
        self
    }

    pub fn nested(&self) -> &[TypeMetadata] {
        &self.nested
    }
}

impl TypeFacts for TypeMetadata {
    fn ident(&self) -> &TypeIdent {
        &self.ident
    }

    fn kind(&self) -> TypeKind {
        self.kind
    }

    fn traits(&self) -> &BTreeSet<TypeTrait> {
        &self.traits
    }

    fn assignable_idents(&self) -> &[TypeIdent] {
        &self.bases
    }

    fn markers(&self) -> &[MarkerRef] {
        &self.markers
    }
}

/// Introspected metadata for one loaded module.
#[derive(Debug, Clone)]
pub struct ModuleMetadata {
    id: ModuleId,
    system: bool,
    dependencies: Vec<ModuleId>,
    markers: Vec<ModuleMarker>,
    types: Vec<TypeMetadata>,
}

impl ModuleMetadata {
    pub fn new(id: ModuleId) -> Self {
        Self {
            id,
            system: false,
            dependencies: Vec::new(),
            markers: Vec::new(),
            types: Vec::new(),
        }
    }

    /// Mark this as a core/system module, excluded from candidate
    /// resolution unless explicitly opted in.
    pub fn system(mut self) -> Self {
        self.system = true;
        self
    }

    pub fn with_dependency(mut self, dep: ModuleId) -> Self {
        self.dependencies.push(dep);
        self
    }

    pub fn with_marker(mut self, marker: ModuleMarker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn with_type(mut self, ty: TypeMetadata) -> Self {
        self.types.push(ty);
        self
    }
}

fn flatten<'a>(types: &'a [TypeMetadata], out: &mut Vec<&'a TypeMetadata>) {
    for ty in types {
        out.push(ty);
        flatten(ty.nested(), out);
    }
}

impl ModuleFacts for ModuleMetadata {
    type Type = TypeMetadata;

    fn id(&self) -> &ModuleId {
        &self.id
    }

    fn is_system(&self) -> bool {
        self.system
    }

    fn dependencies(&self) -> &[ModuleId] {
        &self.dependencies
    }

    fn markers(&self) -> &[ModuleMarker] {
        &self.markers
    }

    fn declared_types(&self) -> Box<dyn Iterator<Item = &TypeMetadata> + '_> {
        let mut all = Vec::new();
        flatten(&self.types, &mut all);
        Box::new(all.into_iter())
    }
}

/// One registry entry: a loaded module or a record of why it is not.
#[derive(Debug, Clone)]
pub enum ModuleRecord {
    Loaded(ModuleMetadata),
    /// The module could not be introspected (e.g. missing dependency).
    /// It is skipped during evaluation and contributes nothing.
    Unresolved { id: ModuleId, reason: String },
}

/// The ordered set of modules known to the running process.
#[derive(Debug, Clone, Default)]
pub struct LoadedModules {
    records: Vec<ModuleRecord>,
    entry: Option<ModuleId>,
}

impl LoadedModules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a loaded module. Registration order is discovery order.
    pub fn register(&mut self, module: ModuleMetadata) -> &mut Self {
        self.records.push(ModuleRecord::Loaded(module));
        self
    }

    /// Record a module that failed to load. Logged once here; enumeration
    /// silently skips it afterwards.
    pub fn register_unresolved(&mut self, id: ModuleId, reason: impl Into<String>) -> &mut Self {
        let reason = reason.into();
        warn!(module = %id, reason = %reason, "module could not be introspected; it will contribute nothing");
        self.records.push(ModuleRecord::Unresolved { id, reason });
        self
    }

    /// Declare which module hosts the program entry point.
    pub fn set_entry(&mut self, id: ModuleId) -> &mut Self {
        self.entry = Some(id);
        self
    }

    pub fn records(&self) -> &[ModuleRecord] {
        &self.records
    }
}

impl ProgramFacts for LoadedModules {
    type Module = ModuleMetadata;

    fn modules(&self) -> Box<dyn Iterator<Item = &ModuleMetadata> + '_> {
        Box::new(self.records.iter().filter_map(|r| match r {
            ModuleRecord::Loaded(m) => Some(m),
            ModuleRecord::Unresolved { .. } => None,
        }))
    }

    fn entry_module(&self) -> Option<&ModuleId> {
        self.entry.as_ref()
    }
}
