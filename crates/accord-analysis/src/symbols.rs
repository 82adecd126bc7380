//! The static program representation: pre-resolved symbols grouped by
//! naming scope, available during a build-time analysis pass without loading
//! any module.
//!
//! Unlike loaded metadata, a symbol may reference a marker declared in a
//! module the analysis cannot resolve; such references are carried as
//! fully-qualified names (`MarkerRef::Named`) and matched by string fallback.

use accord_core::facts::{ModuleFacts, ProgramFacts, TypeFacts, TypeKind, TypeTrait};
use accord_core::module::{ModuleId, ModuleMarker};
use accord_core::naming::{MarkerRef, NamingScope, TypeIdent};
use std::collections::BTreeSet;

/// A type symbol, with nested type symbols in declaration order.
#[derive(Debug, Clone)]
pub struct TypeSymbol {
    ident: TypeIdent,
    kind: TypeKind,
    traits: BTreeSet<TypeTrait>,
    bases: Vec<TypeIdent>,
    markers: Vec<MarkerRef>,
    nested: Vec<TypeSymbol>,
}

impl TypeSymbol {
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

    pub fn with_base(mut self, base: TypeIdent) -> Self {
        self.bases.push(base);
        self
    }

    /// Attach a resolved marker reference.
    pub fn with_marker(mut self, marker: TypeIdent) -> Self {
        self.markers.push(MarkerRef::resolved(marker));
        self
    }

    /// Attach a marker known only by fully-qualified name (declared in a
    /// module the analysis cannot resolve).
    pub fn with_named_marker(mut self, name: impl Into<String>) -> Self {
        self.markers.push(MarkerRef::named(name));
        self
    }

    pub fn with_nested(mut self, nested: TypeSymbol) -> Self {
        self.nested.push(nested);
        self
    }

    pub fn nested(&self) -> &[TypeSymbol] {
        &self.nested
    }
}

impl TypeFacts for TypeSymbol {
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

/// Symbols declared under one naming scope.
#[derive(Debug, Clone)]
pub struct ScopeSymbol {
    scope: NamingScope,
    types: Vec<TypeSymbol>,
}

impl ScopeSymbol {
    pub fn new(scope: impl Into<NamingScope>) -> Self {
        Self {
            scope: scope.into(),
            types: Vec::new(),
        }
    }

    pub fn with_type(mut self, ty: TypeSymbol) -> Self {
        self.types.push(ty);
        self
    }

    pub fn scope(&self) -> &NamingScope {
        &self.scope
    }

    pub fn types(&self) -> &[TypeSymbol] {
        &self.types
    }
}

/// A module's symbols: scope groups in declaration order.
#[derive(Debug, Clone)]
pub struct ModuleSymbol {
    id: ModuleId,
    system: bool,
    dependencies: Vec<ModuleId>,
    markers: Vec<ModuleMarker>,
    scopes: Vec<ScopeSymbol>,
}

impl ModuleSymbol {
    pub fn new(id: ModuleId) -> Self {
        Self {
            id,
            system: false,
            dependencies: Vec::new(),
            markers: Vec::new(),
            scopes: Vec::new(),
        }
    }

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

    pub fn with_scope(mut self, scope: ScopeSymbol) -> Self {
        self.scopes.push(scope);
        self
    }
}

fn flatten<'a>(types: &'a [TypeSymbol], out: &mut Vec<&'a TypeSymbol>) {
    for ty in types {
        out.push(ty);
        flatten(ty.nested(), out);
    }
}

impl ModuleFacts for ModuleSymbol {
    type Type = TypeSymbol;

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

    /// Traversal order mirrors the runtime side: scope groups in declaration
    /// order, then nested types depth-first after their declaring type.
    fn declared_types(&self) -> Box<dyn Iterator<Item = &TypeSymbol> + '_> {
        let mut all = Vec::new();
        for scope in &self.scopes {
            flatten(scope.types(), &mut all);
        }
        Box::new(all.into_iter())
    }
}

/// The whole build-time symbol graph.
#[derive(Debug, Clone, Default)]
pub struct SymbolGraph {
    modules: Vec<ModuleSymbol>,
    entry: Option<ModuleId>,
}

impl SymbolGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(mut self, module: ModuleSymbol) -> Self {
        self.modules.push(module);
        self
    }

    pub fn with_entry(mut self, id: ModuleId) -> Self {
        self.entry = Some(id);
        self
    }
}

impl ProgramFacts for SymbolGraph {
    type Module = ModuleSymbol;

    fn modules(&self) -> Box<dyn Iterator<Item = &ModuleSymbol> + '_> {
        Box::new(self.modules.iter())
    }

    fn entry_module(&self) -> Option<&ModuleId> {
        self.entry.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traversal_covers_scopes_then_nested() {
        let module = ModuleSymbol::new(ModuleId::named("app"))
            .with_scope(
                ScopeSymbol::new("app").with_type(
                    TypeSymbol::new(TypeIdent::parse("app.Outer"), TypeKind::Class).with_nested(
                        TypeSymbol::new(TypeIdent::parse("app.Outer.Inner"), TypeKind::Class),
                    ),
                ),
            )
            .with_scope(
                ScopeSymbol::new("app.sub")
                    .with_type(TypeSymbol::new(TypeIdent::parse("app.sub.Leaf"), TypeKind::Struct)),
            );

        let names: Vec<String> = module
            .declared_types()
            .map(|t| t.ident().qualified_name())
            .collect();
        assert_eq!(names, vec!["app.Outer", "app.Outer.Inner", "app.sub.Leaf"]);
    }
}
