//! The type-graph walker abstraction.
//!
//! Both filter evaluators — the runtime one over loaded metadata and the
//! static one over a symbol graph — are instantiations of the same traversal
//! and predicate logic, parameterized by the small fact traits below. Keeping
//! a single skeleton is what guarantees the two evaluators select identical
//! type sets for the same compiled output.

pub mod kind;
pub mod walker;

pub use kind::{TypeKind, TypeTrait};
pub use walker::{is_candidate, matching_modules, matching_types};

use crate::module::{ModuleId, ModuleMarker};
use crate::naming::{marker_base, MarkerRef, TypeIdent};
use std::collections::BTreeSet;

/// Facts a filter evaluator needs about one type.
pub trait TypeFacts {
    fn ident(&self) -> &TypeIdent;

    fn kind(&self) -> TypeKind;

    fn traits(&self) -> &BTreeSet<TypeTrait>;

    /// Identities this type is assignable to beyond itself: the transitive
    /// base chain plus implemented interfaces, flattened.
    fn assignable_idents(&self) -> &[TypeIdent];

    /// Markers attached directly to the type.
    fn markers(&self) -> &[MarkerRef];

    fn is_assignable_to(&self, target: &TypeIdent) -> bool {
        self.ident() == target || self.assignable_idents().contains(target)
    }

    fn has_marker(&self, marker: &MarkerRef) -> bool {
        self.markers().iter().any(|m| m.matches(marker))
    }

    /// Annotation types (base chain reaching the marker base) are never
    /// candidates themselves.
    fn is_marker_type(&self) -> bool {
        self.assignable_idents().contains(&marker_base())
    }

    fn is_synthetic(&self) -> bool {
        self.ident().is_synthetic()
    }
}

/// Facts a filter evaluator needs about one module.
pub trait ModuleFacts {
    type Type: TypeFacts;

    fn id(&self) -> &ModuleId;

    /// Core/system modules are excluded from candidate resolution unless
    /// explicitly opted in.
    fn is_system(&self) -> bool;

    fn dependencies(&self) -> &[ModuleId];

    /// Module-scoped declarative markers.
    fn markers(&self) -> &[ModuleMarker];

    /// All declared types in declaration order, nested types flattened
    /// depth-first after their declaring type. Each call yields a fresh
    /// iterator; re-enumeration repeats the scan.
    fn declared_types(&self) -> Box<dyn Iterator<Item = &Self::Type> + '_>;

    /// Extension-unit types this module contributes. Multiple markers are
    /// additive (union), in declaration order.
    fn exported_conventions(&self) -> Vec<TypeIdent> {
        let mut out = Vec::new();
        for marker in self.markers() {
            if let ModuleMarker::ExportsConventions(idents) = marker {
                out.extend(idents.iter().cloned());
            }
        }
        out
    }

    fn has_marker(&self, marker: &MarkerRef) -> bool {
        self.markers().iter().any(|m| match m {
            ModuleMarker::Tag(tag) => tag.matches(marker),
            ModuleMarker::ExportsConventions(_) => false,
        })
    }
}

/// Facts about a whole program: an ordered set of modules.
pub trait ProgramFacts {
    type Module: ModuleFacts;

    /// Modules in load/registration order. Unresolvable modules are not
    /// yielded; they contribute nothing.
    fn modules(&self) -> Box<dyn Iterator<Item = &Self::Module> + '_>;

    /// The module hosting the program entry point, when one is known.
    fn entry_module(&self) -> Option<&ModuleId>;

    fn find_module(&self, name: &str) -> Option<&Self::Module> {
        self.modules().find(|m| m.id().name() == name)
    }

    fn module_by_id(&self, id: &ModuleId) -> Option<&Self::Module> {
        self.modules().find(|m| m.id() == id)
    }
}
