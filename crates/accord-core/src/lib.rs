pub mod facts;
pub mod filter;
pub mod module;
pub mod naming;

// Re-export commonly used items for convenience
pub use facts::{ModuleFacts, ProgramFacts, TypeFacts, TypeKind, TypeTrait};
pub use filter::{FilterSet, ModuleFilter, NameMode, ScopeMode, TypeFilter};
pub use module::{ModuleId, ModuleMarker, ModuleSelection, ResolutionPolicy};
pub use naming::{MarkerRef, NamingScope, TypeIdent};
