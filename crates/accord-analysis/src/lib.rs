//! Static side of the accord convention engine: a build-time symbol graph
//! and a filter evaluator over it.
//!
//! For any fixed module set and filter set, this evaluator must select the
//! same ordered type identities as the runtime evaluator observing the same
//! compiled output. Both are instantiations of the walker in `accord-core`,
//! so that contract is carried by shared code, not discipline.

pub mod evaluator;
pub mod symbols;

pub use evaluator::{ScanMode, SymbolQuery};
pub use symbols::{ModuleSymbol, ScopeSymbol, SymbolGraph, TypeSymbol};
