//! Declarative filter descriptors and their evaluation.
//!
//! Descriptors are pure data: constructing a filter never touches module
//! metadata, and evaluation is fully deferred to the walker. A filter set is
//! a logical AND across its descriptors; set-valued arguments inside one
//! descriptor are OR'd.

pub mod builder;
pub mod descriptor;
pub mod eval;

pub use builder::FilterSetBuilder;
pub use descriptor::{FilterSet, ModuleFilter, NameMode, ScopeMode, TypeFilter};
