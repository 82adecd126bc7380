//! Module identity, selection expressions, and candidate resolution.

pub mod descriptor;
pub mod resolution;
pub mod selection;

pub use descriptor::{ModuleId, ModuleMarker};
pub use resolution::resolve_modules;
pub use selection::{ModuleSelection, ResolutionPolicy};
