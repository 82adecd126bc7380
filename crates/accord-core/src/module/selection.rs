use super::ModuleId;
use serde::{Deserialize, Serialize};

/// Abstract module-selection expression resolved into an ordered module list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleSelection {
    /// The module hosting the program entry point.
    This,
    /// All known modules, in load/registration order.
    All,
    /// The transitive dependency closure of the given module, leaf
    /// dependencies first, the module itself last, deduplicated.
    DependenciesOf(ModuleId),
    /// A single module by name.
    Named(String),
}

/// Cross-cutting resolution policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionPolicy {
    /// Core/system modules are excluded unless this is set.
    pub include_system: bool,
}

impl ResolutionPolicy {
    pub fn with_system_modules() -> Self {
        Self {
            include_system: true,
        }
    }
}
