use serde::{Deserialize, Serialize};

/// Structural kind of a type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum TypeKind {
    Array,
    Class,
    Delegate,
    Enum,
    Interface,
    Struct,
}

/// Structural trait flags a type may carry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum TypeTrait {
    Abstract,
    Sealed,
    Generic,
    ValueType,
    PubliclyVisible,
}
