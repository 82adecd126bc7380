//! Naming model: hierarchical naming scopes and stable type identities.

pub mod marker;
pub mod scope;
pub mod type_ident;

pub use marker::{marker_base, MarkerRef};
pub use scope::NamingScope;
pub use type_ident::TypeIdent;
