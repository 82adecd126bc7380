//! Runtime side of the accord convention engine: the loaded-metadata model,
//! the runtime filter evaluator, and the scanner/provider/dispatcher that
//! compose discovered extension units with caller overrides.

pub mod cache;
pub mod cancel;
pub mod context;
pub mod error;
pub mod evaluator;
pub mod metadata;
pub mod provider;
pub mod scanner;
pub mod unit;

pub use cache::DiscoveryCache;
pub use cancel::CancelToken;
pub use context::ConventionContext;
pub use error::{ConventionError, Result};
pub use evaluator::TypeQuery;
pub use metadata::{LoadedModules, ModuleMetadata, ModuleRecord, TypeMetadata};
pub use provider::ConventionProvider;
pub use scanner::{Activator, ConventionScanner};
pub use unit::{
    AsyncConvention, AsyncConventionFn, Convention, ConventionFn, DispatchMode, UnitCategory,
    UnitRegistration, UnitShape,
};
