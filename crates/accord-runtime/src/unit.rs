//! Extension units and their contract shapes.
//!
//! A unit's contract is resolved once at registration into a closed set of
//! shapes, matched explicitly at dispatch time. A unit matching none of the
//! shapes a dispatch asks for is skipped, never an error, so heterogeneous
//! lists can be queried by multiple consumers.

use crate::cancel::CancelToken;
use crate::context::ConventionContext;
use accord_core::module::ModuleId;
use accord_core::naming::TypeIdent;
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::fmt;
use std::sync::Arc;

/// Direct synchronous contract: a stateful convention object.
pub trait Convention: Send + Sync {
    fn apply(&self, ctx: &mut ConventionContext) -> anyhow::Result<()>;
}

/// Direct asynchronous contract. The dispatcher awaits completion before
/// proceeding to the next unit; implementations should observe the
/// cancellation token promptly.
#[async_trait]
pub trait AsyncConvention: Send + Sync {
    async fn apply(&self, ctx: &mut ConventionContext, cancel: &CancelToken)
        -> anyhow::Result<()>;
}

/// Synchronous callable contract: `(context)`.
pub type ConventionFn = Arc<dyn Fn(&mut ConventionContext) -> anyhow::Result<()> + Send + Sync>;

/// Asynchronous callable contract: `(context, cancellation) -> future`.
pub type AsyncConventionFn = Arc<
    dyn for<'a> Fn(&'a mut ConventionContext, CancelToken) -> BoxFuture<'a, anyhow::Result<()>>
        + Send
        + Sync,
>;

/// The closed set of supported contract shapes.
#[derive(Clone)]
pub enum UnitShape {
    Direct(Arc<dyn Convention>),
    DirectAsync(Arc<dyn AsyncConvention>),
    Callable(ConventionFn),
    CallableAsync(AsyncConventionFn),
}

impl UnitShape {
    /// Whether this shape is invoked under the given dispatch mode.
    /// Synchronous dispatch cannot await, so async shapes are skipped there;
    /// asynchronous dispatch invokes every shape.
    pub fn matches(&self, mode: DispatchMode) -> bool {
        match mode {
            DispatchMode::Sync => matches!(self, Self::Direct(_) | Self::Callable(_)),
            DispatchMode::Async => true,
        }
    }
}

impl fmt::Debug for UnitShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Direct(_) => "Direct",
            Self::DirectAsync(_) => "DirectAsync",
            Self::Callable(_) => "Callable",
            Self::CallableAsync(_) => "CallableAsync",
        };
        f.write_str(name)
    }
}

/// Which contract pair a consumer is dispatching through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    Sync,
    Async,
}

/// Declared category of an extension unit, read by downstream consumers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnitCategory {
    System,
    #[default]
    Application,
}

/// One registered extension unit: identity, provenance, and contract shape.
#[derive(Debug, Clone)]
pub struct UnitRegistration {
    ident: TypeIdent,
    origin: Option<ModuleId>,
    category: UnitCategory,
    affinity: Option<String>,
    shape: UnitShape,
}

impl UnitRegistration {
    pub fn new(ident: TypeIdent, shape: UnitShape) -> Self {
        Self {
            ident,
            origin: None,
            category: UnitCategory::default(),
            affinity: None,
            shape,
        }
    }

    pub fn direct(ident: TypeIdent, convention: impl Convention + 'static) -> Self {
        Self::new(ident, UnitShape::Direct(Arc::new(convention)))
    }

    pub fn direct_async(ident: TypeIdent, convention: impl AsyncConvention + 'static) -> Self {
        Self::new(ident, UnitShape::DirectAsync(Arc::new(convention)))
    }

    pub fn callable(
        ident: TypeIdent,
        f: impl Fn(&mut ConventionContext) -> anyhow::Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self::new(ident, UnitShape::Callable(Arc::new(f)))
    }

    pub fn callable_async(ident: TypeIdent, f: AsyncConventionFn) -> Self {
        Self::new(ident, UnitShape::CallableAsync(f))
    }

    pub fn with_category(mut self, category: UnitCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_affinity(mut self, affinity: impl Into<String>) -> Self {
        self.affinity = Some(affinity.into());
        self
    }

    pub fn with_origin(mut self, origin: ModuleId) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Constructed-type identity of the unit; the exclusion key.
    pub fn ident(&self) -> &TypeIdent {
        &self.ident
    }

    /// Module the unit was discovered in, `None` for caller-registered units.
    pub fn origin(&self) -> Option<&ModuleId> {
        self.origin.as_ref()
    }

    pub fn category(&self) -> UnitCategory {
        self.category
    }

    pub fn affinity(&self) -> Option<&str> {
        self.affinity.as_deref()
    }

    pub fn shape(&self) -> &UnitShape {
        &self.shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_dispatch_matching() {
        let sync_unit = UnitRegistration::callable(TypeIdent::parse("t.A"), |_| Ok(()));
        assert!(sync_unit.shape().matches(DispatchMode::Sync));
        assert!(sync_unit.shape().matches(DispatchMode::Async));

        let async_unit = UnitRegistration::callable_async(
            TypeIdent::parse("t.B"),
            Arc::new(|_, _| Box::pin(async { Ok(()) })),
        );
        assert!(!async_unit.shape().matches(DispatchMode::Sync));
        assert!(async_unit.shape().matches(DispatchMode::Async));
    }
}
