//! The frozen ordered unit list and its dispatcher.

use crate::cancel::CancelToken;
use crate::context::ConventionContext;
use crate::error::{ConventionError, Result};
use crate::unit::{DispatchMode, UnitCategory, UnitRegistration, UnitShape};
use tracing::trace;

/// Immutable, deterministic ordered sequence of extension units.
///
/// Dispatch is always sequential and in list order: conventions may depend on
/// host state mutated by earlier units. There is no mutating API; overrides
/// go through a scanner rebuild.
#[derive(Debug)]
pub struct ConventionProvider {
    units: Vec<UnitRegistration>,
}

impl ConventionProvider {
    pub(crate) fn new(units: Vec<UnitRegistration>) -> Self {
        Self { units }
    }

    pub fn units(&self) -> &[UnitRegistration] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Units whose shape is invoked under the given dispatch mode, in list
    /// order.
    pub fn matching(&self, mode: DispatchMode) -> impl Iterator<Item = &UnitRegistration> {
        self.units.iter().filter(move |u| u.shape().matches(mode))
    }

    pub fn by_category(&self, category: UnitCategory) -> impl Iterator<Item = &UnitRegistration> {
        self.units.iter().filter(move |u| u.category() == category)
    }

    /// Synchronous dispatch: invokes the direct and callable sync contracts
    /// in list order. Units with async-only shapes are skipped, not errors.
    /// A failing unit aborts the remaining sequence.
    pub fn apply(&self, ctx: &mut ConventionContext) -> Result<()> {
        for unit in &self.units {
            let outcome = match unit.shape() {
                UnitShape::Direct(convention) => convention.apply(ctx),
                UnitShape::Callable(f) => f(ctx),
                UnitShape::DirectAsync(_) | UnitShape::CallableAsync(_) => {
                    trace!(unit = %unit.ident(), "async-only unit skipped by sync dispatch");
                    continue;
                }
            };
            outcome.map_err(|source| ConventionError::Unit {
                ident: unit.ident().clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Asynchronous dispatch: invokes all four contract shapes in list
    /// order, awaiting each async unit before proceeding. The cancellation
    /// token is checked before every unit and threaded through every async
    /// call; observed cancellation aborts the remaining sequence and
    /// propagates. Unit failures are never retried.
    pub async fn apply_async(
        &self,
        ctx: &mut ConventionContext,
        cancel: CancelToken,
    ) -> Result<()> {
        for unit in &self.units {
            if cancel.is_cancelled() {
                return Err(ConventionError::Cancelled {
                    ident: unit.ident().clone(),
                });
            }
            let outcome = match unit.shape() {
                UnitShape::Direct(convention) => convention.apply(ctx),
                UnitShape::Callable(f) => f(ctx),
                UnitShape::DirectAsync(convention) => convention.apply(ctx, &cancel).await,
                UnitShape::CallableAsync(f) => f(ctx, cancel.clone()).await,
            };
            outcome.map_err(|source| ConventionError::Unit {
                ident: unit.ident().clone(),
                source,
            })?;
        }
        Ok(())
    }
}
