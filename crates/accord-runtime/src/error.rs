//! Error types for convention composition and dispatch.

use accord_core::TypeIdent;
use thiserror::Error;

/// Result type for convention operations.
pub type Result<T> = std::result::Result<T, ConventionError>;

/// Errors that can occur while composing or dispatching conventions.
#[derive(Debug, Error)]
pub enum ConventionError {
    /// Constructing a discovered extension unit failed. This is fatal: a
    /// misconfigured unit must stop the host rather than silently run
    /// partially.
    #[error("Failed to activate extension unit {ident}")]
    Activation {
        /// Identity of the unit type being constructed
        ident: TypeIdent,
        #[source]
        source: anyhow::Error,
    },

    /// An extension unit failed during dispatch; remaining units were
    /// not invoked.
    #[error("Extension unit {ident} failed during dispatch")]
    Unit {
        /// Identity of the failing unit
        ident: TypeIdent,
        #[source]
        source: anyhow::Error,
    },

    /// Dispatch was cancelled before the named unit ran; remaining units
    /// were aborted.
    #[error("Dispatch cancelled before unit {ident}")]
    Cancelled {
        /// Identity of the first unit that did not run
        ident: TypeIdent,
    },

    /// The scanner was sealed and no longer accepts overrides.
    #[error("Scanner is sealed; prepend/append/except are no longer accepted")]
    Sealed,

    /// Generic errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
