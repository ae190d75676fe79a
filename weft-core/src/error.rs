//! Error types for Weft.
//!
//! The dispatch core surfaces every failure to the caller; nothing is
//! swallowed or logged-and-forgotten. Hook-stage failures are wrapped with
//! stage context via [`InterceptError`]; failures of an awaited deferred unit
//! of work propagate unchanged through the pipeline's future.

use crate::shape::ShapeKind;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by the dispatch pipeline.
#[derive(Error, Debug)]
pub enum InterceptError {
    /// The before hook (or the real call it proceeded to) failed.
    #[error("before hook failed for `{method}`")]
    Before {
        /// Name of the intercepted method.
        method: &'static str,
        /// The hook's underlying error.
        #[source]
        source: BoxError,
    },

    /// The after hook failed.
    #[error("after hook failed for `{method}`")]
    After {
        /// Name of the intercepted method.
        method: &'static str,
        /// The hook's underlying error.
        #[source]
        source: BoxError,
    },

    /// A hook produced a result of the wrong shape for the dispatch path
    /// taken. This is a contract violation in the hook, not in the target.
    #[error("`{method}` expected a {expected} result, the hook produced a {actual} result")]
    ShapeMismatch {
        /// Name of the intercepted method.
        method: &'static str,
        /// Shape the dispatch path required.
        expected: ShapeKind,
        /// Shape the hook actually returned.
        actual: ShapeKind,
    },

    /// A result value could not be downcast to the expected carried type.
    #[error("`{method}` result could not be downcast to `{expected}`")]
    CastFailed {
        /// Name of the intercepted method.
        method: &'static str,
        /// Name of the expected carried type.
        expected: &'static str,
    },

    /// The after hook returned no result on a value-carrying path.
    #[error("after hook for `{method}` returned no result for a value-carrying shape")]
    MissingResult {
        /// Name of the intercepted method.
        method: &'static str,
    },

    /// The proceed capability was invoked more than once.
    #[error("proceed capability for `{method}` was already consumed")]
    ProceedConsumed {
        /// Name of the intercepted method.
        method: &'static str,
    },
}
