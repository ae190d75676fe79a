//! The before/after hook contract.

use crate::error::BoxError;
use crate::invocation::Invocation;
use crate::state::HookState;
use crate::value::{ErasedValue, ReturnValue};

/// A pair of before/after hooks applied around an intercepted call.
///
/// Both hooks are synchronous functions that *return* deferred objects when
/// the target method is asynchronous; suspension happens inside the dispatch
/// pipeline, never inside a hook. The dispatcher guarantees that for one
/// invocation the before hook completes (including, for deferred shapes,
/// awaiting the real call it triggered) strictly before the after hook
/// begins, and that the after hook completes before the call is reported
/// complete to the original caller.
///
/// # Skipping the real call
///
/// For every shape it is the default `before_invoke` that performs the real
/// invocation, via [`Invocation::proceed`]. An override that returns a
/// substitute [`ReturnValue`] without proceeding therefore suppresses the
/// real call entirely. This is a deliberate affordance of the contract, not
/// an accident; an override that wants the real call to happen must proceed
/// (or delegate to the default).
pub trait Interceptor: Send + Sync + 'static {
    /// Runs before the result is produced.
    ///
    /// The default proceeds with the real underlying method and returns its
    /// raw result unmodified. Overrides may wrap the proceed call, populate
    /// `state` for the after hook, or return a substitute result of the
    /// method's declared shape.
    fn before_invoke(
        &self,
        invocation: &mut Invocation,
        state: &mut HookState,
    ) -> Result<ReturnValue, BoxError> {
        let _ = state;
        invocation.proceed()
    }

    /// Runs after the result is produced (for deferred shapes, after the
    /// deferred unit of work resolved).
    ///
    /// The default is pass-through. `response` is `None` for the
    /// deferred-no-value shape, where the return value of this hook is
    /// discarded; for value-carrying shapes an override may inspect or
    /// replace the result, and must return `Some`.
    fn after_invoke(
        &self,
        invocation: &Invocation,
        response: Option<ErasedValue>,
        state: &mut HookState,
    ) -> Result<Option<ErasedValue>, BoxError> {
        let _ = (invocation, state);
        Ok(response)
    }
}
