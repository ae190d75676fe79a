//! Shape-aware hook sequencing around the proceed call.
//!
//! One pipeline function per shape. Each creates the call-scoped
//! [`HookState`], runs the before hook, checks that the hook honored the
//! shape contract, and runs the after hook. For the deferred shapes the whole
//! sequence lives inside the returned future, so hook failures surface
//! through the future rather than synchronously.

use crate::adapter::Adapter;
use crate::error::{BoxError, InterceptError};
use crate::interceptor::Interceptor;
use crate::invocation::Invocation;
use crate::shape::ShapeKind;
use crate::state::HookState;
use crate::value::{DeferredFuture, ErasedValue, ReturnValue};
use std::any::{Any, type_name};
use std::sync::Arc;

pub(crate) fn run_sync(
    interceptor: &dyn Interceptor,
    mut invocation: Invocation,
) -> Result<ReturnValue, InterceptError> {
    let method = invocation.method().name();
    let mut state = HookState::new();

    let raw = interceptor
        .before_invoke(&mut invocation, &mut state)
        .map_err(|source| InterceptError::Before { method, source })?;
    let value = match raw {
        ReturnValue::Sync(value) => value,
        other => {
            return Err(InterceptError::ShapeMismatch {
                method,
                expected: ShapeKind::Sync,
                actual: other.kind(),
            });
        }
    };

    let response = interceptor
        .after_invoke(&invocation, Some(value), &mut state)
        .map_err(|source| InterceptError::After { method, source })?;
    let response = response.ok_or(InterceptError::MissingResult { method })?;
    Ok(ReturnValue::Sync(response))
}

pub(crate) async fn run_deferred(
    interceptor: Arc<dyn Interceptor>,
    mut invocation: Invocation,
) -> Result<(), BoxError> {
    let method = invocation.method().name();
    let mut state = HookState::new();

    let raw = interceptor
        .before_invoke(&mut invocation, &mut state)
        .map_err(|source| InterceptError::Before { method, source })?;
    let future = match raw {
        ReturnValue::Deferred(future) => future,
        other => {
            return Err(InterceptError::ShapeMismatch {
                method,
                expected: ShapeKind::DeferredVoid,
                actual: other.kind(),
            }
            .into());
        }
    };

    // A failed unit of work propagates unchanged; the after hook never sees
    // a fabricated result.
    future.await?;

    // This shape has no result slot, so the after hook's return is discarded.
    interceptor
        .after_invoke(&invocation, None, &mut state)
        .map_err(|source| InterceptError::After { method, source })?;
    Ok(())
}

pub(crate) async fn run_deferred_value<T: Any + Send>(
    interceptor: Arc<dyn Interceptor>,
    mut invocation: Invocation,
) -> Result<ErasedValue, BoxError> {
    let method = invocation.method().name();
    let mut state = HookState::new();

    let raw = interceptor
        .before_invoke(&mut invocation, &mut state)
        .map_err(|source| InterceptError::Before { method, source })?;
    let future = match raw {
        ReturnValue::DeferredValue(future) => future,
        other => {
            return Err(InterceptError::ShapeMismatch {
                method,
                expected: ShapeKind::DeferredValue,
                actual: other.kind(),
            }
            .into());
        }
    };

    let resolved = future.await?;
    let resolved = resolved
        .downcast::<T>()
        .map_err(|_| InterceptError::CastFailed {
            method,
            expected: type_name::<T>(),
        })?;
    let resolved: ErasedValue = resolved;

    let response = interceptor
        .after_invoke(&invocation, Some(resolved), &mut state)
        .map_err(|source| InterceptError::After { method, source })?;
    let response = response.ok_or(InterceptError::MissingResult { method })?;
    // The replacement must still be a T; a bad cast surfaces here, at the
    // point of substitution.
    let response = response
        .downcast::<T>()
        .map_err(|_| InterceptError::CastFailed {
            method,
            expected: type_name::<T>(),
        })?;
    let response: ErasedValue = response;
    Ok(response)
}

/// Synthesize the adapter entry for carried type `T`.
///
/// Each monomorphization is the concretely-typed deferred-with-value
/// pipeline; the [`AdapterCache`](crate::AdapterCache) memoizes one per
/// distinct `T`.
pub(crate) fn synthesize<T: Any + Send>() -> Adapter {
    Arc::new(|interceptor, invocation| -> DeferredFuture<ErasedValue> {
        Box::pin(run_deferred_value::<T>(interceptor, invocation))
    })
}
