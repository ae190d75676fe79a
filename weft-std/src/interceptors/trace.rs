//! Call tracing with formatted signatures.

use weft_core::{BoxError, ErasedValue, HookState, Interceptor, Invocation, ReturnValue};

/// An interceptor that logs the formatted signature of each completed call.
///
/// Uses the default before hook, so the real method always runs; the trace
/// line is emitted from the after hook, once the result (for deferred shapes,
/// the resolved result) is available.
#[derive(Clone, Copy, Debug, Default)]
pub struct CallTraceInterceptor;

impl Interceptor for CallTraceInterceptor {
    fn after_invoke(
        &self,
        invocation: &Invocation,
        response: Option<ErasedValue>,
        _state: &mut HookState,
    ) -> Result<Option<ErasedValue>, BoxError> {
        tracing::info!(
            signature = %invocation.signature(),
            returned = response.is_some(),
            "call completed"
        );
        Ok(response)
    }
}
