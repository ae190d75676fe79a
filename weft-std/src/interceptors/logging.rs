//! Before/after call logging.

use weft_core::{BoxError, ErasedValue, HookState, Interceptor, Invocation, ReturnValue};

/// An interceptor that logs a line before and after each intercepted call.
#[derive(Clone, Copy, Debug, Default)]
pub struct CallLoggingInterceptor;

impl Interceptor for CallLoggingInterceptor {
    fn before_invoke(
        &self,
        invocation: &mut Invocation,
        _state: &mut HookState,
    ) -> Result<ReturnValue, BoxError> {
        tracing::debug!(method = invocation.method().name(), "before");
        invocation.proceed()
    }

    fn after_invoke(
        &self,
        invocation: &Invocation,
        response: Option<ErasedValue>,
        _state: &mut HookState,
    ) -> Result<Option<ErasedValue>, BoxError> {
        tracing::debug!(method = invocation.method().name(), "after");
        Ok(response)
    }
}
