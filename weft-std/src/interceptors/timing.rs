//! Call timing via hook state.

use std::time::Instant;
use weft_core::{BoxError, ErasedValue, HookState, Interceptor, Invocation, ReturnValue};

/// Hook-state key under which the start instant is stored.
pub const STARTED_AT_KEY: &str = "weft.timing.started_at";

/// An interceptor that measures how long each intercepted call takes.
///
/// The before hook records a start instant in the call-scoped [`HookState`]
/// and proceeds; the after hook takes the instant back out and logs the
/// elapsed time. Because hook state is created fresh per invocation, timings
/// never leak between calls.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimingInterceptor;

impl Interceptor for TimingInterceptor {
    fn before_invoke(
        &self,
        invocation: &mut Invocation,
        state: &mut HookState,
    ) -> Result<ReturnValue, BoxError> {
        state.insert(STARTED_AT_KEY, Instant::now());
        invocation.proceed()
    }

    fn after_invoke(
        &self,
        invocation: &Invocation,
        response: Option<ErasedValue>,
        state: &mut HookState,
    ) -> Result<Option<ErasedValue>, BoxError> {
        if let Some(started_at) = state.take::<Instant>(STARTED_AT_KEY) {
            tracing::info!(
                signature = %invocation.signature(),
                elapsed_us = started_at.elapsed().as_micros() as u64,
                "call timed"
            );
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_core::ReturnType;

    fn develop() -> Invocation {
        Invocation::builder("develop", ReturnType::of::<()>())
            .build(|| Ok(ReturnValue::sync(())))
    }

    #[test]
    fn before_records_a_start_instant() {
        let interceptor = TimingInterceptor;
        let mut invocation = develop();
        let mut state = HookState::new();

        interceptor
            .before_invoke(&mut invocation, &mut state)
            .unwrap();
        assert!(state.get::<Instant>(STARTED_AT_KEY).is_some());
    }

    #[test]
    fn after_consumes_the_marker() {
        let interceptor = TimingInterceptor;
        let mut invocation = develop();
        let mut state = HookState::new();

        let raw = interceptor
            .before_invoke(&mut invocation, &mut state)
            .unwrap();
        let value = match raw {
            ReturnValue::Sync(value) => value,
            other => panic!("unexpected shape: {:?}", other.kind()),
        };
        let response = interceptor
            .after_invoke(&invocation, Some(value), &mut state)
            .unwrap();
        assert!(response.is_some());
        assert!(!state.contains_key(STARTED_AT_KEY));
    }

    #[test]
    fn after_without_marker_is_harmless() {
        let interceptor = TimingInterceptor;
        let invocation = develop();
        let mut state = HookState::new();

        let response = interceptor.after_invoke(&invocation, None, &mut state).unwrap();
        assert!(response.is_none());
    }
}
