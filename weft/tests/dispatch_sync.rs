//! Dispatch tests for the synchronous result shape.

use std::sync::Arc;
use weft::testing::{InvocationCounter, RecordingInterceptor, SubstitutingInterceptor};
use weft::{
    BoxError, Deferred, Dispatcher, ErasedValue, HookState, InterceptError, Interceptor,
    Invocation, ReturnValue,
};

mod common;
use common::{DefaultInterceptor, design, design_recorded, sink};

#[test]
fn default_hooks_pass_the_real_result_through() {
    let dispatcher = Dispatcher::new();
    let counter = InvocationCounter::new();

    let result = dispatcher
        .dispatch(Arc::new(DefaultInterceptor), design(3, counter.clone()))
        .unwrap();

    assert_eq!(
        result.into_sync::<String>("design").unwrap(),
        "designing 3 layers"
    );
    assert_eq!(counter.count(), 1);
}

#[test]
fn hooks_run_around_the_real_body_in_order() {
    let dispatcher = Dispatcher::new();
    let events = sink();
    let interceptor = RecordingInterceptor::with_sink(events.clone());

    let result = dispatcher
        .dispatch(Arc::new(interceptor), design_recorded(3, events.clone()))
        .unwrap();

    assert_eq!(
        result.into_sync::<String>("design").unwrap(),
        "designing 3 layers"
    );
    assert_eq!(
        *events.lock().unwrap(),
        ["before:design", "body", "after:design"]
    );
}

#[test]
fn substitute_before_hook_suppresses_the_real_call() {
    let dispatcher = Dispatcher::new();
    let counter = InvocationCounter::new();
    let interceptor = SubstitutingInterceptor::new(|| ReturnValue::sync("canned".to_string()));

    let result = dispatcher
        .dispatch(Arc::new(interceptor), design(3, counter.clone()))
        .unwrap();

    assert_eq!(result.into_sync::<String>("design").unwrap(), "canned");
    assert_eq!(counter.count(), 0, "real body must not have executed");
}

struct UppercasingInterceptor;

impl Interceptor for UppercasingInterceptor {
    fn after_invoke(
        &self,
        _invocation: &Invocation,
        response: Option<ErasedValue>,
        _state: &mut HookState,
    ) -> Result<Option<ErasedValue>, BoxError> {
        let text = response
            .and_then(|value| value.downcast::<String>().ok())
            .ok_or("expected a string result")?;
        Ok(Some(Box::new(text.to_uppercase())))
    }
}

#[test]
fn after_hook_can_replace_the_result() {
    let dispatcher = Dispatcher::new();
    let counter = InvocationCounter::new();

    let result = dispatcher
        .dispatch(Arc::new(UppercasingInterceptor), design(2, counter))
        .unwrap();

    assert_eq!(
        result.into_sync::<String>("design").unwrap(),
        "DESIGNING 2 LAYERS"
    );
}

struct WrongShapeInterceptor;

impl Interceptor for WrongShapeInterceptor {
    fn before_invoke(
        &self,
        _invocation: &mut Invocation,
        _state: &mut HookState,
    ) -> Result<ReturnValue, BoxError> {
        Ok(Deferred::ready(()).into())
    }
}

#[test]
fn deferred_result_on_a_sync_path_is_a_shape_mismatch() {
    let dispatcher = Dispatcher::new();
    let counter = InvocationCounter::new();

    let err = dispatcher
        .dispatch(Arc::new(WrongShapeInterceptor), design(3, counter))
        .unwrap_err();

    assert!(matches!(err, InterceptError::ShapeMismatch { .. }));
}

struct FailingBeforeInterceptor;

impl Interceptor for FailingBeforeInterceptor {
    fn before_invoke(
        &self,
        _invocation: &mut Invocation,
        _state: &mut HookState,
    ) -> Result<ReturnValue, BoxError> {
        Err("before exploded".into())
    }
}

#[test]
fn before_hook_failure_surfaces_with_stage_context() {
    let dispatcher = Dispatcher::new();
    let counter = InvocationCounter::new();

    let err = dispatcher
        .dispatch(Arc::new(FailingBeforeInterceptor), design(3, counter.clone()))
        .unwrap_err();

    match err {
        InterceptError::Before { method, source } => {
            assert_eq!(method, "design");
            assert_eq!(source.to_string(), "before exploded");
        }
        other => panic!("expected a before-stage error, got {other}"),
    }
    assert_eq!(counter.count(), 0);
}

struct DroppingAfterInterceptor;

impl Interceptor for DroppingAfterInterceptor {
    fn after_invoke(
        &self,
        _invocation: &Invocation,
        _response: Option<ErasedValue>,
        _state: &mut HookState,
    ) -> Result<Option<ErasedValue>, BoxError> {
        Ok(None)
    }
}

#[test]
fn after_hook_dropping_the_result_is_an_error() {
    let dispatcher = Dispatcher::new();
    let counter = InvocationCounter::new();

    let err = dispatcher
        .dispatch(Arc::new(DroppingAfterInterceptor), design(3, counter))
        .unwrap_err();

    assert!(matches!(err, InterceptError::MissingResult { .. }));
}

#[test]
fn sync_arguments_are_visible_to_hooks() {
    struct LayerAssertingInterceptor;

    impl Interceptor for LayerAssertingInterceptor {
        fn before_invoke(
            &self,
            invocation: &mut Invocation,
            _state: &mut HookState,
        ) -> Result<ReturnValue, BoxError> {
            assert_eq!(invocation.arg::<u32>(0), Some(&7));
            assert_eq!(
                invocation.signature(),
                "alloc::string::String design(u32 layers = 7)"
            );
            invocation.proceed()
        }
    }

    let dispatcher = Dispatcher::new();
    let counter = InvocationCounter::new();

    dispatcher
        .dispatch(Arc::new(LayerAssertingInterceptor), design(7, counter))
        .unwrap()
        .into_sync::<String>("design")
        .unwrap();
}
