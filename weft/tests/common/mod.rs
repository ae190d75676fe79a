//! Shared fixtures: hand-built invocations standing in for the interception
//! substrate, modeled on a small service with one method per result shape.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};
use weft::testing::InvocationCounter;
use weft::{Deferred, Interceptor, Invocation, ReturnType, ReturnValue};

/// Events sink shared between interceptors and proceed closures.
pub type Sink = Arc<Mutex<Vec<String>>>;

/// Create an empty event sink.
pub fn sink() -> Sink {
    Arc::new(Mutex::new(Vec::new()))
}

/// Push a marker into a sink.
pub fn record(sink: &Sink, event: impl Into<String>) {
    sink.lock().unwrap().push(event.into());
}

/// An interceptor with both hooks left at their defaults.
pub struct DefaultInterceptor;

impl Interceptor for DefaultInterceptor {}

/// `design(layers: u32) -> String` — the synchronous shape.
pub fn design(layers: u32, counter: InvocationCounter) -> Invocation {
    Invocation::builder("design", ReturnType::of::<String>())
        .arg("layers", layers)
        .build(move || {
            counter.increment();
            Ok(ReturnValue::sync(format!("designing {layers} layers")))
        })
}

/// Like [`design`], but the body also records a `body` marker.
pub fn design_recorded(layers: u32, events: Sink) -> Invocation {
    Invocation::builder("design", ReturnType::of::<String>())
        .arg("layers", layers)
        .build(move || {
            record(&events, "body");
            Ok(ReturnValue::sync(format!("designing {layers} layers")))
        })
}

/// `log() -> Deferred` — the deferred-no-value shape. The body suspends
/// briefly before completing, so ordering tests catch an after hook that runs
/// too early.
pub fn log(events: Sink) -> Invocation {
    Invocation::builder("log", ReturnType::of::<Deferred>()).build(move || {
        Ok(Deferred::new(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            record(&events, "body");
            Ok(())
        })
        .into())
    })
}

/// `log()` whose body fails after suspending.
pub fn failing_log() -> Invocation {
    Invocation::builder("log", ReturnType::of::<Deferred>()).build(|| {
        Ok(Deferred::<()>::new(async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            Err("log backend unavailable".into())
        })
        .into())
    })
}

/// `get_time() -> Deferred<SystemTime>` — the deferred-with-value shape.
pub fn get_time(counter: InvocationCounter) -> Invocation {
    Invocation::builder("get_time", ReturnType::of::<Deferred<SystemTime>>()).build(move || {
        Ok(Deferred::new(async move {
            tokio::time::sleep(Duration::from_millis(1)).await;
            counter.increment();
            Ok(SystemTime::now())
        })
        .into())
    })
}

/// `get_time()` whose body fails after suspending.
pub fn failing_get_time() -> Invocation {
    Invocation::builder("get_time", ReturnType::of::<Deferred<SystemTime>>()).build(|| {
        Ok(Deferred::<SystemTime>::new(async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            Err("clock drift".into())
        })
        .into())
    })
}

/// A generic deferred-with-value invocation resolving to `value`.
pub fn deferred_value_of<T>(name: &'static str, value: T) -> Invocation
where
    T: std::any::Any + Send,
{
    Invocation::builder(name, ReturnType::of::<Deferred<T>>())
        .build(move || Ok(Deferred::ready(value).into()))
}
