//! Testing utilities for Weft.
//!
//! - [`RecordingInterceptor`]: records hook execution order into a shared sink
//! - [`SubstitutingInterceptor`]: suppresses the real call with a canned result
//! - [`InvocationCounter`]: counts real-body executions inside proceed closures

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use weft_core::{BoxError, ErasedValue, HookState, Interceptor, Invocation, ReturnValue};

/// An interceptor that records `before:<method>` / `after:<method>` events.
///
/// The sink is a plain `Arc<Mutex<Vec<String>>>` so a test (or a proceed
/// closure) can interleave its own markers and assert on the combined order.
///
/// # Example
///
/// ```rust,ignore
/// let sink = Arc::new(Mutex::new(Vec::new()));
/// let interceptor = RecordingInterceptor::with_sink(sink.clone());
/// // ... dispatch ...
/// assert_eq!(*sink.lock().unwrap(), ["before:design", "after:design"]);
/// ```
pub struct RecordingInterceptor {
    events: Arc<Mutex<Vec<String>>>,
}

impl RecordingInterceptor {
    /// Create a recorder with its own empty sink.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(Mutex::new(Vec::new())))
    }

    /// Create a recorder writing into an existing sink.
    pub fn with_sink(events: Arc<Mutex<Vec<String>>>) -> Self {
        Self { events }
    }

    /// A clone of the recorded events.
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    /// Number of recorded events.
    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Clear all recorded events.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl Default for RecordingInterceptor {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RecordingInterceptor {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
        }
    }
}

impl Interceptor for RecordingInterceptor {
    fn before_invoke(
        &self,
        invocation: &mut Invocation,
        _state: &mut HookState,
    ) -> Result<ReturnValue, BoxError> {
        self.events
            .lock()
            .unwrap()
            .push(format!("before:{}", invocation.method().name()));
        invocation.proceed()
    }

    fn after_invoke(
        &self,
        invocation: &Invocation,
        response: Option<ErasedValue>,
        _state: &mut HookState,
    ) -> Result<Option<ErasedValue>, BoxError> {
        self.events
            .lock()
            .unwrap()
            .push(format!("after:{}", invocation.method().name()));
        Ok(response)
    }
}

/// An interceptor whose before hook returns a substitute result without
/// proceeding, suppressing the real call entirely.
pub struct SubstitutingInterceptor {
    substitute: Box<dyn Fn() -> ReturnValue + Send + Sync>,
}

impl SubstitutingInterceptor {
    /// Create a suppressor producing its substitute from `substitute`.
    ///
    /// The factory is called once per dispatched invocation; it must produce
    /// a [`ReturnValue`] of the intercepted method's declared shape.
    pub fn new(substitute: impl Fn() -> ReturnValue + Send + Sync + 'static) -> Self {
        Self {
            substitute: Box::new(substitute),
        }
    }
}

impl Interceptor for SubstitutingInterceptor {
    fn before_invoke(
        &self,
        _invocation: &mut Invocation,
        _state: &mut HookState,
    ) -> Result<ReturnValue, BoxError> {
        Ok((self.substitute)())
    }
}

/// A cloneable atomic counter for counting real-body executions.
///
/// Move a clone into a proceed closure and assert on the original.
#[derive(Clone, Default)]
pub struct InvocationCounter {
    count: Arc<AtomicUsize>,
}

impl InvocationCounter {
    /// Create a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the counter.
    pub fn increment(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }

    /// Current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset to zero.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}
