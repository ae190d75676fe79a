//! # weft - Hybrid Method Interception
//!
//! `weft` applies before/after cross-cutting hooks (logging, tracing, timing)
//! uniformly around intercepted method calls, whatever the shape of the
//! target method's result: an ordinary synchronous return, a deferred unit of
//! work with no value, or a deferred unit of work carrying a typed value.
//!
//! The interception substrate (proxy weaving, registration) is an external
//! collaborator: it captures a call into an [`Invocation`] and hands it to
//! [`Dispatcher::dispatch`] together with the [`Interceptor`] whose hooks
//! should run. Classification of the declared return type and the
//! per-carried-type invocation adapters are memoized process-wide, so
//! repeated calls pay no resolution cost.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use weft::{Deferred, Dispatcher, Invocation, ReturnType, ReturnValue};
//! use weft::interceptors::TimingInterceptor;
//!
//! let dispatcher = Dispatcher::new();
//!
//! // Captured by the substrate: `design(layers: u32) -> String`
//! let invocation = Invocation::builder("design", ReturnType::of::<String>())
//!     .arg("layers", 3u32)
//!     .build(|| Ok(ReturnValue::sync("three-layer design".to_string())));
//!
//! let result = dispatcher.dispatch(Arc::new(TimingInterceptor), invocation)?;
//! let design: String = result.into_sync("design")?;
//! ```
//!
//! Deferred shapes return immediately with a future the caller awaits:
//!
//! ```rust,ignore
//! let invocation = Invocation::builder("log", ReturnType::of::<Deferred>())
//!     .build(|| Ok(Deferred::new(async { /* ... */ Ok(()) }).into()));
//! let pending = dispatcher.dispatch(interceptor, invocation)?;
//! pending.into_deferred("log")?.await?;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use weft_core::{
    // Adapter cache
    Adapter,
    AdapterCache,
    Arg,
    // Errors
    BoxError,
    CarriedType,
    // Deferred values
    Deferred,
    DeferredFuture,
    // Dispatch
    Dispatcher,
    ErasedValue,
    // Hook contract
    HookState,
    InterceptError,
    Interceptor,
    // Invocation descriptors
    Invocation,
    InvocationBuilder,
    MethodInfo,
    ParamInfo,
    ReturnType,
    ReturnValue,
    Returnable,
    // Classification
    Shape,
    ShapeCache,
    ShapeKind,
};

/// Standard interceptor implementations.
pub mod interceptors {
    pub use weft_std::interceptors::{
        CallLoggingInterceptor, CallTraceInterceptor, STARTED_AT_KEY, TimingInterceptor,
    };
}

/// Testing utilities.
pub mod testing {
    pub use weft_std::testing::{InvocationCounter, RecordingInterceptor, SubstitutingInterceptor};
}

/// Prelude module - common imports for Weft.
///
/// # Usage
///
/// ```rust,ignore
/// use weft::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, Deferred, Dispatcher, HookState, InterceptError, Interceptor, Invocation,
        ReturnType, ReturnValue, Returnable,
    };
}
