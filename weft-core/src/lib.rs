//! # weft-core
//!
//! Core types and dispatch pipeline for the Weft method-interception
//! framework.
//!
//! Weft applies before/after cross-cutting hooks uniformly around an
//! intercepted method call, whether the target method is synchronous,
//! returns a deferred unit of work with no value, or returns a deferred unit
//! of work carrying a typed value. This crate holds the per-call dispatch
//! core; the proxy-generation substrate that captures calls and the concrete
//! hook implementations live outside it.
//!
//! # Dispatch flow
//!
//! 1. The substrate captures a call into an [`Invocation`]: method identity,
//!    argument values, and the proceed capability.
//! 2. [`Dispatcher::dispatch`] classifies the declared return type via the
//!    memoizing [`ShapeCache`] into one of the three [`Shape`]s.
//! 3. The call is routed to the matching pipeline: inline for `Sync`, inside
//!    a returned future for `DeferredVoid`, and through a per-carried-type
//!    entry from the [`AdapterCache`] for `DeferredValue`.
//! 4. The [`Interceptor`]'s before hook runs (by default proceeding with the
//!    real call), the result is awaited where deferred, and the after hook
//!    runs on the resolved result before the call completes.
//!
//! Both caches are append-only and shared for the process lifetime; the
//! per-call [`HookState`] is never shared between invocations.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod adapter;
mod classify;
mod dispatcher;
mod error;
mod interceptor;
mod invocation;
mod pipeline;
mod shape;
mod state;
mod value;

pub use adapter::{Adapter, AdapterCache};
pub use classify::ShapeCache;
pub use dispatcher::Dispatcher;
pub use error::{BoxError, InterceptError};
pub use interceptor::Interceptor;
pub use invocation::{Arg, Invocation, InvocationBuilder, MethodInfo, ParamInfo};
pub use shape::{CarriedType, ReturnType, Returnable, Shape, ShapeKind};
pub use state::HookState;
pub use value::{Deferred, DeferredFuture, ErasedValue, ReturnValue};
