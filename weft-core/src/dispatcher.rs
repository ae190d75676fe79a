//! The per-call dispatch entry point.

use crate::adapter::AdapterCache;
use crate::classify::ShapeCache;
use crate::error::InterceptError;
use crate::interceptor::Interceptor;
use crate::invocation::Invocation;
use crate::pipeline;
use crate::shape::Shape;
use crate::value::ReturnValue;
use std::sync::Arc;

/// Routes each intercepted call through the shape-appropriate hook pipeline.
///
/// The dispatcher performs no thread creation and is stateless across calls
/// apart from its two shared caches. Construct one at startup and share it
/// across call sites; a test can construct a fresh dispatcher with empty
/// caches.
#[derive(Default)]
pub struct Dispatcher {
    shapes: ShapeCache,
    adapters: AdapterCache,
}

impl Dispatcher {
    /// Create a dispatcher with empty caches.
    pub fn new() -> Self {
        Self::default()
    }

    /// The classification cache.
    pub fn shapes(&self) -> &ShapeCache {
        &self.shapes
    }

    /// The adapter cache.
    pub fn adapters(&self) -> &AdapterCache {
        &self.adapters
    }

    /// Dispatch one intercepted call through `interceptor`'s hooks.
    ///
    /// The synchronous shape runs to completion before this returns. The
    /// deferred shapes return immediately with a [`ReturnValue`] wrapping the
    /// pipeline's future; the caller decides whether and when to await it,
    /// and hook failures on those paths surface through that future.
    pub fn dispatch(
        &self,
        interceptor: Arc<dyn Interceptor>,
        invocation: Invocation,
    ) -> Result<ReturnValue, InterceptError> {
        match self.shapes.classify(invocation.method().return_type()) {
            Shape::Sync => pipeline::run_sync(interceptor.as_ref(), invocation),
            Shape::DeferredVoid => Ok(ReturnValue::Deferred(Box::pin(pipeline::run_deferred(
                interceptor,
                invocation,
            )))),
            Shape::DeferredValue(carried) => {
                let adapter = self.adapters.get(&carried);
                Ok(ReturnValue::DeferredValue(adapter(interceptor, invocation)))
            }
        }
    }
}
