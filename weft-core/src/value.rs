//! Deferred units of work and type-erased return values.
//!
//! [`Deferred<T>`] is the declared return type of asynchronous target methods:
//! `Deferred<()>` is the deferred-no-value shape, any other `Deferred<T>` the
//! deferred-with-value shape. [`ReturnValue`] is the raw, type-erased result a
//! proceed call (or the pipeline itself) hands around; the typed extractors on
//! it are what the interception substrate uses to return a concrete value to
//! the proxied caller.

use crate::error::{BoxError, InterceptError};
use crate::shape::{CarriedType, Returnable, Shape, ShapeKind};
use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A type-erased result value.
pub type ErasedValue = Box<dyn Any + Send>;

/// A boxed future resolving to a value or a failure.
pub type DeferredFuture<T> = Pin<Box<dyn Future<Output = Result<T, BoxError>> + Send + 'static>>;

/// A deferred unit of work eventually resolving to a value of type `T`.
///
/// Failure of the underlying work manifests as the future resolving to `Err`;
/// the pipeline propagates that failed state unchanged. `Deferred<T>`
/// implements [`Future`], so callers can await it directly.
pub struct Deferred<T = ()> {
    inner: DeferredFuture<T>,
}

impl<T: Any + Send> Deferred<T> {
    /// Wrap a future as a deferred unit of work.
    pub fn new(future: impl Future<Output = Result<T, BoxError>> + Send + 'static) -> Self {
        Self {
            inner: Box::pin(future),
        }
    }

    /// A deferred unit of work that resolves immediately.
    pub fn ready(value: T) -> Self {
        Self::new(std::future::ready(Ok(value)))
    }

    /// A deferred unit of work that fails immediately.
    pub fn fail(error: impl Into<BoxError>) -> Self {
        let error = error.into();
        Self::new(std::future::ready(Err(error)))
    }

    /// Rebuild a typed deferred from an erased pipeline future.
    ///
    /// The erased future's resolved value must downcast to `T`; a mismatch
    /// surfaces as [`InterceptError::CastFailed`] when awaited.
    pub fn from_erased(method: &'static str, future: DeferredFuture<ErasedValue>) -> Self {
        Self::new(async move {
            let value = future.await?;
            let value = value.downcast::<T>().map_err(|_| InterceptError::CastFailed {
                method,
                expected: type_name::<T>(),
            })?;
            Ok(*value)
        })
    }
}

impl<T> Future for Deferred<T> {
    type Output = Result<T, BoxError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.get_mut().inner.as_mut().poll(cx)
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Deferred")
    }
}

impl<T: Any + Send> Returnable for Deferred<T> {
    fn shape() -> Shape {
        if TypeId::of::<T>() == TypeId::of::<()>() {
            Shape::DeferredVoid
        } else {
            Shape::DeferredValue(CarriedType::of::<T>())
        }
    }
}

/// The raw, type-erased result of a proceed call or of the dispatch pipeline.
pub enum ReturnValue {
    /// Ordinary synchronous result.
    Sync(ErasedValue),
    /// Deferred unit of work with no value.
    Deferred(DeferredFuture<()>),
    /// Deferred unit of work resolving to an erased value.
    DeferredValue(DeferredFuture<ErasedValue>),
}

impl ReturnValue {
    /// Wrap a synchronous result value.
    pub fn sync(value: impl Any + Send) -> Self {
        Self::Sync(Box::new(value))
    }

    /// The shape kind of this value, for diagnostics.
    pub fn kind(&self) -> ShapeKind {
        match self {
            ReturnValue::Sync(_) => ShapeKind::Sync,
            ReturnValue::Deferred(_) => ShapeKind::DeferredVoid,
            ReturnValue::DeferredValue(_) => ShapeKind::DeferredValue,
        }
    }

    /// Extract a synchronous result, downcast to `T`.
    pub fn into_sync<T: Any>(self, method: &'static str) -> Result<T, InterceptError> {
        match self {
            ReturnValue::Sync(value) => value.downcast::<T>().map(|boxed| *boxed).map_err(|_| {
                InterceptError::CastFailed {
                    method,
                    expected: type_name::<T>(),
                }
            }),
            other => Err(InterceptError::ShapeMismatch {
                method,
                expected: ShapeKind::Sync,
                actual: other.kind(),
            }),
        }
    }

    /// Extract a deferred-no-value result.
    pub fn into_deferred(self, method: &'static str) -> Result<Deferred<()>, InterceptError> {
        match self {
            ReturnValue::Deferred(future) => Ok(Deferred { inner: future }),
            other => Err(InterceptError::ShapeMismatch {
                method,
                expected: ShapeKind::DeferredVoid,
                actual: other.kind(),
            }),
        }
    }

    /// Extract a deferred-with-value result typed to `T`.
    pub fn into_deferred_value<T: Any + Send>(
        self,
        method: &'static str,
    ) -> Result<Deferred<T>, InterceptError> {
        match self {
            ReturnValue::DeferredValue(future) => Ok(Deferred::from_erased(method, future)),
            other => Err(InterceptError::ShapeMismatch {
                method,
                expected: ShapeKind::DeferredValue,
                actual: other.kind(),
            }),
        }
    }
}

impl<T: Any + Send> From<Deferred<T>> for ReturnValue {
    fn from(deferred: Deferred<T>) -> Self {
        let inner = deferred.inner;
        if TypeId::of::<T>() == TypeId::of::<()>() {
            ReturnValue::Deferred(Box::pin(async move { inner.await.map(|_| ()) }))
        } else {
            ReturnValue::DeferredValue(Box::pin(async move {
                let value = inner.await?;
                Ok(Box::new(value) as ErasedValue)
            }))
        }
    }
}

impl fmt::Debug for ReturnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReturnValue({})", self.kind())
    }
}
