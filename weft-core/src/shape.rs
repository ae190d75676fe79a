//! Return-shape classification.
//!
//! Every intercepted method declares a return type, and that type has exactly
//! one [`Shape`]: an ordinary synchronous return, a deferred unit of work with
//! no value, or a deferred unit of work carrying a value. Classification
//! happens on the *type*, never on a runtime value, so it can be resolved once
//! per distinct type and memoized in the [`ShapeCache`](crate::ShapeCache).

use crate::adapter::Adapter;
use crate::pipeline;
use std::any::{Any, TypeId, type_name};
use std::fmt;

/// The classification of a method's declared return type.
#[derive(Clone, Copy, Debug)]
pub enum Shape {
    /// Ordinary return, no deferred execution.
    Sync,
    /// Deferred unit of work producing no value.
    DeferredVoid,
    /// Deferred unit of work producing a value of the carried type.
    DeferredValue(CarriedType),
}

impl Shape {
    /// The payload-free kind of this shape, for diagnostics.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Sync => ShapeKind::Sync,
            Shape::DeferredVoid => ShapeKind::DeferredVoid,
            Shape::DeferredValue(_) => ShapeKind::DeferredValue,
        }
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Shape::DeferredValue(a), Shape::DeferredValue(b)) => a == b,
            (a, b) => a.kind() == b.kind(),
        }
    }
}

impl Eq for Shape {}

/// Payload-free mirror of [`Shape`] used in error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    /// Ordinary synchronous return.
    Sync,
    /// Deferred, no value.
    DeferredVoid,
    /// Deferred, value-carrying.
    DeferredValue,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Sync => f.write_str("sync"),
            ShapeKind::DeferredVoid => f.write_str("deferred void"),
            ShapeKind::DeferredValue => f.write_str("deferred value"),
        }
    }
}

/// Identity of the value type carried by a deferred-with-value return.
///
/// Besides the type identity itself, this carries the synthesizer for the
/// adapter monomorphized to that type, captured where the concrete type was
/// statically known (see [`Returnable`] for `Deferred<T>`).
#[derive(Clone, Copy, Debug)]
pub struct CarriedType {
    id: TypeId,
    name: &'static str,
    synthesize: fn() -> Adapter,
}

impl CarriedType {
    /// Capture the identity of the carried type `T`.
    pub fn of<T: Any + Send>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            synthesize: pipeline::synthesize::<T>,
        }
    }

    /// The `TypeId` of the carried type.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The name of the carried type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn synthesize(&self) -> Adapter {
        (self.synthesize)()
    }
}

impl PartialEq for CarriedType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CarriedType {}

/// Identity of a method's declared return type, as handed to the classifier.
///
/// Captures the `TypeId`, the type name (for signature formatting), and the
/// shape resolver of the declared type `R`. The resolver runs at most once per
/// distinct type; afterwards the cached [`Shape`] is used.
#[derive(Clone, Copy, Debug)]
pub struct ReturnType {
    id: TypeId,
    name: &'static str,
    resolve: fn() -> Shape,
}

impl ReturnType {
    /// Capture the identity of the declared return type `R`.
    pub fn of<R: Returnable>() -> Self {
        Self {
            id: TypeId::of::<R>(),
            name: type_name::<R>(),
            resolve: R::shape,
        }
    }

    /// The `TypeId` of the declared return type.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The name of the declared return type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn resolve(&self) -> Shape {
        (self.resolve)()
    }
}

/// A type that can appear as the declared return type of an intercepted
/// method.
///
/// The default classification is [`Shape::Sync`]; the crate overrides it for
/// [`Deferred<T>`](crate::Deferred) and provides one-line implementations for
/// the common std scalar and string types. Substrate code implements this for
/// its own synchronous return types:
///
/// ```rust,ignore
/// struct Report { /* ... */ }
/// impl Returnable for Report {}
/// ```
pub trait Returnable: Any + Send {
    /// Resolve the raw shape of this return type.
    fn shape() -> Shape {
        Shape::Sync
    }
}

macro_rules! sync_returnable {
    ($($t:ty),+ $(,)?) => {
        $(impl Returnable for $t {})+
    };
}

sync_returnable!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    &'static str,
    std::time::Duration,
    std::time::Instant,
    std::time::SystemTime,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Deferred;

    #[test]
    fn std_types_classify_sync() {
        assert_eq!(<() as Returnable>::shape(), Shape::Sync);
        assert_eq!(String::shape(), Shape::Sync);
        assert_eq!(u64::shape(), Shape::Sync);
    }

    #[test]
    fn deferred_unit_classifies_void() {
        assert_eq!(<Deferred as Returnable>::shape(), Shape::DeferredVoid);
    }

    #[test]
    fn deferred_value_carries_type() {
        match <Deferred<u32> as Returnable>::shape() {
            Shape::DeferredValue(carried) => {
                assert_eq!(carried.id(), TypeId::of::<u32>());
            }
            other => panic!("expected a deferred value shape, got {:?}", other.kind()),
        }
    }

    #[test]
    fn return_type_identity_is_stable() {
        let a = ReturnType::of::<Deferred<String>>();
        let b = ReturnType::of::<Deferred<String>>();
        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), ReturnType::of::<Deferred<u32>>().id());
    }

    #[test]
    fn shape_kind_display() {
        assert_eq!(ShapeKind::Sync.to_string(), "sync");
        assert_eq!(ShapeKind::DeferredVoid.to_string(), "deferred void");
        assert_eq!(ShapeKind::DeferredValue.to_string(), "deferred value");
    }
}
