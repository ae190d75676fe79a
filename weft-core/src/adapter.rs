//! Per-carried-type adapter entries.
//!
//! The deferred-with-value pipeline must await a value of a type that is not
//! known until the return type is inspected. For each distinct carried type
//! `T` the dispatcher therefore needs a concretely-typed entry point; the
//! monomorphized pipeline is synthesized once and memoized here.

use crate::interceptor::Interceptor;
use crate::invocation::Invocation;
use crate::shape::CarriedType;
use crate::value::{DeferredFuture, ErasedValue};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// A callable specialized to one carried value type: awaits the proceed
/// call's deferred value, runs the after hook on the resolved value, and
/// yields the (possibly replaced) result as a new deferred value.
pub type Adapter =
    Arc<dyn Fn(Arc<dyn Interceptor>, Invocation) -> DeferredFuture<ErasedValue> + Send + Sync>;

/// Process-wide cache of adapter entries keyed by carried value type.
///
/// Get-or-add semantics: synthesis runs outside the write lock, so concurrent
/// first-time requests for the same type may synthesize redundantly, but
/// exactly one entry is retained and reused as the source of truth. Entries
/// are never evicted.
#[derive(Default)]
pub struct AdapterCache {
    entries: RwLock<HashMap<TypeId, Adapter>>,
}

impl AdapterCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the adapter for `carried`, synthesizing on first encounter.
    pub fn get(&self, carried: &CarriedType) -> Adapter {
        if let Some(adapter) = self
            .entries
            .read()
            .expect("adapter cache poisoned")
            .get(&carried.id())
        {
            return Arc::clone(adapter);
        }
        let fresh = carried.synthesize();
        let mut entries = self.entries.write().expect("adapter cache poisoned");
        Arc::clone(entries.entry(carried.id()).or_insert(fresh))
    }

    /// Number of synthesized adapters.
    pub fn len(&self) -> usize {
        self.entries.read().expect("adapter cache poisoned").len()
    }

    /// Whether no adapter has been synthesized yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
