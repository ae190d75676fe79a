//! Memoized result-shape classification.

use crate::shape::{ReturnType, Shape};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::RwLock;

/// Process-wide cache of return-type classifications.
///
/// Classification for a given type identity is resolved at most once and is
/// stable thereafter: the miss path re-checks under the write lock before
/// resolving, so concurrent first-time requests for the same type converge on
/// a single entry (first writer wins) without running the resolver twice.
/// Entries are never evicted; the return-type space is bounded by the set of
/// distinct intercepted methods.
#[derive(Default)]
pub struct ShapeCache {
    entries: RwLock<HashMap<TypeId, Shape>>,
}

impl ShapeCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `return_type`, resolving and caching on first encounter.
    pub fn classify(&self, return_type: &ReturnType) -> Shape {
        if let Some(shape) = self
            .entries
            .read()
            .expect("shape cache poisoned")
            .get(&return_type.id())
        {
            return *shape;
        }
        let mut entries = self.entries.write().expect("shape cache poisoned");
        // Double-checked: another caller may have resolved while we waited.
        *entries
            .entry(return_type.id())
            .or_insert_with(|| return_type.resolve())
    }

    /// Number of classified return types.
    pub fn len(&self) -> usize {
        self.entries.read().expect("shape cache poisoned").len()
    }

    /// Whether no return type has been classified yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
