//! Call-scoped hook state.

use std::any::Any;
use std::collections::HashMap;

/// Mutable, string-keyed storage threaded through the before and after hooks
/// of a single invocation.
///
/// A fresh `HookState` is created for every dispatched call and discarded when
/// the call completes; it is never shared across invocations, concurrent or
/// sequential. Use it to smuggle state (a started timer, a correlation id)
/// from the before hook to the after hook without widening the hook contract.
#[derive(Default)]
pub struct HookState {
    entries: HashMap<String, Box<dyn Any + Send>>,
}

impl HookState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Any + Send) {
        self.entries.insert(key.into(), Box::new(value));
    }

    /// Borrow the value stored under `key`, if present and of type `T`.
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.entries.get(key)?.downcast_ref()
    }

    /// Mutably borrow the value stored under `key`, if present and of type `T`.
    pub fn get_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.entries.get_mut(key)?.downcast_mut()
    }

    /// Remove and return the value stored under `key`.
    ///
    /// If the entry exists but is not a `T`, it is left in place and `None`
    /// is returned.
    pub fn take<T: Any>(&mut self, key: &str) -> Option<T> {
        let entry = self.entries.remove(key)?;
        match entry.downcast::<T>() {
            Ok(value) => Some(*value),
            Err(entry) => {
                self.entries.insert(key.to_string(), entry);
                None
            }
        }
    }

    /// Whether an entry exists under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the state holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
