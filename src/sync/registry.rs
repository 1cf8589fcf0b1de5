use std::{collections::HashMap, sync::Arc};

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::sched::WeightedSelector;

/// Handle to a selector stored in a [`SelectorRegistry`].
///
/// The mutex belongs to the caller side: the registry lock only guards which
/// selector is stored under which key, picking from a selector that other
/// threads can reach must go through this mutex.
pub type SharedSelector<T> = Arc<Mutex<WeightedSelector<T>>>;

/// Named collection of [`WeightedSelector`] instances, usually one per
/// upstream pool.
///
/// Any number of [`SelectorRegistry::get`] calls can run in parallel, while
/// [`SelectorRegistry::set`] excludes every other access to the map for the
/// duration of a single insert. Entries are never removed, only replaced.
#[derive(Debug)]
pub struct SelectorRegistry<T> {
    entries: RwLock<HashMap<String, SharedSelector<T>>>,
}

impl<T> Default for SelectorRegistry<T> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> SelectorRegistry<T> {
    /// Creates an empty [`SelectorRegistry`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the selector registered under `key`, if any.
    pub fn get(&self, key: &str) -> Option<SharedSelector<T>> {
        self.entries.read().get(key).cloned()
    }

    /// Registers `selector` under `key`, replacing the previous one.
    pub fn set(&self, key: impl Into<String>, selector: SharedSelector<T>) {
        let key = key.into();
        debug!(key = %key, "registering selector");
        self.entries.write().insert(key, selector);
    }

    /// Wraps `selector` in a [`SharedSelector`], registers it under `key` and
    /// returns the handle.
    pub fn insert(
        &self,
        key: impl Into<String>,
        selector: WeightedSelector<T>,
    ) -> SharedSelector<T> {
        let shared = Arc::new(Mutex::new(selector));
        self.set(key, Arc::clone(&shared));
        shared
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Sorted snapshot of the registered keys.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.read().keys().cloned().collect();
        keys.sort_unstable();
        keys
    }
}
