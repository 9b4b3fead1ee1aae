//! In-memory platform ports for hosts without a browser.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::platform::{Location, StateStore};

/// [`StateStore`] backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
    }
}

/// [`Location`] with browser-like session history.
///
/// Fragment changes are not delivered anywhere; they are counted, and the
/// driver collects them with [`take_hash_change`](Self::take_hash_change)
/// and then handles the route, the way a browser queues `hashchange`.
#[derive(Debug)]
pub struct MemoryLocation {
    history: RefCell<Vec<String>>,
    index: Cell<usize>,
    pending: Cell<usize>,
}

impl Default for MemoryLocation {
    fn default() -> Self {
        Self::new("")
    }
}

impl MemoryLocation {
    /// Create a location currently at `fragment`.
    #[must_use]
    pub fn new(fragment: &str) -> Self {
        Self {
            history: RefCell::new(vec![fragment.to_owned()]),
            index: Cell::new(0),
            pending: Cell::new(0),
        }
    }

    /// Consume one queued hash-change notification.
    pub fn take_hash_change(&self) -> bool {
        let pending = self.pending.get();
        if pending == 0 {
            return false;
        }
        self.pending.set(pending - 1);
        true
    }

    /// Number of queued hash-change notifications.
    #[must_use]
    pub fn pending_hash_changes(&self) -> usize {
        self.pending.get()
    }

    /// Move `delta` steps through history if that stays in range.
    fn go(&self, delta: isize) {
        let len = self.history.borrow().len();
        if let Some(target) = self.index.get().checked_add_signed(delta)
            && target < len
        {
            self.index.set(target);
            self.pending.set(self.pending.get() + 1);
        }
    }
}

impl Location for MemoryLocation {
    fn fragment(&self) -> String {
        self.history
            .borrow()
            .get(self.index.get())
            .cloned()
            .unwrap_or_default()
    }

    fn set_fragment(&self, fragment: &str) {
        if self.fragment() == fragment {
            return;
        }
        let mut history = self.history.borrow_mut();
        let next = self.index.get() + 1;
        history.truncate(next);
        history.push(fragment.to_owned());
        self.index.set(next);
        self.pending.set(self.pending.get() + 1);
    }

    fn back(&self) {
        self.go(-1);
    }

    fn forward(&self) {
        self.go(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_round_trip() {
        let store = MemoryStore::new();

        assert_eq!(store.get("k"), None);
        store.set("k", "v");
        assert_eq!(store.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_set_fragment_queues_change() {
        let location = MemoryLocation::default();

        location.set_fragment("#/guide.html");

        assert_eq!(location.fragment(), "#/guide.html");
        assert!(location.take_hash_change());
        assert!(!location.take_hash_change());
    }

    #[test]
    fn test_same_fragment_is_not_a_change() {
        let location = MemoryLocation::new("#/guide.html");

        location.set_fragment("#/guide.html");

        assert_eq!(location.pending_hash_changes(), 0);
    }

    #[test]
    fn test_back_and_forward() {
        let location = MemoryLocation::new("#/a.html");
        location.set_fragment("#/b.html");
        location.set_fragment("#/c.html");

        location.back();
        location.back();
        location.back(); // Already at the start
        assert_eq!(location.fragment(), "#/a.html");

        location.forward();
        assert_eq!(location.fragment(), "#/b.html");

        location.set_fragment("#/d.html"); // Drops c from forward history
        location.forward();
        assert_eq!(location.fragment(), "#/d.html");
        assert_eq!(location.pending_hash_changes(), 6);
    }
}
