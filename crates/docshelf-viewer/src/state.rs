//! Persisted section collapse state.
//!
//! Stored as one JSON object under a fixed key: section id → `true` when
//! collapsed. A missing or unreadable blob reads as empty.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::platform::StateStore;

/// Section id → collapsed.
pub type SectionStates = BTreeMap<String, bool>;

/// Reads and writes [`SectionStates`] through a [`StateStore`].
pub struct SectionStateStore {
    store: Rc<dyn StateStore>,
    key: String,
}

impl SectionStateStore {
    /// Create a store that keeps its blob under `key`.
    #[must_use]
    pub fn new(store: Rc<dyn StateStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Read the stored states.
    #[must_use]
    pub fn load(&self) -> SectionStates {
        let Some(raw) = self.store.get(&self.key) else {
            return SectionStates::new();
        };
        match serde_json::from_str(&raw) {
            Ok(states) => states,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Ignoring unreadable section state");
                SectionStates::new()
            }
        }
    }

    /// Record one section's state, keeping every other stored entry.
    pub fn save(&self, section_id: &str, collapsed: bool) {
        let mut states = self.load();
        states.insert(section_id.to_owned(), collapsed);
        match serde_json::to_string(&states) {
            Ok(json) => self.store.set(&self.key, &json),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize section state"),
        }
    }
}
