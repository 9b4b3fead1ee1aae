//! Sidebar search.
//!
//! The index is a snapshot of the sidebar taken once at startup. Filtering
//! works from that snapshot, so highlights are always rebuilt from the
//! original labels and clearing restores them exactly.

use std::rc::Rc;

use docshelf_config::{Messages, SearchConfig};

use crate::debounce::Debouncer;
use crate::highlight::{contains_ignore_case, find_matches};
use crate::navigation::KeyPress;
use crate::platform::{Platform, SearchInput, Timer};
use crate::sidebar::{SharedSidebar, Sidebar};

/// One indexed sidebar entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexEntry {
    /// Index of the entry in the sidebar.
    pub entry: usize,
    /// Label text.
    pub label: String,
    /// Raw `data-path` attribute.
    pub path: Option<String>,
    /// Owning section's title, or the placeholder for unknown sections.
    pub section: String,
}

impl IndexEntry {
    fn matches(&self, query: &str) -> bool {
        contains_ignore_case(&self.label, query) || contains_ignore_case(&self.section, query)
    }
}

/// Snapshot of the searchable sidebar entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
}

impl SearchIndex {
    /// Index every entry of `sidebar`.
    ///
    /// Entries outside a section, or in a section without a title, are
    /// indexed under `unknown_section`.
    #[must_use]
    pub fn build(sidebar: &Sidebar, unknown_section: &str) -> Self {
        let entries = sidebar
            .entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| IndexEntry {
                entry: index,
                label: entry.label().to_owned(),
                path: entry.path().map(str::to_owned),
                section: sidebar
                    .section_title_of(index)
                    .unwrap_or(unknown_section)
                    .to_owned(),
            })
            .collect();
        Self { entries }
    }

    /// Indexed entries in sidebar order.
    #[must_use]
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Number of indexed entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Filters the sidebar as the reader types.
pub struct SearchController {
    index: SearchIndex,
    sidebar: SharedSidebar,
    debouncer: Debouncer<String>,
    timer: Rc<dyn Timer>,
    input: Option<Rc<dyn SearchInput>>,
}

impl SearchController {
    /// Create a controller and index the sidebar as it is now.
    #[must_use]
    pub fn new(
        config: &SearchConfig,
        messages: &Messages,
        sidebar: SharedSidebar,
        platform: &Platform,
    ) -> Self {
        let index = SearchIndex::build(&sidebar.borrow(), &messages.unknown_section);
        if platform.search_input.is_none() {
            tracing::debug!("No search input, search disabled");
        }
        Self {
            index,
            sidebar,
            debouncer: Debouncer::new(config.debounce()),
            timer: Rc::clone(&platform.timer),
            input: platform.search_input.clone(),
        }
    }

    /// Whether the page has a search input.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.input.is_some()
    }

    /// The index snapshot.
    #[must_use]
    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    /// Show the entries matching `query` and hide the rest.
    ///
    /// Matching is a case-insensitive substring test against the label or
    /// the section title. An empty query shows everything. Sections holding
    /// a visible entry are kept open for as long as the query is non-empty.
    /// Returns the number of visible entries.
    pub fn filter(&self, query: &str) -> usize {
        let query = query.trim();
        let mut sidebar = self.sidebar.borrow_mut();
        sidebar.release_search_overrides();

        let mut visible = 0;
        for item in &self.index.entries {
            if query.is_empty() {
                sidebar.set_search_result(item.entry, true, Vec::new());
                visible += 1;
                continue;
            }
            if !item.matches(query) {
                sidebar.set_search_result(item.entry, false, Vec::new());
                continue;
            }
            sidebar.set_search_result(item.entry, true, find_matches(&item.label, query));
            if let Some(section) = sidebar.entry(item.entry).and_then(|e| e.section()) {
                sidebar.open_for_search(section);
            }
            visible += 1;
        }

        sidebar.set_no_results(!query.is_empty() && visible == 0);
        tracing::debug!(query, visible, "Filtered navigation");
        visible
    }

    /// Handle the input's value changing to `value`.
    ///
    /// Waits for the debounce window; a later call or [`clear`](Self::clear)
    /// during the wait supersedes this one, which then returns `None`.
    /// Otherwise filters on the trimmed value and returns the visible count.
    pub async fn on_input(&self, value: String) -> Option<usize> {
        let query = self.debouncer.settle(value, self.timer.as_ref()).await?;
        Some(self.filter(query.trim()))
    }

    /// Reset the search: empty input, every entry shown and unmarked, no
    /// placeholder, input focused.
    pub fn clear(&self) {
        self.debouncer.cancel();
        if let Some(input) = &self.input {
            input.set_value("");
        }
        self.filter("");
        if let Some(input) = &self.input {
            input.focus();
        }
    }

    /// Handle a key press inside the search input. Escape clears.
    ///
    /// Returns `true` when the key was handled.
    pub fn handle_key(&self, key: &KeyPress) -> bool {
        if key.key == "Escape" {
            self.clear();
            return true;
        }
        false
    }
}
