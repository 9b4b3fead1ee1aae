//! Sidebar model.
//!
//! An in-memory mirror of the navigation markup: sections, links and the
//! class flags the viewer toggles on them. The router, the navigation
//! controller and the search controller share one [`Sidebar`]; the host
//! paints it back onto the real elements after every handled event.
//!
//! Entries and sections are addressed by their index in document order,
//! which is also how the host keeps its element handles.

use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;

use docshelf_config::NavOutline;

use crate::highlight::render_marked;

/// The sidebar shared between controllers.
pub type SharedSidebar = Rc<RefCell<Sidebar>>;

/// A collapsible `.nav-section`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    id: Option<String>,
    title: Option<String>,
    collapsed: bool,
    opened_by_search: bool,
    highlighted: bool,
}

impl Section {
    fn new(id: Option<String>, title: Option<String>) -> Self {
        Self {
            id,
            title,
            collapsed: false,
            opened_by_search: false,
            highlighted: false,
        }
    }

    /// Identifier from the header's `data-section` attribute.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Text of the `.section-title` element.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Whether the section renders collapsed.
    ///
    /// An active search keeps sections with matches open without touching
    /// the user's own collapse choice.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.collapsed && !self.opened_by_search
    }

    /// Whether the section holds the active entry (`active-section`).
    #[must_use]
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }
}

/// A `.nav a` link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavEntry {
    label: String,
    path: Option<String>,
    section: Option<usize>,
    active: bool,
    hidden: bool,
    matches: Vec<Range<usize>>,
}

impl NavEntry {
    /// Original label text.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Raw `data-path` attribute.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Index of the owning section.
    #[must_use]
    pub fn section(&self) -> Option<usize> {
        self.section
    }

    /// Whether this is the active entry.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether search has hidden this entry.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Byte ranges of the label highlighted by search.
    #[must_use]
    pub fn matches(&self) -> &[Range<usize>] {
        &self.matches
    }

    /// Label markup: escaped text with search matches in `<mark>`.
    ///
    /// Always derived from the stored label, so clearing the matches restores
    /// the original text exactly.
    #[must_use]
    pub fn label_html(&self) -> String {
        render_marked(&self.label, &self.matches)
    }
}

/// The navigation sidebar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sidebar {
    sections: Vec<Section>,
    entries: Vec<NavEntry>,
    has_mobile_menu: bool,
    menu_open: bool,
    no_results: bool,
}

impl Sidebar {
    /// Build the model from an outline.
    ///
    /// Section links come first, in section order, followed by links that
    /// live outside any section.
    #[must_use]
    pub fn from_outline(outline: &NavOutline) -> Self {
        let mut sidebar = Self::default();
        for section in &outline.sections {
            let index = sidebar.sections.len();
            sidebar
                .sections
                .push(Section::new(section.id.clone(), section.title.clone()));
            for link in &section.links {
                sidebar.push_entry(&link.label, link.path.as_deref(), Some(index));
            }
        }
        for link in &outline.links {
            sidebar.push_entry(&link.label, link.path.as_deref(), None);
        }
        sidebar
    }

    /// Declare whether the page has the mobile menu elements (sidebar and
    /// overlay). Without them the menu operations do nothing.
    #[must_use]
    pub fn with_mobile_menu(mut self, available: bool) -> Self {
        self.has_mobile_menu = available;
        self
    }

    /// Wrap the model for sharing.
    #[must_use]
    pub fn into_shared(self) -> SharedSidebar {
        Rc::new(RefCell::new(self))
    }

    fn push_entry(&mut self, label: &str, path: Option<&str>, section: Option<usize>) {
        self.entries.push(NavEntry {
            label: label.to_owned(),
            path: path.map(str::to_owned),
            section,
            active: false,
            hidden: false,
            matches: Vec::new(),
        });
    }

    /// All sections in document order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// All entries in document order.
    #[must_use]
    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    /// Section by index.
    #[must_use]
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Entry by index.
    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&NavEntry> {
        self.entries.get(index)
    }

    /// Index of the first section with the given identifier.
    #[must_use]
    pub fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id() == Some(id))
    }

    /// Title of the section owning `entry`, if both exist.
    #[must_use]
    pub fn section_title_of(&self, entry: usize) -> Option<&str> {
        let section = self.entries.get(entry)?.section?;
        self.sections.get(section)?.title()
    }

    /// Mark the first entry whose path satisfies `is_current` as active.
    ///
    /// Every other entry loses the flag, every section loses its highlight,
    /// and the active entry's section is expanded and highlighted whatever
    /// its stored collapse state. Returns the active entry's index.
    pub fn set_active(&mut self, is_current: impl Fn(&str) -> bool) -> Option<usize> {
        let active = self
            .entries
            .iter()
            .position(|e| e.path.as_deref().is_some_and(|p| is_current(p)));

        for (index, entry) in self.entries.iter_mut().enumerate() {
            entry.active = Some(index) == active;
        }
        for section in &mut self.sections {
            section.highlighted = false;
        }

        let owning = active.and_then(|i| self.entries.get(i)).and_then(NavEntry::section);
        if let Some(section) = owning.and_then(|s| self.sections.get_mut(s)) {
            section.collapsed = false;
            section.highlighted = true;
        }
        active
    }

    /// The active entry, if any.
    #[must_use]
    pub fn active_entry(&self) -> Option<&NavEntry> {
        self.entries.iter().find(|e| e.active)
    }

    /// Flip a section's collapse state as the reader sees it.
    ///
    /// Returns the new collapsed state, or `None` for an unknown index.
    pub fn toggle_section(&mut self, index: usize) -> Option<bool> {
        let section = self.sections.get_mut(index)?;
        let collapsed = !section.is_collapsed();
        section.collapsed = collapsed;
        section.opened_by_search = false;
        Some(collapsed)
    }

    /// Set a section's stored collapse state.
    pub fn set_collapsed(&mut self, index: usize, collapsed: bool) {
        if let Some(section) = self.sections.get_mut(index) {
            section.collapsed = collapsed;
        }
    }

    /// Expand every section.
    pub fn expand_all(&mut self) {
        for section in &mut self.sections {
            section.collapsed = false;
        }
    }

    /// Collapse every section, including ones search had opened.
    pub fn collapse_all(&mut self) {
        for section in &mut self.sections {
            section.collapsed = true;
            section.opened_by_search = false;
        }
    }

    /// Whether the page has a mobile menu.
    #[must_use]
    pub fn has_mobile_menu(&self) -> bool {
        self.has_mobile_menu
    }

    /// Whether the mobile menu (sidebar and overlay) is shown.
    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Show or hide the mobile menu. Returns `false` when the page has none.
    pub fn set_menu_open(&mut self, open: bool) -> bool {
        if !self.has_mobile_menu {
            return false;
        }
        self.menu_open = open;
        true
    }

    /// Apply one entry's search result.
    pub fn set_search_result(&mut self, entry: usize, visible: bool, matches: Vec<Range<usize>>) {
        if let Some(entry) = self.entries.get_mut(entry) {
            entry.hidden = !visible;
            entry.matches = matches;
        }
    }

    /// Keep a section open while the current search has matches in it.
    pub fn open_for_search(&mut self, section: usize) {
        if let Some(section) = self.sections.get_mut(section) {
            section.opened_by_search = true;
        }
    }

    /// Drop every section's search override.
    pub fn release_search_overrides(&mut self) {
        for section in &mut self.sections {
            section.opened_by_search = false;
        }
    }

    /// Whether the "no results" placeholder is shown.
    #[must_use]
    pub fn shows_no_results(&self) -> bool {
        self.no_results
    }

    /// Show or remove the "no results" placeholder.
    pub fn set_no_results(&mut self, show: bool) {
        self.no_results = show;
    }
}
