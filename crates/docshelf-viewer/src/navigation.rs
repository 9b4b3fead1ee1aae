//! Sidebar navigation: mobile menu, collapsible sections, link interception
//! and keyboard shortcuts.

use std::rc::Rc;

use docshelf_config::NavigationConfig;

use crate::path::{ContentPath, route_from_href};
use crate::platform::{Location, Platform, SearchInput, Viewport};
use crate::router::Router;
use crate::sidebar::SharedSidebar;
use crate::state::SectionStateStore;

/// A key press with its modifier state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyPress {
    /// `KeyboardEvent.key` value, e.g. `"ArrowLeft"` or `"k"`.
    pub key: String,
    /// Alt (Option) held.
    pub alt: bool,
    /// Control held.
    pub ctrl: bool,
    /// Meta (Command) held.
    pub meta: bool,
}

impl KeyPress {
    /// A key press without modifiers.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Hold Alt.
    #[must_use]
    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    /// Hold Control.
    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    /// Hold Meta.
    #[must_use]
    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    fn is(&self, key: &str) -> bool {
        self.key.eq_ignore_ascii_case(key)
    }
}

/// Drives the sidebar in response to user input.
pub struct NavigationController {
    breakpoint: f64,
    sidebar: SharedSidebar,
    router: Rc<Router>,
    states: SectionStateStore,
    location: Rc<dyn Location>,
    viewport: Rc<dyn Viewport>,
    search_input: Option<Rc<dyn SearchInput>>,
}

impl NavigationController {
    /// Create a controller. Call [`restore_section_state`](Self::restore_section_state)
    /// once the sidebar is populated.
    #[must_use]
    pub fn new(
        config: &NavigationConfig,
        sidebar: SharedSidebar,
        router: Rc<Router>,
        platform: &Platform,
    ) -> Self {
        Self {
            breakpoint: f64::from(config.mobile_breakpoint),
            sidebar,
            router,
            states: SectionStateStore::new(Rc::clone(&platform.store), &config.storage_key),
            location: Rc::clone(&platform.location),
            viewport: Rc::clone(&platform.viewport),
            search_input: platform.search_input.clone(),
        }
    }

    /// Collapse every section stored as collapsed. Sections without a stored
    /// state keep their current state. Returns how many were collapsed.
    pub fn restore_section_state(&self) -> usize {
        let states = self.states.load();
        let mut sidebar = self.sidebar.borrow_mut();
        let collapsed: Vec<usize> = sidebar
            .sections()
            .iter()
            .enumerate()
            .filter(|(_, section)| {
                section
                    .id()
                    .and_then(|id| states.get(id))
                    .copied()
                    .unwrap_or(false)
            })
            .map(|(index, _)| index)
            .collect();
        for &index in &collapsed {
            sidebar.set_collapsed(index, true);
        }
        tracing::debug!(collapsed = collapsed.len(), "Restored section state");
        collapsed.len()
    }

    /// Whether the viewport is at or below the mobile breakpoint.
    #[must_use]
    pub fn is_mobile(&self) -> bool {
        self.viewport.width() <= self.breakpoint
    }

    /// Open the menu when closed, close it when open.
    pub fn toggle_mobile_menu(&self) {
        let open = self.sidebar.borrow().is_menu_open();
        if open {
            self.hide_mobile_menu();
        } else {
            self.show_mobile_menu();
        }
    }

    /// Show the sidebar and overlay and lock page scrolling.
    pub fn show_mobile_menu(&self) {
        if self.sidebar.borrow_mut().set_menu_open(true) {
            self.viewport.set_scroll_locked(true);
        }
    }

    /// Hide the sidebar and overlay and unlock page scrolling.
    pub fn hide_mobile_menu(&self) {
        if self.sidebar.borrow_mut().set_menu_open(false) {
            self.viewport.set_scroll_locked(false);
        }
    }

    /// Close the menu once the viewport grows past the breakpoint.
    pub fn handle_resize(&self, width: f64) {
        if width > self.breakpoint && self.sidebar.borrow().is_menu_open() {
            self.hide_mobile_menu();
        }
    }

    /// Follow a sidebar link carrying `path` in its `data-path` attribute.
    ///
    /// A link without the attribute is ignored. On mobile the menu closes.
    pub fn on_nav_link(&self, path: Option<&str>) {
        let Some(path) = path else {
            tracing::debug!("Navigation link without a path");
            return;
        };
        self.router.navigate_to(path);
        if self.is_mobile() {
            self.hide_mobile_menu();
        }
    }

    /// Follow a link inside the content area.
    ///
    /// Returns `true` when the link was an internal `#/` route and has been
    /// taken over; anything else keeps its default behavior.
    pub fn on_content_link(&self, href: &str) -> bool {
        match route_from_href(href) {
            Some(path) => {
                self.router.navigate_to(path);
                true
            }
            None => false,
        }
    }

    /// Toggle a section and persist its new state.
    ///
    /// Returns the new collapsed state, or `None` for an unknown section.
    pub fn toggle_section(&self, index: usize) -> Option<bool> {
        let (collapsed, id) = {
            let mut sidebar = self.sidebar.borrow_mut();
            let collapsed = sidebar.toggle_section(index)?;
            let id = sidebar.section(index).and_then(|s| s.id()).map(str::to_owned);
            (collapsed, id)
        };
        match id {
            Some(id) => self.states.save(&id, collapsed),
            None => tracing::debug!(index, "Section without identifier is not persisted"),
        }
        Some(collapsed)
    }

    /// Mark the entry for `path` active and reveal its section.
    ///
    /// The reveal is not persisted. Returns the active entry's index.
    pub fn highlight_active(&self, path: &ContentPath) -> Option<usize> {
        self.sidebar
            .borrow_mut()
            .set_active(|raw| self.router.normalize(raw) == *path)
    }

    /// Expand every section. Stored state is left alone.
    pub fn expand_all_sections(&self) {
        self.sidebar.borrow_mut().expand_all();
    }

    /// Collapse every section. Stored state is left alone.
    pub fn collapse_all_sections(&self) {
        self.sidebar.borrow_mut().collapse_all();
    }

    /// Handle a document-level key press.
    ///
    /// Returns `true` when the browser's default action must be prevented.
    pub fn handle_key(&self, key: &KeyPress) -> bool {
        if key.alt && key.is("ArrowLeft") {
            self.location.back();
            return true;
        }
        if key.alt && key.is("ArrowRight") {
            self.location.forward();
            return true;
        }
        if (key.ctrl || key.meta) && key.is("k") {
            if let Some(input) = &self.search_input {
                input.focus();
                input.select();
            }
            return true;
        }
        if key.is("Escape") && self.is_mobile() {
            self.hide_mobile_menu();
        }
        false
    }
}
