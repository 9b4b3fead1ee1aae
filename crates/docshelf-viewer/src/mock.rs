//! Port doubles for testing.
//!
//! Provides recording implementations of every platform port and
//! [`TestPlatform`], which bundles them with typed handles so tests can
//! inspect what the viewer did.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use docshelf_config::{NavLink, NavOutline, NavSection};

use crate::memory::{MemoryLocation, MemoryStore};
use crate::platform::{
    ContentSource, ContentView, FetchResponse, Platform, SearchInput, StateStore, Timer,
    TransportError, Viewport,
};
use crate::render::Screen;

/// Content source answering from a fixed table.
///
/// Unknown URLs answer `404`. Every request is recorded.
#[derive(Debug, Default)]
pub struct MockContentSource {
    responses: HashMap<String, Result<FetchResponse, TransportError>>,
    requests: RefCell<Vec<String>>,
}

impl MockContentSource {
    /// Create a source with no pages.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with `200` and `body`.
    #[must_use]
    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses
            .insert(url.into(), Ok(FetchResponse::ok(body)));
        self
    }

    /// Answer `url` with `status` and an empty body.
    #[must_use]
    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.responses
            .insert(url.into(), Ok(FetchResponse::status(status)));
        self
    }

    /// Fail `url` at the transport level.
    #[must_use]
    pub fn with_network_error(mut self, url: impl Into<String>, message: &str) -> Self {
        self.responses
            .insert(url.into(), Err(TransportError::new(message)));
        self
    }

    /// URLs requested so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl ContentSource for MockContentSource {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, TransportError> {
        self.requests.borrow_mut().push(url.to_owned());
        self.responses
            .get(url)
            .cloned()
            .unwrap_or_else(|| Ok(FetchResponse::status(404)))
    }
}

/// Content view that records every screen.
#[derive(Debug, Default)]
pub struct RecordingView {
    screens: RefCell<Vec<Screen>>,
    scrolls: Cell<usize>,
}

impl RecordingView {
    /// Every screen rendered so far, in order.
    #[must_use]
    pub fn screens(&self) -> Vec<Screen> {
        self.screens.borrow().clone()
    }

    /// The screen currently shown.
    #[must_use]
    pub fn last(&self) -> Option<Screen> {
        self.screens.borrow().last().cloned()
    }

    /// Number of scroll-to-top requests.
    #[must_use]
    pub fn scrolls(&self) -> usize {
        self.scrolls.get()
    }
}

impl ContentView for RecordingView {
    fn render(&self, screen: &Screen) {
        self.screens.borrow_mut().push(screen.clone());
    }

    fn scroll_to_top(&self) {
        self.scrolls.set(self.scrolls.get() + 1);
    }
}

/// Timer that completes immediately and records the requested durations.
#[derive(Debug, Default)]
pub struct InstantTimer {
    sleeps: RefCell<Vec<Duration>>,
}

impl InstantTimer {
    /// Durations requested so far, in order.
    #[must_use]
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Timer for InstantTimer {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
    }
}

/// Timer backed by tokio, for tests that run with paused time.
#[cfg(test)]
pub(crate) struct TokioTimer;

#[cfg(test)]
#[async_trait(?Send)]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Viewport with a settable width.
#[derive(Debug)]
pub struct FixedViewport {
    width: Cell<f64>,
    scroll_locked: Cell<bool>,
}

impl FixedViewport {
    /// Create a viewport `width` pixels wide.
    #[must_use]
    pub fn new(width: f64) -> Self {
        Self {
            width: Cell::new(width),
            scroll_locked: Cell::new(false),
        }
    }

    /// Change the width.
    pub fn set_width(&self, width: f64) {
        self.width.set(width);
    }

    /// Whether page scrolling is locked.
    #[must_use]
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked.get()
    }
}

impl Viewport for FixedViewport {
    fn width(&self) -> f64 {
        self.width.get()
    }

    fn set_scroll_locked(&self, locked: bool) {
        self.scroll_locked.set(locked);
    }
}

/// Search input that records focus and selection.
#[derive(Debug, Default)]
pub struct MockSearchInput {
    value: RefCell<String>,
    focused: Cell<bool>,
    selected: Cell<bool>,
}

impl MockSearchInput {
    /// Whether the input has been focused.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused.get()
    }

    /// Whether the input text has been selected.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected.get()
    }
}

impl SearchInput for MockSearchInput {
    fn value(&self) -> String {
        self.value.borrow().clone()
    }

    fn set_value(&self, value: &str) {
        *self.value.borrow_mut() = value.to_owned();
    }

    fn focus(&self) {
        self.focused.set(true);
    }

    fn select(&self) {
        self.selected.set(true);
    }
}

/// Every port double with a typed handle.
pub struct TestPlatform {
    /// Content source.
    pub source: Rc<MockContentSource>,
    /// Key-value store.
    pub store: Rc<MemoryStore>,
    /// Location.
    pub location: Rc<MemoryLocation>,
    /// Content view.
    pub view: Rc<RecordingView>,
    /// Timer.
    pub timer: Rc<InstantTimer>,
    /// Viewport, 1280 pixels wide by default.
    pub viewport: Rc<FixedViewport>,
    /// Search input.
    pub search_input: Rc<MockSearchInput>,
}

impl TestPlatform {
    /// Create doubles with the location at `fragment`.
    #[must_use]
    pub fn new(fragment: &str) -> Self {
        Self {
            source: Rc::new(MockContentSource::new()),
            store: Rc::new(MemoryStore::new()),
            location: Rc::new(MemoryLocation::new(fragment)),
            view: Rc::new(RecordingView::default()),
            timer: Rc::new(InstantTimer::default()),
            viewport: Rc::new(FixedViewport::new(1280.0)),
            search_input: Rc::new(MockSearchInput::default()),
        }
    }

    /// Replace the content source.
    #[must_use]
    pub fn with_source(mut self, source: MockContentSource) -> Self {
        self.source = Rc::new(source);
        self
    }

    /// Share an existing store, e.g. to rebuild an app over the same state.
    #[must_use]
    pub fn with_store(mut self, store: Rc<MemoryStore>) -> Self {
        self.store = store;
        self
    }

    /// The ports as the viewer consumes them.
    #[must_use]
    pub fn platform(&self) -> Platform {
        Platform {
            source: Rc::clone(&self.source) as Rc<dyn ContentSource>,
            store: Rc::clone(&self.store) as Rc<dyn StateStore>,
            location: Rc::clone(&self.location) as Rc<dyn crate::platform::Location>,
            view: Rc::clone(&self.view) as Rc<dyn ContentView>,
            timer: Rc::clone(&self.timer) as Rc<dyn Timer>,
            viewport: Rc::clone(&self.viewport) as Rc<dyn Viewport>,
            search_input: Some(Rc::clone(&self.search_input) as Rc<dyn SearchInput>),
        }
    }
}

fn link(label: &str, path: &str) -> NavLink {
    NavLink {
        label: label.to_owned(),
        path: Some(path.to_owned()),
    }
}

/// A small documentation outline:
///
/// - Basics (`basics`): Start, Installation
/// - Reference (`reference`): API Overview, Errors
/// - About (no section)
#[must_use]
pub fn sample_outline() -> NavOutline {
    NavOutline {
        sections: vec![
            NavSection {
                id: Some("basics".to_owned()),
                title: Some("Basics".to_owned()),
                links: vec![
                    link("Start", "start.html"),
                    link("Installation", "install.html"),
                ],
            },
            NavSection {
                id: Some("reference".to_owned()),
                title: Some("Reference".to_owned()),
                links: vec![
                    link("API Overview", "api.html"),
                    link("Errors", "errors.html"),
                ],
            },
        ],
        links: vec![link("About", "about.html")],
    }
}
