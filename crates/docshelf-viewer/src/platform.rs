//! Ports to the hosting platform.
//!
//! The viewer never touches a browser API directly. Each primitive it needs
//! is a trait here; the wasm host implements them over `web-sys`, the CLI
//! over the filesystem, and tests over the doubles in `mock`.
//!
//! Everything runs on one thread, so the async traits are `?Send` and the
//! handles are [`Rc`]s.

use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;

use crate::render::Screen;

/// Response to a content request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl FetchResponse {
    /// A `200 OK` response with the given body.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// A response with the given status and an empty body.
    #[must_use]
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport-level failure: the request produced no response at all.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    /// Create a transport error with a human-readable message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Fetches content fragments (`fetch()` in the browser).
#[async_trait(?Send)]
pub trait ContentSource {
    /// Issue a GET for `url`, relative to the page.
    async fn fetch(&self, url: &str) -> Result<FetchResponse, TransportError>;
}

/// Small string key-value storage (`localStorage` in the browser).
pub trait StateStore {
    /// Stored value for `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`. Write failures are logged by the
    /// implementation and otherwise ignored.
    fn set(&self, key: &str, value: &str);
}

/// The location fragment and session history.
pub trait Location {
    /// Current fragment including the leading `#`, or empty when absent.
    fn fragment(&self) -> String;

    /// Replace the fragment. The platform reports the change later through
    /// a hash-change event; implementations must not call back synchronously.
    fn set_fragment(&self, fragment: &str);

    /// Go one step back in history.
    fn back(&self);

    /// Go one step forward in history.
    fn forward(&self);
}

/// The content area.
pub trait ContentView {
    /// Replace the content area with `screen`.
    fn render(&self, screen: &Screen);

    /// Scroll the page to the top.
    fn scroll_to_top(&self);
}

/// Delayed wake-ups (`setTimeout` in the browser).
#[async_trait(?Send)]
pub trait Timer {
    /// Complete after `duration` has elapsed.
    async fn sleep(&self, duration: Duration);
}

/// The viewport and page scrolling.
pub trait Viewport {
    /// Current viewport width in logical pixels.
    fn width(&self) -> f64;

    /// Lock or unlock page scrolling (used while the mobile menu is open).
    fn set_scroll_locked(&self, locked: bool);
}

/// The sidebar search input.
pub trait SearchInput {
    /// Current input value.
    fn value(&self) -> String;

    /// Replace the input value.
    fn set_value(&self, value: &str);

    /// Give the input keyboard focus.
    fn focus(&self);

    /// Select the input text.
    fn select(&self);
}

/// Every port the viewer needs, bundled for construction.
#[derive(Clone)]
pub struct Platform {
    /// Content fetcher.
    pub source: Rc<dyn ContentSource>,
    /// Persistent key-value store.
    pub store: Rc<dyn StateStore>,
    /// Location fragment and history.
    pub location: Rc<dyn Location>,
    /// Content area.
    pub view: Rc<dyn ContentView>,
    /// Timer for the startup delay and search debouncing.
    pub timer: Rc<dyn Timer>,
    /// Viewport.
    pub viewport: Rc<dyn Viewport>,
    /// Search input; `None` disables search input handling.
    pub search_input: Option<Rc<dyn SearchInput>>,
}
