//! Viewer ports over `web-sys`.

use std::time::Duration;

use async_trait::async_trait;
use docshelf_config::Messages;
use docshelf_viewer::{
    ContentSource, ContentView, FetchResponse, Location, Screen, SearchInput, StateStore, Timer,
    TransportError, Viewport,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, HtmlElement, HtmlInputElement, Response, Window};

/// Readable text for a thrown JavaScript value.
fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// `fetch()` relative to the page.
pub(crate) struct FetchSource {
    window: Window,
}

impl FetchSource {
    pub(crate) fn new(window: Window) -> Self {
        Self { window }
    }
}

#[async_trait(?Send)]
impl ContentSource for FetchSource {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, TransportError> {
        let value = JsFuture::from(self.window.fetch_with_str(url))
            .await
            .map_err(|e| TransportError::new(describe(&e)))?;
        let response: Response = value
            .dyn_into()
            .map_err(|e| TransportError::new(describe(&e)))?;
        let status = response.status();
        let text = response
            .text()
            .map_err(|e| TransportError::new(describe(&e)))?;
        let body = JsFuture::from(text)
            .await
            .map_err(|e| TransportError::new(describe(&e)))?
            .as_string()
            .unwrap_or_default();
        Ok(FetchResponse { status, body })
    }
}

/// `localStorage`. Without storage access every read misses and writes are
/// dropped.
pub(crate) struct LocalStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStore {
    pub(crate) fn new(window: &Window) -> Self {
        let storage = window.local_storage().ok().flatten();
        if storage.is_none() {
            tracing::warn!("localStorage unavailable, section state will not persist");
        }
        Self { storage }
    }
}

impl StateStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = &self.storage
            && let Err(e) = storage.set_item(key, value)
        {
            tracing::warn!(key, error = %describe(&e), "Failed to write localStorage");
        }
    }
}

/// `window.location` and `window.history`.
pub(crate) struct BrowserLocation {
    window: Window,
}

impl BrowserLocation {
    pub(crate) fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Location for BrowserLocation {
    fn fragment(&self) -> String {
        self.window.location().hash().unwrap_or_default()
    }

    fn set_fragment(&self, fragment: &str) {
        if let Err(e) = self.window.location().set_hash(fragment) {
            tracing::warn!(fragment, error = %describe(&e), "Failed to set location hash");
        }
    }

    fn back(&self) {
        if let Ok(history) = self.window.history() {
            let _ = history.back();
        }
    }

    fn forward(&self) {
        if let Ok(history) = self.window.history() {
            let _ = history.forward();
        }
    }
}

/// The `#appContent` element.
pub(crate) struct DomView {
    window: Window,
    content: Option<Element>,
    messages: Messages,
}

impl DomView {
    pub(crate) fn new(window: Window, content: Option<Element>, messages: Messages) -> Self {
        if content.is_none() {
            tracing::warn!("Content element not found, pages will not be shown");
        }
        Self {
            window,
            content,
            messages,
        }
    }
}

impl ContentView for DomView {
    fn render(&self, screen: &Screen) {
        if let Some(content) = &self.content {
            content.set_inner_html(&screen.to_html(&self.messages));
        }
    }

    fn scroll_to_top(&self) {
        self.window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

/// `setTimeout` as a future.
pub(crate) struct BrowserTimer {
    window: Window,
}

impl BrowserTimer {
    pub(crate) fn new(window: Window) -> Self {
        Self { window }
    }
}

#[async_trait(?Send)]
impl Timer for BrowserTimer {
    async fn sleep(&self, duration: Duration) {
        let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            if self
                .window
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
                .is_err()
            {
                let _ = resolve.call0(&JsValue::NULL);
            }
        });
        let _ = JsFuture::from(promise).await;
    }
}

/// Window width and body scroll lock.
pub(crate) struct WindowViewport {
    window: Window,
}

impl WindowViewport {
    pub(crate) fn new(window: Window) -> Self {
        Self { window }
    }

    fn body(&self) -> Option<HtmlElement> {
        self.window.document()?.body()
    }
}

impl Viewport for WindowViewport {
    fn width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(f64::INFINITY)
    }

    fn set_scroll_locked(&self, locked: bool) {
        let Some(body) = self.body() else {
            return;
        };
        let style = body.style();
        let result = if locked {
            style.set_property("overflow", "hidden")
        } else {
            style.remove_property("overflow").map(drop)
        };
        if let Err(e) = result {
            tracing::debug!(error = %describe(&e), "Failed to update body overflow");
        }
    }
}

/// The `#searchInput` element.
pub(crate) struct DomSearchInput {
    input: HtmlInputElement,
}

impl DomSearchInput {
    pub(crate) fn new(input: HtmlInputElement) -> Self {
        Self { input }
    }
}

impl SearchInput for DomSearchInput {
    fn value(&self) -> String {
        self.input.value()
    }

    fn set_value(&self, value: &str) {
        self.input.set_value(value);
    }

    fn focus(&self) {
        let _ = self.input.focus();
    }

    fn select(&self) {
        self.input.select();
    }
}
