//! Viewer ports over the local filesystem.
//!
//! Content requests resolve against the site root the way a static file
//! server would, location and storage live in memory, and rendered screens
//! are only logged.

use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use docshelf_viewer::memory::{MemoryLocation, MemoryStore};
use docshelf_viewer::{
    ContentSource, ContentView, FetchResponse, Location, Platform, Screen, StateStore, Timer,
    TransportError, Viewport,
};

/// Width reported to the viewer. Wide enough that it never counts as mobile.
const DESKTOP_WIDTH: f64 = 1280.0;

/// Serves content requests from files under a site root.
pub(crate) struct FsContentSource {
    root: PathBuf,
}

impl FsContentSource {
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File a request URL maps to, or `None` when the URL escapes the root.
    ///
    /// URLs ending in `/` map to the directory's `index.html`.
    fn resolve(&self, url: &str) -> Option<PathBuf> {
        let relative = url.trim_start_matches('/');
        if relative.split('/').any(|segment| segment == "..") {
            return None;
        }
        let path = self.root.join(relative);
        if relative.is_empty() || relative.ends_with('/') {
            Some(path.join("index.html"))
        } else {
            Some(path)
        }
    }
}

#[async_trait(?Send)]
impl ContentSource for FsContentSource {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, TransportError> {
        let Some(path) = self.resolve(url) else {
            tracing::warn!(url, "Rejected content path outside the site root");
            return Ok(FetchResponse::status(403));
        };
        match tokio::fs::read_to_string(&path).await {
            Ok(body) => Ok(FetchResponse::ok(body)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(FetchResponse::status(404)),
            Err(e) => Err(TransportError::new(format!("{}: {e}", path.display()))),
        }
    }
}

/// Timer over tokio's clock.
pub(crate) struct TokioTimer;

#[async_trait(?Send)]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Content view that logs what would be shown.
pub(crate) struct LogView;

impl ContentView for LogView {
    fn render(&self, screen: &Screen) {
        match screen {
            Screen::Loading => tracing::debug!("Rendering loading placeholder"),
            Screen::Page { path, html } => {
                tracing::debug!(path = %path, bytes = html.len(), "Rendering page");
            }
            Screen::Error(view) => {
                tracing::debug!(path = %view.path, message = %view.message, "Rendering error");
            }
        }
    }

    fn scroll_to_top(&self) {}
}

/// Fixed desktop-width viewport.
pub(crate) struct DesktopViewport;

impl Viewport for DesktopViewport {
    fn width(&self) -> f64 {
        DESKTOP_WIDTH
    }

    fn set_scroll_locked(&self, _locked: bool) {}
}

/// Ports for one CLI run, with typed access to the location.
pub(crate) struct FsHost {
    pub(crate) location: Rc<MemoryLocation>,
    platform: Platform,
}

impl FsHost {
    /// Serve content from `site_root`. There is no search input.
    pub(crate) fn new(site_root: &Path) -> Self {
        let location = Rc::new(MemoryLocation::default());
        let platform = Platform {
            source: Rc::new(FsContentSource::new(site_root)) as Rc<dyn ContentSource>,
            store: Rc::new(MemoryStore::new()) as Rc<dyn StateStore>,
            location: Rc::clone(&location) as Rc<dyn Location>,
            view: Rc::new(LogView) as Rc<dyn ContentView>,
            timer: Rc::new(TokioTimer) as Rc<dyn Timer>,
            viewport: Rc::new(DesktopViewport) as Rc<dyn Viewport>,
            search_input: None,
        };
        Self { location, platform }
    }

    pub(crate) fn platform(&self) -> &Platform {
        &self.platform
    }
}
