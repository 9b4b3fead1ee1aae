//! Hash router and content loader.
//!
//! The router turns the location fragment into a [`ContentPath`], marks the
//! matching sidebar entry active, and fills the content view: from the
//! [`ContentCache`] when the path was loaded before, otherwise from the
//! [`ContentSource`]. Load failures are rendered as an [`ErrorView`] and
//! reported back as a [`LoadOutcome`]; they never escape as errors.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use docshelf_config::RouterConfig;

use crate::cache::ContentCache;
use crate::error::LoadError;
use crate::path::{ContentPath, PathNormalizer};
use crate::platform::{ContentSource, ContentView, Location, Platform, Timer};
use crate::render::{ErrorView, Screen};
use crate::sidebar::SharedSidebar;

/// Result of displaying a route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Rendered from the cache without a request.
    Cached,
    /// Fetched, cached and rendered.
    Fetched,
    /// Rendered as an error view.
    Failed(LoadError),
}

impl LoadOutcome {
    /// Whether content was rendered.
    #[must_use]
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }

    /// The failure, if any.
    #[must_use]
    pub fn error(&self) -> Option<&LoadError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// Hash router owning the content cache.
pub struct Router {
    normalizer: PathNormalizer,
    content_dir: String,
    startup_delay: Duration,
    cache: RefCell<ContentCache>,
    sidebar: SharedSidebar,
    source: Rc<dyn ContentSource>,
    location: Rc<dyn Location>,
    view: Rc<dyn ContentView>,
    timer: Rc<dyn Timer>,
}

impl Router {
    /// Create a router over the shared sidebar.
    #[must_use]
    pub fn new(config: &RouterConfig, sidebar: SharedSidebar, platform: &Platform) -> Self {
        Self {
            normalizer: PathNormalizer::from_config(config),
            content_dir: config.content_dir().to_owned(),
            startup_delay: config.startup_delay(),
            cache: RefCell::new(ContentCache::new()),
            sidebar,
            source: Rc::clone(&platform.source),
            location: Rc::clone(&platform.location),
            view: Rc::clone(&platform.view),
            timer: Rc::clone(&platform.timer),
        }
    }

    /// Normalize a raw fragment.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> ContentPath {
        self.normalizer.normalize(raw)
    }

    /// The page shown for an empty fragment.
    #[must_use]
    pub fn default_path(&self) -> ContentPath {
        self.normalizer.default_path()
    }

    /// Normalized path of the current fragment.
    #[must_use]
    pub fn current_path(&self) -> ContentPath {
        self.normalize(&self.location.fragment())
    }

    /// Point the location at `path`.
    ///
    /// Only the fragment changes here; the route is handled when the
    /// platform reports the hash change.
    pub fn navigate_to(&self, path: &str) {
        let fragment = format!("#/{}", path.trim_start_matches('/'));
        tracing::debug!(%fragment, "Navigating");
        self.location.set_fragment(&fragment);
    }

    /// Handle the initial location.
    ///
    /// Without a fragment, navigates to the default path and returns `None`
    /// (the resulting hash change does the rest). Otherwise waits out the
    /// startup delay so the page can finish wiring its listeners, then
    /// handles the route.
    pub async fn start(&self) -> Option<LoadOutcome> {
        let fragment = self.location.fragment();
        if fragment.is_empty() || fragment == "#" {
            self.navigate_to(self.default_path().as_str());
            return None;
        }
        self.timer.sleep(self.startup_delay).await;
        Some(self.handle_route().await)
    }

    /// Display the route named by the current fragment.
    pub async fn handle_route(&self) -> LoadOutcome {
        let path = self.current_path();
        let active = self
            .sidebar
            .borrow_mut()
            .set_active(|raw| self.normalizer.normalize(raw) == path);

        if active.is_some() {
            tracing::debug!(path = %path, "Handling route");
            self.load_content(&path).await
        } else {
            let error = LoadError::NotFound { path: path.clone() };
            tracing::warn!(path = %path, "No navigation entry for route");
            self.show_error(&path, &error);
            LoadOutcome::Failed(error)
        }
    }

    /// Display the content at `path`.
    ///
    /// The loading placeholder is rendered before anything else. A cached
    /// path renders immediately; otherwise the fragment is fetched, cached
    /// on success, and the page scrolled to the top.
    pub async fn load_content(&self, path: &ContentPath) -> LoadOutcome {
        self.show_loading();

        let cached = self.cache.borrow().get(path).map(str::to_owned);
        if let Some(html) = cached {
            tracing::debug!(path = %path, "Content served from cache");
            self.view.render(&Screen::Page {
                path: path.clone(),
                html,
            });
            return LoadOutcome::Cached;
        }

        match self.fetch(path).await {
            Ok(html) => {
                self.cache.borrow_mut().insert(path.clone(), html.clone());
                self.view.render(&Screen::Page {
                    path: path.clone(),
                    html,
                });
                self.view.scroll_to_top();
                LoadOutcome::Fetched
            }
            Err(error) => {
                tracing::warn!(path = %path, error = %error, "Failed to load content");
                self.show_error(path, &error);
                LoadOutcome::Failed(error)
            }
        }
    }

    /// Request the fragment for `path` and validate the response.
    async fn fetch(&self, path: &ContentPath) -> Result<String, LoadError> {
        let url = self.content_url(path);
        let response = self.source.fetch(&url).await?;
        if !response.is_success() {
            return Err(LoadError::Status {
                status: response.status,
            });
        }
        if response.body.trim().is_empty() {
            return Err(LoadError::EmptyBody);
        }
        Ok(response.body)
    }

    /// URL the fragment for `path` is fetched from.
    #[must_use]
    pub fn content_url(&self, path: &ContentPath) -> String {
        format!("{}/{path}", self.content_dir)
    }

    /// Render the loading placeholder.
    pub fn show_loading(&self) {
        self.view.render(&Screen::Loading);
    }

    fn show_error(&self, path: &ContentPath, error: &LoadError) {
        let view = ErrorView::new(path.clone(), error, self.default_path());
        self.view.render(&Screen::Error(view));
    }

    /// Forget every cached fragment. The current content stays on screen.
    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
    }

    /// Whether `path` is cached.
    #[must_use]
    pub fn is_cached(&self, path: &ContentPath) -> bool {
        self.cache.borrow().contains(path)
    }

    /// Number of cached fragments.
    #[must_use]
    pub fn cached_count(&self) -> usize {
        self.cache.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockContentSource, TestPlatform, sample_outline};
    use crate::platform::TransportError;
    use crate::sidebar::Sidebar;
    use pretty_assertions::assert_eq;

    fn router(platform: &TestPlatform) -> Router {
        let sidebar = Sidebar::from_outline(&sample_outline()).into_shared();
        Router::new(&RouterConfig::default(), sidebar, &platform.platform())
    }

    #[tokio::test]
    async fn test_start_scenario_loads_active_entry() {
        let platform = TestPlatform::new("#/start")
            .with_source(MockContentSource::new().with_page("content/start.html", "<h1>Start</h1>"));
        let router = router(&platform);

        let outcome = router.start().await;

        assert_eq!(outcome, Some(LoadOutcome::Fetched));
        assert_eq!(platform.timer.sleeps(), vec![Duration::from_millis(10)]);
        let sidebar = router.sidebar.borrow();
        assert_eq!(sidebar.active_entry().map(|e| e.label()), Some("Start"));
        assert!(!sidebar.sections()[0].is_collapsed());
        assert!(sidebar.sections()[0].is_highlighted());
        assert_eq!(
            platform.view.last(),
            Some(Screen::Page {
                path: router.normalize("start.html"),
                html: "<h1>Start</h1>".to_owned(),
            })
        );
        assert_eq!(platform.view.scrolls(), 1);
    }

    #[tokio::test]
    async fn test_start_without_fragment_navigates_to_default() {
        let platform = TestPlatform::new("");
        let router = router(&platform);

        let outcome = router.start().await;

        assert_eq!(outcome, None);
        assert_eq!(platform.location.fragment(), "#/start.html");
        assert!(platform.location.take_hash_change());
        assert!(platform.source.requests().is_empty());
        assert!(platform.timer.sleeps().is_empty());
    }

    #[tokio::test]
    async fn test_start_with_bare_hash_navigates_to_default() {
        let platform = TestPlatform::new("#");
        let router = router(&platform);

        assert_eq!(router.start().await, None);
        assert_eq!(platform.location.fragment(), "#/start.html");
    }

    #[tokio::test]
    async fn test_missing_page_renders_not_found() {
        let platform = TestPlatform::new("#/missing-page");
        let router = router(&platform);

        let outcome = router.handle_route().await;

        let path = router.normalize("missing-page");
        assert_eq!(outcome, LoadOutcome::Failed(LoadError::NotFound { path: path.clone() }));
        assert!(platform.source.requests().is_empty());
        let Some(Screen::Error(view)) = platform.view.last() else {
            panic!("expected error screen");
        };
        assert_eq!(view.path, path);
        assert!(view.message.contains("missing-page.html"));
        let html = Screen::Error(view).to_html(&docshelf_config::Messages::default());
        assert!(html.contains("missing-page.html"));
    }

    #[tokio::test]
    async fn test_http_error_renders_error_and_skips_cache() {
        let platform = TestPlatform::new("#/install")
            .with_source(MockContentSource::new().with_status("content/install.html", 500));
        let router = router(&platform);

        let outcome = router.handle_route().await;

        assert_eq!(outcome, LoadOutcome::Failed(LoadError::Status { status: 500 }));
        assert!(!router.is_cached(&router.normalize("install")));
        let screens = platform.view.screens();
        assert_eq!(screens.first(), Some(&Screen::Loading));
        assert_eq!(
            screens.last(),
            Some(&Screen::Error(ErrorView {
                path: router.normalize("install"),
                message: "HTTP 500".to_owned(),
                home: router.normalize("start.html"),
            }))
        );
        assert_eq!(platform.view.scrolls(), 0);
    }

    #[tokio::test]
    async fn test_blank_body_is_a_failure() {
        let platform = TestPlatform::new("#/install")
            .with_source(MockContentSource::new().with_page("content/install.html", "  \n "));
        let router = router(&platform);

        let outcome = router.handle_route().await;

        assert_eq!(outcome, LoadOutcome::Failed(LoadError::EmptyBody));
        assert_eq!(router.cached_count(), 0);
    }

    #[tokio::test]
    async fn test_network_error_is_a_failure() {
        let platform = TestPlatform::new("#/install").with_source(
            MockContentSource::new().with_network_error("content/install.html", "offline"),
        );
        let router = router(&platform);

        let outcome = router.handle_route().await;

        assert_eq!(
            outcome,
            LoadOutcome::Failed(LoadError::Network(TransportError::new("offline")))
        );
    }

    #[tokio::test]
    async fn test_second_load_uses_cache() {
        let platform = TestPlatform::new("")
            .with_source(MockContentSource::new().with_page("content/x.html", "<p>x</p>"));
        let router = router(&platform);
        let path = router.normalize("x.html");

        let first = router.load_content(&path).await;
        let first_screen = platform.view.last();
        let second = router.load_content(&path).await;

        assert_eq!(first, LoadOutcome::Fetched);
        assert_eq!(second, LoadOutcome::Cached);
        assert_eq!(platform.source.requests(), vec!["content/x.html".to_owned()]);
        assert_eq!(platform.view.last(), first_screen);
        // The loading placeholder is shown even for cache hits
        assert_eq!(platform.view.screens()[2], Screen::Loading);
    }

    #[tokio::test]
    async fn test_clear_cache_forces_refetch_and_keeps_screen() {
        let platform = TestPlatform::new("")
            .with_source(MockContentSource::new().with_page("content/x.html", "<p>x</p>"));
        let router = router(&platform);
        let path = router.normalize("x");
        router.load_content(&path).await;
        let rendered = platform.view.screens().len();

        router.clear_cache();

        assert_eq!(platform.view.screens().len(), rendered);
        assert!(!router.is_cached(&path));
        assert_eq!(router.load_content(&path).await, LoadOutcome::Fetched);
        assert_eq!(platform.source.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_route_matches_entries_written_without_extension() {
        let outline = docshelf_config::NavOutline {
            sections: Vec::new(),
            links: vec![docshelf_config::NavLink {
                label: "Guide".to_owned(),
                path: Some("guide".to_owned()),
            }],
        };
        let platform = TestPlatform::new("#/guide.html")
            .with_source(MockContentSource::new().with_page("content/guide.html", "<p>g</p>"));
        let sidebar = Sidebar::from_outline(&outline).into_shared();
        let router = Router::new(&RouterConfig::default(), sidebar, &platform.platform());

        assert_eq!(router.handle_route().await, LoadOutcome::Fetched);
    }

    #[test]
    fn test_navigate_to_sets_fragment_only() {
        let platform = TestPlatform::new("");
        let router = router(&platform);

        router.navigate_to("guide");

        assert_eq!(platform.location.fragment(), "#/guide");
        assert!(platform.view.screens().is_empty());
    }

    #[test]
    fn test_content_url_uses_configured_dir() {
        let platform = TestPlatform::new("");
        let sidebar = Sidebar::default().into_shared();
        let config = RouterConfig {
            content_dir: "/pages/".to_owned(),
            ..RouterConfig::default()
        };
        let router = Router::new(&config, sidebar, &platform.platform());

        assert_eq!(router.content_url(&router.normalize("#/a/b")), "pages/a/b.html");
    }

    #[test]
    fn test_content_url_never_carries_a_fragment() {
        let platform = TestPlatform::new("");
        let router = Router::new(
            &RouterConfig::default(),
            Sidebar::default().into_shared(),
            &platform.platform(),
        );

        let url = router.content_url(&router.normalize("##guide"));

        assert_eq!(url, "content/guide.html");
        assert!(!url.contains('#'));
    }
}
