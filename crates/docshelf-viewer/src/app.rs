//! Application context.
//!
//! [`App`] wires the router and both controllers over one shared sidebar
//! and turns host events into calls on them. Event handling is synchronous;
//! anything that has to wait (loading content, debouncing search) comes back
//! as a [`Task`] for the host to drive with [`App::run`].

use std::rc::Rc;

use docshelf_config::Config;

use crate::navigation::{KeyPress, NavigationController};
use crate::path::ContentPath;
use crate::platform::Platform;
use crate::router::{LoadOutcome, Router};
use crate::search::SearchController;
use crate::sidebar::{SharedSidebar, Sidebar};

/// What was clicked, as identified by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    /// A sidebar link with its `data-path` attribute.
    NavLink { path: Option<String> },
    /// A section header, by section index.
    SectionHeader { section: usize },
    /// A link inside the content area with its `href`.
    ContentLink { href: String },
    /// The mobile menu toggle.
    MenuToggle,
    /// The overlay behind the mobile menu.
    Overlay,
    /// The sidebar close button.
    SidebarClose,
    /// The search clear button.
    SearchClear,
    /// The retry button of an error view.
    Retry { path: String },
    /// The home button of an error view.
    Home { path: String },
    /// Anything else.
    Other,
}

/// A host event.
#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    /// A click anywhere on the page.
    Click(ClickTarget),
    /// A key press outside the search input.
    KeyDown(KeyPress),
    /// A key press inside the search input.
    SearchKeyDown(KeyPress),
    /// The search input's value changed.
    SearchInput(String),
    /// The viewport was resized to the given width.
    Resize { width: f64 },
    /// The location fragment changed.
    HashChange,
}

/// Asynchronous work requested by an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Task {
    /// Handle the initial location.
    Start,
    /// Display the current route.
    Route,
    /// Load a path without changing the location.
    Load(ContentPath),
    /// Debounce and apply a search query.
    Search(String),
}

/// Result of handling an event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Handled {
    /// Whether the browser's default action must be prevented.
    pub prevent_default: bool,
    /// Work to run next.
    pub task: Option<Task>,
}

impl Handled {
    fn ignored() -> Self {
        Self::default()
    }

    fn prevented() -> Self {
        Self {
            prevent_default: true,
            task: None,
        }
    }

    fn task(task: Task) -> Self {
        Self {
            prevent_default: false,
            task: Some(task),
        }
    }

    fn prevent_default(mut self, prevent: bool) -> Self {
        self.prevent_default = prevent;
        self
    }
}

/// One documentation viewer.
pub struct App {
    sidebar: SharedSidebar,
    router: Rc<Router>,
    navigation: NavigationController,
    search: SearchController,
}

impl App {
    /// Build the viewer over `sidebar` and restore the stored section state.
    #[must_use]
    pub fn new(config: &Config, sidebar: Sidebar, platform: &Platform) -> Self {
        let sidebar = sidebar.into_shared();
        let router = Rc::new(Router::new(&config.router, Rc::clone(&sidebar), platform));
        let navigation = NavigationController::new(
            &config.navigation,
            Rc::clone(&sidebar),
            Rc::clone(&router),
            platform,
        );
        navigation.restore_section_state();
        let search =
            SearchController::new(&config.search, &config.messages, Rc::clone(&sidebar), platform);

        {
            let model = sidebar.borrow();
            tracing::info!(
                sections = model.sections().len(),
                entries = model.entries().len(),
                search = search.is_enabled(),
                "Viewer initialized"
            );
        }

        Self {
            sidebar,
            router,
            navigation,
            search,
        }
    }

    /// The shared sidebar model.
    #[must_use]
    pub fn sidebar(&self) -> &SharedSidebar {
        &self.sidebar
    }

    /// The router.
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// The navigation controller.
    #[must_use]
    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    /// The search controller.
    #[must_use]
    pub fn search(&self) -> &SearchController {
        &self.search
    }

    /// Render the loading placeholder.
    pub fn show_loading(&self) {
        self.router.show_loading();
    }

    /// Handle one host event.
    pub fn handle(&self, event: UiEvent) -> Handled {
        match event {
            UiEvent::Click(target) => self.handle_click(target),
            UiEvent::KeyDown(key) => {
                Handled::ignored().prevent_default(self.navigation.handle_key(&key))
            }
            UiEvent::SearchKeyDown(key) => {
                self.search.handle_key(&key);
                Handled::ignored()
            }
            UiEvent::SearchInput(value) => {
                if self.search.is_enabled() {
                    Handled::task(Task::Search(value))
                } else {
                    Handled::ignored()
                }
            }
            UiEvent::Resize { width } => {
                self.navigation.handle_resize(width);
                Handled::ignored()
            }
            UiEvent::HashChange => Handled::task(Task::Route),
        }
    }

    fn handle_click(&self, target: ClickTarget) -> Handled {
        match target {
            ClickTarget::NavLink { path } => {
                self.navigation.on_nav_link(path.as_deref());
                Handled::prevented()
            }
            ClickTarget::SectionHeader { section } => {
                self.navigation.toggle_section(section);
                Handled::ignored()
            }
            ClickTarget::ContentLink { href } => {
                Handled::ignored().prevent_default(self.navigation.on_content_link(&href))
            }
            ClickTarget::MenuToggle => {
                self.navigation.toggle_mobile_menu();
                Handled::ignored()
            }
            ClickTarget::Overlay | ClickTarget::SidebarClose => {
                self.navigation.hide_mobile_menu();
                Handled::ignored()
            }
            ClickTarget::SearchClear => {
                self.search.clear();
                Handled::ignored()
            }
            ClickTarget::Retry { path } => {
                Handled::task(Task::Load(self.router.normalize(&path))).prevent_default(true)
            }
            ClickTarget::Home { path } => {
                self.router.navigate_to(&path);
                Handled::prevented()
            }
            ClickTarget::Other => Handled::ignored(),
        }
    }

    /// Run a task to completion.
    ///
    /// Returns the load outcome for tasks that display content.
    pub async fn run(&self, task: Task) -> Option<LoadOutcome> {
        match task {
            Task::Start => self.router.start().await,
            Task::Route => Some(self.router.handle_route().await),
            Task::Load(path) => Some(self.router.load_content(&path).await),
            Task::Search(value) => {
                self.search.on_input(value).await;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryLocation;
    use crate::mock::{MockContentSource, TestPlatform, sample_outline};
    use crate::platform::{Location, StateStore};
    use crate::render::Screen;
    use pretty_assertions::assert_eq;

    fn pages() -> MockContentSource {
        MockContentSource::new()
            .with_page("content/start.html", "<h1>Start</h1>")
            .with_page("content/install.html", "<h1>Install</h1>")
            .with_status("content/api.html", 500)
    }

    fn app(platform: &TestPlatform) -> App {
        let sidebar = Sidebar::from_outline(&sample_outline()).with_mobile_menu(true);
        App::new(&Config::default(), sidebar, &platform.platform())
    }

    /// Deliver queued hash changes the way a browser would.
    async fn settle(app: &App, location: &MemoryLocation) -> Vec<LoadOutcome> {
        let mut outcomes = Vec::new();
        while location.take_hash_change() {
            let handled = app.handle(UiEvent::HashChange);
            if let Some(task) = handled.task
                && let Some(outcome) = app.run(task).await
            {
                outcomes.push(outcome);
            }
        }
        outcomes
    }

    #[tokio::test]
    async fn test_startup_without_fragment_shows_default_page() {
        let platform = TestPlatform::new("").with_source(pages());
        let app = app(&platform);

        assert_eq!(app.run(Task::Start).await, None);
        let outcomes = settle(&app, &platform.location).await;

        assert_eq!(outcomes, vec![LoadOutcome::Fetched]);
        assert_eq!(
            app.sidebar().borrow().active_entry().map(|e| e.label().to_owned()),
            Some("Start".to_owned())
        );
    }

    #[tokio::test]
    async fn test_nav_click_loads_page() {
        let platform = TestPlatform::new("#/start").with_source(pages());
        let app = app(&platform);
        app.run(Task::Start).await;

        let handled = app.handle(UiEvent::Click(ClickTarget::NavLink {
            path: Some("install.html".to_owned()),
        }));
        let outcomes = settle(&app, &platform.location).await;

        assert!(handled.prevent_default);
        assert_eq!(handled.task, None);
        assert_eq!(outcomes, vec![LoadOutcome::Fetched]);
        assert_eq!(
            platform.view.last(),
            Some(Screen::Page {
                path: app.router().normalize("install"),
                html: "<h1>Install</h1>".to_owned(),
            })
        );
    }

    #[tokio::test]
    async fn test_back_hotkey_returns_to_cached_page() {
        let platform = TestPlatform::new("#/start").with_source(pages());
        let app = app(&platform);
        app.run(Task::Start).await;
        app.handle(UiEvent::Click(ClickTarget::NavLink {
            path: Some("install.html".to_owned()),
        }));
        settle(&app, &platform.location).await;

        let handled = app.handle(UiEvent::KeyDown(KeyPress::new("ArrowLeft").with_alt()));
        let outcomes = settle(&app, &platform.location).await;

        assert!(handled.prevent_default);
        assert_eq!(outcomes, vec![LoadOutcome::Cached]);
        assert_eq!(platform.source.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_retry_reloads_failed_page() {
        let platform = TestPlatform::new("#/api").with_source(pages());
        let app = app(&platform);
        let outcome = app.run(Task::Start).await;
        assert_eq!(
            outcome.as_ref().and_then(LoadOutcome::error).map(ToString::to_string),
            Some("HTTP 500".to_owned())
        );

        let handled = app.handle(UiEvent::Click(ClickTarget::Retry {
            path: "api.html".to_owned(),
        }));
        let task = handled.task.clone();
        assert_eq!(task, Some(Task::Load(app.router().normalize("api.html"))));
        if let Some(task) = task {
            app.run(task).await;
        }

        assert_eq!(
            platform.source.requests(),
            vec!["content/api.html".to_owned(), "content/api.html".to_owned()]
        );
        assert_eq!(platform.location.fragment(), "#/api");
    }

    #[test]
    fn test_home_navigates() {
        let platform = TestPlatform::new("#/missing");
        let app = app(&platform);

        let handled = app.handle(UiEvent::Click(ClickTarget::Home {
            path: "start.html".to_owned(),
        }));

        assert!(handled.prevent_default);
        assert_eq!(platform.location.fragment(), "#/start.html");
    }

    #[test]
    fn test_menu_clicks() {
        let platform = TestPlatform::new("");
        let app = app(&platform);

        app.handle(UiEvent::Click(ClickTarget::MenuToggle));
        assert!(app.sidebar().borrow().is_menu_open());

        app.handle(UiEvent::Click(ClickTarget::Overlay));
        assert!(!app.sidebar().borrow().is_menu_open());

        app.handle(UiEvent::Click(ClickTarget::MenuToggle));
        app.handle(UiEvent::Click(ClickTarget::SidebarClose));
        assert!(!app.sidebar().borrow().is_menu_open());

        app.handle(UiEvent::Click(ClickTarget::MenuToggle));
        app.handle(UiEvent::Resize { width: 1024.0 });
        assert!(!app.sidebar().borrow().is_menu_open());
    }

    #[test]
    fn test_section_click_persists() {
        let platform = TestPlatform::new("");
        let app = app(&platform);

        let handled = app.handle(UiEvent::Click(ClickTarget::SectionHeader { section: 0 }));

        assert_eq!(handled, Handled::default());
        assert_eq!(
            platform.store.get("sectionStates").as_deref(),
            Some(r#"{"basics":true}"#)
        );
    }

    #[test]
    fn test_new_restores_section_state() {
        let platform = TestPlatform::new("");
        platform.store.set("sectionStates", r#"{"reference":true}"#);

        let app = app(&platform);

        let sidebar = app.sidebar().borrow();
        assert!(!sidebar.sections()[0].is_collapsed());
        assert!(sidebar.sections()[1].is_collapsed());
    }

    #[test]
    fn test_content_links() {
        let platform = TestPlatform::new("");
        let app = app(&platform);

        let internal = app.handle(UiEvent::Click(ClickTarget::ContentLink {
            href: "#/errors".to_owned(),
        }));
        let external = app.handle(UiEvent::Click(ClickTarget::ContentLink {
            href: "https://example.com".to_owned(),
        }));

        assert!(internal.prevent_default);
        assert!(!external.prevent_default);
        assert_eq!(platform.location.fragment(), "#/errors");
    }

    #[tokio::test]
    async fn test_search_events() {
        let platform = TestPlatform::new("");
        let app = app(&platform);

        let handled = app.handle(UiEvent::SearchInput("errors".to_owned()));
        assert_eq!(handled.task, Some(Task::Search("errors".to_owned())));
        if let Some(task) = handled.task {
            assert_eq!(app.run(task).await, None);
        }
        assert_eq!(
            app.sidebar()
                .borrow()
                .entries()
                .iter()
                .filter(|e| !e.is_hidden())
                .count(),
            1
        );

        app.handle(UiEvent::SearchKeyDown(KeyPress::new("Escape")));
        assert!(app.sidebar().borrow().entries().iter().all(|e| !e.is_hidden()));
        assert!(platform.search_input.is_focused());
    }

    #[test]
    fn test_search_input_ignored_without_input() {
        let platform = TestPlatform::new("");
        let mut ports = platform.platform();
        ports.search_input = None;
        let app = App::new(
            &Config::default(),
            Sidebar::from_outline(&sample_outline()),
            &ports,
        );

        assert_eq!(app.handle(UiEvent::SearchInput("x".to_owned())), Handled::default());
    }

    #[test]
    fn test_show_loading() {
        let platform = TestPlatform::new("");
        let app = app(&platform);

        app.show_loading();

        assert_eq!(platform.view.last(), Some(Screen::Loading));
    }
}
