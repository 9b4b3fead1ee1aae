//! Documentation viewer core.
//!
//! A hash-routed viewer for static HTML documentation: the location fragment
//! selects a content fragment, which is fetched once, cached, and rendered
//! next to a sidebar with collapsible sections and a filtering search box.
//!
//! # Architecture
//!
//! - [`Router`] normalizes fragments, marks the active sidebar entry and
//!   loads content through its [`ContentCache`]
//! - [`NavigationController`] drives the mobile menu, section collapse
//!   state (persisted through a [`StateStore`]), link interception and
//!   keyboard shortcuts
//! - [`SearchController`] filters and highlights sidebar entries behind a
//!   [`Debouncer`]
//! - [`App`] wires the three over one shared [`Sidebar`] and dispatches
//!   [`UiEvent`]s
//!
//! The core never touches a browser API. Hosts implement the traits in
//! [`platform`] and paint the [`Sidebar`] model after each event; in-memory
//! doubles live in `mock` (behind the `mock` feature).
//!
//! # Example
//!
//! ```ignore
//! use docshelf_config::Config;
//! use docshelf_viewer::{App, Sidebar, Task};
//!
//! let config = Config::default();
//! let app = App::new(&config, Sidebar::from_outline(&config.nav), &platform);
//! app.run(Task::Start).await;
//! ```

mod app;
mod cache;
mod debounce;
mod error;
mod highlight;
pub mod memory;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod navigation;
mod path;
pub mod platform;
mod render;
mod router;
mod search;
mod sidebar;
mod state;

pub use app::{App, ClickTarget, Handled, Task, UiEvent};
pub use cache::ContentCache;
pub use debounce::{Debouncer, Ticket};
pub use error::LoadError;
pub use highlight::{contains_ignore_case, find_matches, render_marked};
pub use navigation::{KeyPress, NavigationController};
pub use path::{ContentPath, FRAGMENT_PREFIX, PathNormalizer, route_from_href};
pub use platform::{
    ContentSource, ContentView, FetchResponse, Location, Platform, SearchInput, StateStore, Timer,
    TransportError, Viewport,
};
pub use render::{ErrorView, Screen};
pub use router::{LoadOutcome, Router};
pub use search::{IndexEntry, SearchController, SearchIndex};
pub use sidebar::{NavEntry, Section, SharedSidebar, Sidebar};
pub use state::{SectionStateStore, SectionStates};
