//! Page wiring: builds the [`App`] over the browser ports, installs the
//! event listeners, and repaints the sidebar after every event.

use std::cell::RefCell;
use std::rc::Rc;

use docshelf_viewer::{
    App, ClickTarget, ContentSource, ContentView, KeyPress, Location, Platform, SearchInput,
    Sidebar, StateStore, Task, Timer, UiEvent, Viewport,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, EventTarget, HtmlInputElement, KeyboardEvent, Window};

use crate::action::action_target;
use crate::config::load_config;
use crate::dom::DomSidebar;
use crate::paint::plan;
use crate::ports::{
    BrowserLocation, BrowserTimer, DomSearchInput, DomView, FetchSource, LocalStore,
    WindowViewport,
};
use crate::ready::is_parsing;
use crate::selectors::{
    ACTION, ACTION_ATTR, CONFIG_SCRIPT_ID, CONTENT_ID, CONTENT_LINK, MENU_TOGGLE, NAV_LINK,
    OVERLAY, PATH_ATTR, SEARCH_CLEAR, SEARCH_INPUT_ID, SECTION_HEADER, SIDEBAR_CLOSE,
};

thread_local! {
    static HOST: RefCell<Option<Rc<Host>>> = const { RefCell::new(None) };
}

/// Run `f` against the page's app, if it has started.
pub(crate) fn with_host(f: impl FnOnce(&Rc<Host>)) {
    let host = HOST.with(|h| h.borrow().clone());
    match host {
        Some(host) => f(&host),
        None => tracing::warn!("Viewer not started"),
    }
}

/// Start the viewer once the document is parsed.
pub(crate) fn boot() {
    let Some(window) = web_sys::window() else {
        tracing::error!("No window, viewer not started");
        return;
    };
    let Some(document) = window.document() else {
        tracing::error!("No document, viewer not started");
        return;
    };

    if is_parsing(&document.ready_state()) {
        let init = Closure::once(move || start(&window));
        let _ = document.add_event_listener_with_callback(
            "DOMContentLoaded",
            init.as_ref().unchecked_ref(),
        );
        init.forget();
    } else {
        start(&window);
    }
}

fn start(window: &Window) {
    let Some(document) = window.document() else {
        return;
    };
    let config = load_config(
        document
            .get_element_by_id(CONFIG_SCRIPT_ID)
            .and_then(|e| e.text_content())
            .as_deref(),
    );

    let search_input = document
        .get_element_by_id(SEARCH_INPUT_ID)
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok());
    let platform = Platform {
        source: Rc::new(FetchSource::new(window.clone())) as Rc<dyn ContentSource>,
        store: Rc::new(LocalStore::new(window)) as Rc<dyn StateStore>,
        location: Rc::new(BrowserLocation::new(window.clone())) as Rc<dyn Location>,
        view: Rc::new(DomView::new(
            window.clone(),
            document.get_element_by_id(CONTENT_ID),
            config.messages.clone(),
        )) as Rc<dyn ContentView>,
        timer: Rc::new(BrowserTimer::new(window.clone())) as Rc<dyn Timer>,
        viewport: Rc::new(WindowViewport::new(window.clone())) as Rc<dyn Viewport>,
        search_input: search_input
            .clone()
            .map(|input| Rc::new(DomSearchInput::new(input)) as Rc<dyn SearchInput>),
    };

    let (sidebar, dom) = DomSidebar::read(document.clone(), config.messages.no_results.clone());
    let host = Rc::new(Host {
        app: App::new(&config, sidebar, &platform),
        dom,
        painted: RefCell::new(None),
    });
    HOST.with(|h| *h.borrow_mut() = Some(Rc::clone(&host)));

    host.listen(window, &document, search_input.as_ref());
    host.paint();
    host.spawn(Task::Start);
}

fn listen_on(target: &EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if target
        .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        .is_err()
    {
        tracing::warn!(kind, "Failed to install event listener");
    }
    closure.forget();
}

fn key_press(event: &KeyboardEvent) -> KeyPress {
    KeyPress {
        key: event.key(),
        alt: event.alt_key(),
        ctrl: event.ctrl_key(),
        meta: event.meta_key(),
    }
}

fn closest(element: &Element, selector: &str) -> Option<Element> {
    element.closest(selector).ok().flatten()
}

/// The viewer bound to the page.
pub(crate) struct Host {
    app: App,
    dom: DomSidebar,
    painted: RefCell<Option<Sidebar>>,
}

impl Host {
    pub(crate) fn app(&self) -> &App {
        &self.app
    }

    /// Bring the sidebar markup up to date with the model.
    pub(crate) fn paint(&self) {
        let current = self.app.sidebar().borrow();
        let mut painted = self.painted.borrow_mut();
        let changes = plan(painted.as_ref(), &current);
        if !changes.is_empty() {
            self.dom.apply(&changes);
        }
        *painted = Some(current.clone());
    }

    /// Handle an event; returns whether to prevent the default action.
    fn dispatch(self: &Rc<Self>, event: UiEvent) -> bool {
        let handled = self.app.handle(event);
        self.paint();
        if let Some(task) = handled.task {
            self.spawn(task);
        }
        handled.prevent_default
    }

    /// Run `task` in the background and repaint when it finishes.
    fn spawn(self: &Rc<Self>, task: Task) {
        if task == Task::Route {
            // The route marks the same entry; paint it before the fetch
            let path = self.app.router().current_path();
            self.app.navigation().highlight_active(&path);
            self.paint();
        }
        let host = Rc::clone(self);
        spawn_local(async move {
            host.app.run(task).await;
            host.paint();
        });
    }

    fn classify(&self, element: &Element) -> ClickTarget {
        if let Some(button) = closest(element, ACTION)
            && let Some(target) = action_target(
                &button.get_attribute(ACTION_ATTR).unwrap_or_default(),
                button.get_attribute(PATH_ATTR),
            )
        {
            return target;
        }
        if let Some(link) = closest(element, NAV_LINK) {
            return ClickTarget::NavLink {
                path: link.get_attribute(PATH_ATTR),
            };
        }
        if let Some(header) = closest(element, SECTION_HEADER) {
            return self
                .dom
                .section_of_header(&header)
                .map_or(ClickTarget::Other, |section| ClickTarget::SectionHeader {
                    section,
                });
        }
        if closest(element, MENU_TOGGLE).is_some() {
            return ClickTarget::MenuToggle;
        }
        if closest(element, OVERLAY).is_some() {
            return ClickTarget::Overlay;
        }
        if closest(element, SIDEBAR_CLOSE).is_some() {
            return ClickTarget::SidebarClose;
        }
        if closest(element, SEARCH_CLEAR).is_some() {
            return ClickTarget::SearchClear;
        }
        if let Some(href) = closest(element, CONTENT_LINK).and_then(|a| a.get_attribute("href")) {
            return ClickTarget::ContentLink { href };
        }
        ClickTarget::Other
    }

    fn listen(
        self: &Rc<Self>,
        window: &Window,
        document: &Document,
        search: Option<&HtmlInputElement>,
    ) {
        let host = Rc::clone(self);
        listen_on(document, "click", move |event| {
            let Some(element) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let target = host.classify(&element);
            if target != ClickTarget::Other && host.dispatch(UiEvent::Click(target)) {
                event.prevent_default();
            }
        });

        let host = Rc::clone(self);
        listen_on(document, "keydown", move |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>().map(key_press) else {
                return;
            };
            if host.dispatch(UiEvent::KeyDown(key)) {
                event.prevent_default();
            }
        });

        if let Some(input) = search {
            let host = Rc::clone(self);
            listen_on(input, "keydown", move |event| {
                if let Some(key) = event.dyn_ref::<KeyboardEvent>().map(key_press) {
                    host.dispatch(UiEvent::SearchKeyDown(key));
                }
            });

            let host = Rc::clone(self);
            let field = input.clone();
            listen_on(input, "input", move |_| {
                host.dispatch(UiEvent::SearchInput(field.value()));
            });
        }

        let host = Rc::clone(self);
        let viewport = window.clone();
        listen_on(window, "resize", move |_| {
            if let Some(width) = viewport.inner_width().ok().and_then(|w| w.as_f64()) {
                host.dispatch(UiEvent::Resize { width });
            }
        });

        let host = Rc::clone(self);
        listen_on(window, "hashchange", move |_| {
            host.dispatch(UiEvent::HashChange);
        });
    }
}
