//! The sidebar markup: reading it into a [`Sidebar`] and painting the model
//! back.

use docshelf_config::{NavLink, NavOutline, NavSection};
use docshelf_viewer::Sidebar;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, NodeList};

use crate::paint::{Change, Label};
use crate::selectors::{
    ACTIVE_CLASS, ACTIVE_SECTION_CLASS, COLLAPSED_CLASS, MENU, NAV_LINK, NAV_SECTION,
    NO_RESULTS_CLASS, NO_RESULTS_ID, OVERLAY_ID, PATH_ATTR, SECTION_ATTR, SECTION_HEADER,
    SECTION_TITLE, SIDEBAR_ID,
};

/// Elements of a `querySelectorAll` result, in document order.
fn elements(list: Result<NodeList, JsValue>) -> Vec<Element> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn trimmed_text(element: &Element) -> Option<String> {
    element.text_content().map(|t| t.trim().to_owned())
}

/// Link text is kept as is so search marks line up with what the page shows.
fn nav_link(element: &Element) -> NavLink {
    NavLink {
        label: element.text_content().unwrap_or_default(),
        path: element.get_attribute(PATH_ATTR),
    }
}

fn set_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

fn paint_link(link: &Element, active: bool, hidden: bool) {
    set_class(link, ACTIVE_CLASS, active);
    if let Some(parent) = link
        .parent_element()
        .and_then(|p| p.dyn_into::<HtmlElement>().ok())
    {
        let style = parent.style();
        let _ = if hidden {
            style.set_property("display", "none")
        } else {
            style.remove_property("display").map(drop)
        };
    }
}

/// Element handles for the sidebar, indexed like the [`Sidebar`] model.
pub(crate) struct DomSidebar {
    document: Document,
    sections: Vec<Element>,
    headers: Vec<Option<Element>>,
    links: Vec<Element>,
    /// Markup of each link as loaded.
    originals: Vec<String>,
    sidebar: Option<Element>,
    overlay: Option<Element>,
    menu: Option<Element>,
    no_results_text: String,
}

impl DomSidebar {
    /// Read the sidebar markup.
    ///
    /// Links inside a `.nav-section` come first, section by section, then the
    /// links outside any section; the same order [`Sidebar::from_outline`]
    /// uses, so model indices address these handles.
    pub(crate) fn read(document: Document, no_results_text: String) -> (Sidebar, Self) {
        let sections = elements(document.query_selector_all(NAV_SECTION));
        let mut outline = NavOutline {
            sections: Vec::with_capacity(sections.len()),
            links: Vec::new(),
        };
        let mut headers = Vec::with_capacity(sections.len());
        let mut links = Vec::new();

        for section in &sections {
            let header = section.query_selector(SECTION_HEADER).ok().flatten();
            let title = section
                .query_selector(SECTION_TITLE)
                .ok()
                .flatten()
                .and_then(|t| trimmed_text(&t));
            let section_links: Vec<Element> = elements(section.query_selector_all("a"))
                .into_iter()
                .filter(|a| a.matches(NAV_LINK).unwrap_or(false))
                .collect();
            outline.sections.push(NavSection {
                id: header.as_ref().and_then(|h| h.get_attribute(SECTION_ATTR)),
                title,
                links: section_links.iter().map(nav_link).collect(),
            });
            headers.push(header);
            links.extend(section_links);
        }

        for link in elements(document.query_selector_all(NAV_LINK)) {
            if link.closest(NAV_SECTION).ok().flatten().is_none() {
                outline.links.push(nav_link(&link));
                links.push(link);
            }
        }

        let sidebar = document.get_element_by_id(SIDEBAR_ID);
        let overlay = document.get_element_by_id(OVERLAY_ID);
        let menu = document.query_selector(MENU).ok().flatten();
        let originals = links.iter().map(Element::inner_html).collect();
        let model = Sidebar::from_outline(&outline)
            .with_mobile_menu(sidebar.is_some() && overlay.is_some());

        tracing::debug!(
            sections = sections.len(),
            links = links.len(),
            "Read sidebar markup"
        );
        let dom = Self {
            document,
            sections,
            headers,
            links,
            originals,
            sidebar,
            overlay,
            menu,
            no_results_text,
        };
        (model, dom)
    }

    /// Model index of a `.section-header` element.
    pub(crate) fn section_of_header(&self, header: &Element) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.as_ref() == Some(header))
    }

    /// Apply planned updates.
    pub(crate) fn apply(&self, changes: &[Change]) {
        for change in changes {
            match change {
                Change::Section {
                    index,
                    collapsed,
                    highlighted,
                } => {
                    if let Some(section) = self.sections.get(*index) {
                        set_class(section, COLLAPSED_CLASS, *collapsed);
                        set_class(section, ACTIVE_SECTION_CLASS, *highlighted);
                    }
                }
                Change::Entry {
                    index,
                    active,
                    hidden,
                    label,
                } => {
                    if let Some(link) = self.links.get(*index) {
                        paint_link(link, *active, *hidden);
                    }
                    if let Some(label) = label {
                        self.paint_label(*index, label);
                    }
                }
                Change::Menu { open } => {
                    for element in [&self.sidebar, &self.overlay].into_iter().flatten() {
                        set_class(element, ACTIVE_CLASS, *open);
                    }
                }
                Change::NoResults { show } => self.paint_no_results(*show),
            }
        }
    }

    fn paint_label(&self, index: usize, label: &Label) {
        let (Some(link), Some(original)) = (self.links.get(index), self.originals.get(index))
        else {
            return;
        };
        match label {
            Label::Original => link.set_inner_html(original),
            Label::Marked(html) => link.set_inner_html(html),
        }
    }

    fn paint_no_results(&self, show: bool) {
        let existing = self.document.get_element_by_id(NO_RESULTS_ID);
        match (show, existing) {
            (true, None) => {
                let Some(menu) = &self.menu else {
                    return;
                };
                if let Ok(message) = self.document.create_element("div") {
                    message.set_id(NO_RESULTS_ID);
                    message.set_class_name(NO_RESULTS_CLASS);
                    message.set_text_content(Some(&self.no_results_text));
                    let _ = menu.append_child(&message);
                }
            }
            (false, Some(message)) => message.remove(),
            _ => {}
        }
    }
}
