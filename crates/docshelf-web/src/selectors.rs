//! Element ids, selectors and class names of the page shell.

pub(crate) const CONTENT_ID: &str = "appContent";
pub(crate) const SIDEBAR_ID: &str = "sidebar";
pub(crate) const OVERLAY_ID: &str = "mobileOverlay";
pub(crate) const SEARCH_INPUT_ID: &str = "searchInput";
pub(crate) const NO_RESULTS_ID: &str = "noResultsMessage";
pub(crate) const CONFIG_SCRIPT_ID: &str = "docshelf-config";

pub(crate) const MENU: &str = ".menu";
pub(crate) const NAV_SECTION: &str = ".nav-section";
pub(crate) const SECTION_HEADER: &str = ".section-header";
pub(crate) const SECTION_TITLE: &str = ".section-title";
pub(crate) const NAV_LINK: &str = ".nav a";
pub(crate) const SEARCH_CLEAR: &str = ".search-clear";
pub(crate) const CONTENT_LINK: &str = "#appContent a";
pub(crate) const ACTION: &str = "[data-action]";

pub(crate) const SECTION_ATTR: &str = "data-section";
pub(crate) const PATH_ATTR: &str = "data-path";
pub(crate) const ACTION_ATTR: &str = "data-action";

pub(crate) const ACTIVE_CLASS: &str = "active";
pub(crate) const COLLAPSED_CLASS: &str = "collapsed";
pub(crate) const ACTIVE_SECTION_CLASS: &str = "active-section";
pub(crate) const NO_RESULTS_CLASS: &str = "no-results";

pub(crate) const MENU_TOGGLE: &str = "#mobileMenuToggle";
pub(crate) const OVERLAY: &str = "#mobileOverlay";
pub(crate) const SIDEBAR_CLOSE: &str = "#sidebarClose";
