//! Sidebar repaint planning.
//!
//! The DOM is only touched where the model changed since the last paint.

use docshelf_viewer::Sidebar;

/// New content for a link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Label {
    /// Put back the markup the link had when the page loaded.
    Original,
    /// Search hits wrapped in `<mark>`.
    Marked(String),
}

/// One DOM update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Change {
    /// Set the `collapsed` and `active-section` classes of a section.
    Section {
        index: usize,
        collapsed: bool,
        highlighted: bool,
    },
    /// Update a link: `active` class, parent visibility, label markup.
    Entry {
        index: usize,
        active: bool,
        hidden: bool,
        /// New label, when the search marks changed.
        label: Option<Label>,
    },
    /// Show or hide the mobile menu (sidebar and overlay).
    Menu { open: bool },
    /// Add or remove the "no results" placeholder.
    NoResults { show: bool },
}

/// Updates that bring a DOM painted from `previous` to `current`.
///
/// Without a previous paint every section and entry is updated; labels are
/// then only written for entries with search marks, since the page already
/// shows the original links. Losing every mark restores the original markup
/// rather than writing the plain label text, which keeps icons and
/// whitespace inside the link.
pub(crate) fn plan(previous: Option<&Sidebar>, current: &Sidebar) -> Vec<Change> {
    let mut changes = Vec::new();

    for (index, section) in current.sections().iter().enumerate() {
        let old = previous.and_then(|p| p.section(index));
        if old != Some(section) {
            changes.push(Change::Section {
                index,
                collapsed: section.is_collapsed(),
                highlighted: section.is_highlighted(),
            });
        }
    }

    for (index, entry) in current.entries().iter().enumerate() {
        let old = previous.and_then(|p| p.entry(index));
        if old == Some(entry) {
            continue;
        }
        let label_changed = match old {
            Some(old) => old.matches() != entry.matches(),
            None => !entry.matches().is_empty(),
        };
        changes.push(Change::Entry {
            index,
            active: entry.is_active(),
            hidden: entry.is_hidden(),
            label: label_changed.then(|| {
                if entry.matches().is_empty() {
                    Label::Original
                } else {
                    Label::Marked(entry.label_html())
                }
            }),
        });
    }

    if previous.is_none_or(|p| p.is_menu_open() != current.is_menu_open()) {
        changes.push(Change::Menu {
            open: current.is_menu_open(),
        });
    }
    if previous.is_none_or(|p| p.shows_no_results() != current.shows_no_results()) {
        changes.push(Change::NoResults {
            show: current.shows_no_results(),
        });
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use docshelf_config::{NavLink, NavOutline, NavSection};
    use pretty_assertions::assert_eq;

    fn sidebar() -> Sidebar {
        let link = |label: &str, path: &str| NavLink {
            label: label.to_owned(),
            path: Some(path.to_owned()),
        };
        Sidebar::from_outline(&NavOutline {
            sections: vec![NavSection {
                id: Some("guide".to_owned()),
                title: Some("Guide".to_owned()),
                links: vec![link("Setup", "setup.html"), link("Deploy", "deploy.html")],
            }],
            links: Vec::new(),
        })
        .with_mobile_menu(true)
    }

    #[test]
    fn test_first_paint_covers_everything() {
        let current = sidebar();

        let changes = plan(None, &current);

        assert_eq!(
            changes,
            vec![
                Change::Section {
                    index: 0,
                    collapsed: false,
                    highlighted: false,
                },
                Change::Entry {
                    index: 0,
                    active: false,
                    hidden: false,
                    label: None,
                },
                Change::Entry {
                    index: 1,
                    active: false,
                    hidden: false,
                    label: None,
                },
                Change::Menu { open: false },
                Change::NoResults { show: false },
            ]
        );
    }

    #[test]
    fn test_unchanged_model_plans_nothing() {
        let current = sidebar();

        assert!(plan(Some(&current), &current).is_empty());
    }

    #[test]
    fn test_only_changed_parts_are_planned() {
        let previous = sidebar();
        let mut current = previous.clone();
        current.set_active(|p| p == "deploy.html");
        current.set_search_result(0, false, Vec::new());
        current.set_menu_open(true);

        let changes = plan(Some(&previous), &current);

        assert_eq!(
            changes,
            vec![
                Change::Section {
                    index: 0,
                    collapsed: false,
                    highlighted: true,
                },
                Change::Entry {
                    index: 0,
                    active: false,
                    hidden: true,
                    label: None,
                },
                Change::Entry {
                    index: 1,
                    active: true,
                    hidden: false,
                    label: None,
                },
                Change::Menu { open: true },
            ]
        );
    }

    #[test]
    fn test_cleared_marks_restore_untrimmed_label() {
        let previous = Sidebar::from_outline(&NavOutline {
            sections: Vec::new(),
            links: vec![NavLink {
                label: "\n  Setup guide ".to_owned(),
                path: Some("setup.html".to_owned()),
            }],
        });
        let mut marked = previous.clone();
        marked.set_search_result(0, true, vec![3..8]);

        let changes = plan(Some(&previous), &marked);
        assert_eq!(
            changes,
            vec![Change::Entry {
                index: 0,
                active: false,
                hidden: false,
                label: Some(Label::Marked("\n  <mark>Setup</mark> guide ".to_owned())),
            }]
        );

        let mut cleared = marked.clone();
        cleared.set_search_result(0, true, Vec::new());
        let changes = plan(Some(&marked), &cleared);
        assert_eq!(
            changes,
            vec![Change::Entry {
                index: 0,
                active: false,
                hidden: false,
                label: Some(Label::Original),
            }]
        );
    }

    #[test]
    fn test_label_markup_follows_matches() {
        let previous = sidebar();
        let mut marked = previous.clone();
        marked.set_search_result(1, true, vec![0..3]);

        let changes = plan(Some(&previous), &marked);
        assert_eq!(
            changes,
            vec![Change::Entry {
                index: 1,
                active: false,
                hidden: false,
                label: Some(Label::Marked("<mark>Dep</mark>loy".to_owned())),
            }]
        );

        let mut cleared = marked.clone();
        cleared.set_search_result(1, true, Vec::new());
        let changes = plan(Some(&marked), &cleared);
        assert_eq!(
            changes,
            vec![Change::Entry {
                index: 1,
                active: false,
                hidden: false,
                label: Some(Label::Original),
            }]
        );
    }
}
