//! `docshelf search` command implementation.

use std::path::PathBuf;

use clap::Args;
use docshelf_config::Config;
use docshelf_viewer::{App, Sidebar};

use crate::error::CliError;
use crate::host::FsHost;
use crate::output::{Output, Tone};

/// Arguments for the search command.
#[derive(Args)]
pub(crate) struct SearchArgs {
    /// Text to look for in entry labels and section titles.
    query: String,

    /// Path to configuration file (default: auto-discover docshelf.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Visible entries grouped under their section heading.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ResultGroup {
    pub(crate) heading: String,
    pub(crate) entries: Vec<usize>,
}

impl SearchArgs {
    /// Execute the search command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;

        let host = FsHost::new(&config.site_resolved.root);
        let app = App::new(&config, Sidebar::from_outline(&config.nav), host.platform());
        let visible = app.search().filter(&self.query);
        if visible == 0 {
            output.line(Tone::Caution, &config.messages.no_results);
            return Ok(());
        }

        let sidebar = app.sidebar().borrow();
        for group in group_results(&sidebar, &config.messages.unknown_section) {
            output.line(Tone::Heading, &group.heading);
            for index in group.entries {
                let Some(entry) = sidebar.entry(index) else {
                    continue;
                };
                output.line(
                    Tone::Plain,
                    format_args!(
                        "  {}  {}",
                        output.marked(entry.label(), entry.matches()),
                        entry.path().unwrap_or("-")
                    ),
                );
            }
        }
        output.line(
            Tone::Plain,
            format_args!("{visible} of {} entries", sidebar.entries().len()),
        );
        Ok(())
    }
}

/// Group the visible entries of `sidebar` by consecutive section.
pub(crate) fn group_results(sidebar: &Sidebar, unknown_section: &str) -> Vec<ResultGroup> {
    let mut groups: Vec<ResultGroup> = Vec::new();
    let mut current: Option<Option<usize>> = None;
    for (index, entry) in sidebar.entries().iter().enumerate() {
        if entry.is_hidden() {
            continue;
        }
        if current != Some(entry.section()) {
            current = Some(entry.section());
            groups.push(ResultGroup {
                heading: sidebar
                    .section_title_of(index)
                    .unwrap_or(unknown_section)
                    .to_owned(),
                entries: Vec::new(),
            });
        }
        if let Some(group) = groups.last_mut() {
            group.entries.push(index);
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use docshelf_config::{NavLink, NavOutline, NavSection};
    use pretty_assertions::assert_eq;

    fn link(label: &str, path: &str) -> NavLink {
        NavLink {
            label: label.to_owned(),
            path: Some(path.to_owned()),
        }
    }

    #[test]
    fn test_group_results_by_section() {
        let mut config = Config::default();
        config.nav = NavOutline {
            sections: vec![
                NavSection {
                    id: Some("guide".to_owned()),
                    title: Some("Guide".to_owned()),
                    links: vec![link("Setup", "setup.html"), link("Upgrade", "upgrade.html")],
                },
                NavSection {
                    id: Some("ops".to_owned()),
                    title: Some("Operations".to_owned()),
                    links: vec![link("Backup", "backup.html")],
                },
            ],
            links: vec![link("Update log", "changelog.html")],
        };
        let host = FsHost::new(&config.site_resolved.root);
        let app = App::new(&config, Sidebar::from_outline(&config.nav), host.platform());

        let visible = app.search().filter("up");
        let groups = group_results(&app.sidebar().borrow(), "Unknown");

        assert_eq!(visible, 4);
        assert_eq!(
            groups,
            vec![
                ResultGroup {
                    heading: "Guide".to_owned(),
                    entries: vec![0, 1],
                },
                ResultGroup {
                    heading: "Operations".to_owned(),
                    entries: vec![2],
                },
                ResultGroup {
                    heading: "Unknown".to_owned(),
                    entries: vec![3],
                },
            ]
        );
    }

    #[test]
    fn test_group_results_skips_hidden() {
        let mut config = Config::default();
        config.nav = NavOutline {
            sections: Vec::new(),
            links: vec![link("Alpha", "a.html"), link("Beta", "b.html")],
        };
        let host = FsHost::new(&config.site_resolved.root);
        let app = App::new(&config, Sidebar::from_outline(&config.nav), host.platform());

        app.search().filter("beta");
        let groups = group_results(&app.sidebar().borrow(), "Other");

        assert_eq!(
            groups,
            vec![ResultGroup {
                heading: "Other".to_owned(),
                entries: vec![1],
            }]
        );
    }
}
