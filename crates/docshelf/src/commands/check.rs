//! `docshelf check` command implementation.

use std::path::PathBuf;

use clap::Args;
use docshelf_config::{CliSettings, Config};
use docshelf_viewer::memory::MemoryLocation;
use docshelf_viewer::{App, ContentPath, LoadError, LoadOutcome, Platform, Sidebar, Task};

use crate::error::CliError;
use crate::host::FsHost;
use crate::output::{Output, Tone};

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover docshelf.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site root directory (overrides config).
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Content directory under the site root (overrides config).
    #[arg(long)]
    content_dir: Option<String>,
}

/// How one page fared.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum PageStatus {
    Loaded,
    Failed(LoadError),
    /// The entry has no path to load.
    NoPath,
}

/// Result of loading one sidebar entry.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct PageCheck {
    pub(crate) label: String,
    pub(crate) path: Option<ContentPath>,
    pub(crate) status: PageStatus,
}

impl PageCheck {
    fn from_outcome(label: String, path: ContentPath, outcome: LoadOutcome) -> Self {
        let status = match outcome {
            LoadOutcome::Cached | LoadOutcome::Fetched => PageStatus::Loaded,
            LoadOutcome::Failed(error) => PageStatus::Failed(error),
        };
        Self {
            label,
            path: Some(path),
            status,
        }
    }
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any page fails to load.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            root: self.root,
            content_dir: self.content_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        if let Some(path) = &config.config_path {
            output.line(Tone::Plain, format_args!("Config: {}", path.display()));
        }
        output.line(
            Tone::Plain,
            format_args!("Content directory: {}", config.content_root().display()),
        );
        if config.nav.link_count() == 0 {
            output.line(Tone::Caution, "No navigation entries configured");
        }

        let checks = check_site(&config).await;
        let total = checks.len();
        let mut failed = 0;
        for check in &checks {
            let path = check
                .path
                .as_ref()
                .map_or_else(|| "-".to_owned(), ToString::to_string);
            match &check.status {
                PageStatus::Loaded => output.page_loaded(&check.label, path),
                PageStatus::Failed(error) => {
                    failed += 1;
                    output.page_failed(&check.label, path, error);
                }
                PageStatus::NoPath => output.page_skipped(&check.label),
            }
        }

        if failed > 0 {
            return Err(CliError::PagesFailed { failed, total });
        }
        output.line(Tone::Good, format_args!("All {total} pages loaded"));
        Ok(())
    }
}

/// Check the site on disk under the configured root.
pub(crate) async fn check_site(config: &Config) -> Vec<PageCheck> {
    let host = FsHost::new(&config.site_resolved.root);
    check_pages(config, host.platform(), &host.location).await
}

/// Start the viewer on an empty location, then route to every sidebar entry
/// in order. The first check is the default page.
///
/// `location` must be the location port of `platform`; hash changes are
/// collected from it and routed in place of `hashchange` events.
pub(crate) async fn check_pages(
    config: &Config,
    platform: &Platform,
    location: &MemoryLocation,
) -> Vec<PageCheck> {
    let app = App::new(config, Sidebar::from_outline(&config.nav), platform);
    let router = app.router();
    let mut checks = Vec::new();

    // An empty location redirects to the default page
    app.run(Task::Start).await;
    if location.take_hash_change() {
        let outcome = router.handle_route().await;
        checks.push(PageCheck::from_outcome(
            "Home".to_owned(),
            router.current_path(),
            outcome,
        ));
    }

    let entries: Vec<(String, Option<String>)> = app
        .sidebar()
        .borrow()
        .entries()
        .iter()
        .map(|e| (e.label().to_owned(), e.path().map(str::to_owned)))
        .collect();

    for (label, raw) in entries {
        let Some(raw) = raw else {
            checks.push(PageCheck {
                label,
                path: None,
                status: PageStatus::NoPath,
            });
            continue;
        };
        router.navigate_to(&raw);
        location.take_hash_change();
        let outcome = router.handle_route().await;
        checks.push(PageCheck::from_outcome(label, router.current_path(), outcome));
    }
    checks
}

#[cfg(test)]
mod tests {
    use super::*;
    use docshelf_config::{NavLink, NavOutline, NavSection};
    use docshelf_viewer::TransportError;
    use docshelf_viewer::mock::{MockContentSource, TestPlatform};
    use pretty_assertions::assert_eq;

    fn link(label: &str, path: Option<&str>) -> NavLink {
        NavLink {
            label: label.to_owned(),
            path: path.map(str::to_owned),
        }
    }

    fn site() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let content = dir.path().join("content");
        std::fs::create_dir_all(&content).unwrap();
        std::fs::write(content.join("start.html"), "<h1>Start</h1>").unwrap();
        std::fs::write(content.join("guide.html"), "<h1>Guide</h1>").unwrap();
        std::fs::write(content.join("blank.html"), "  \n").unwrap();

        let mut config = Config::default();
        config.site_resolved.root = dir.path().to_path_buf();
        config.nav = NavOutline {
            sections: vec![NavSection {
                id: Some("basics".to_owned()),
                title: Some("Basics".to_owned()),
                links: vec![
                    link("Start", Some("start.html")),
                    link("Guide", Some("guide")),
                    link("Blank", Some("blank.html")),
                ],
            }],
            links: vec![link("Missing", Some("missing")), link("Draft", None)],
        };
        (dir, config)
    }

    #[tokio::test]
    async fn test_check_site_reports_every_entry() {
        let (_dir, config) = site();

        let checks = check_site(&config).await;

        let summary: Vec<(&str, Option<&str>, &PageStatus)> = checks
            .iter()
            .map(|c| (c.label.as_str(), c.path.as_ref().map(ContentPath::as_str), &c.status))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Home", Some("start.html"), &PageStatus::Loaded),
                ("Start", Some("start.html"), &PageStatus::Loaded),
                ("Guide", Some("guide.html"), &PageStatus::Loaded),
                (
                    "Blank",
                    Some("blank.html"),
                    &PageStatus::Failed(LoadError::EmptyBody)
                ),
                (
                    "Missing",
                    Some("missing.html"),
                    &PageStatus::Failed(LoadError::Status { status: 404 })
                ),
                ("Draft", None, &PageStatus::NoPath),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_home_page_fails_as_not_found() {
        let (_dir, mut config) = site();
        config.router.default_path = "index.html".to_owned();

        let checks = check_site(&config).await;

        assert_eq!(checks[0].label, "Home");
        assert!(matches!(
            checks[0].status,
            PageStatus::Failed(LoadError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_check_pages_reports_transport_and_server_failures() {
        let source = MockContentSource::new()
            .with_page("content/start.html", "<h1>Start</h1>")
            .with_status("content/api.html", 500)
            .with_network_error("content/guide.html", "connection reset");
        let platform = TestPlatform::new("").with_source(source);
        let mut config = Config::default();
        config.nav = NavOutline {
            sections: Vec::new(),
            links: vec![
                link("Start", Some("start")),
                link("API", Some("api.html")),
                link("Guide", Some("guide.html")),
            ],
        };

        let checks = check_pages(&config, &platform.platform(), &platform.location).await;

        let statuses: Vec<(&str, &PageStatus)> = checks
            .iter()
            .map(|c| (c.label.as_str(), &c.status))
            .collect();
        assert_eq!(
            statuses,
            vec![
                ("Home", &PageStatus::Loaded),
                ("Start", &PageStatus::Loaded),
                ("API", &PageStatus::Failed(LoadError::Status { status: 500 })),
                (
                    "Guide",
                    &PageStatus::Failed(LoadError::Network(TransportError::new(
                        "connection reset"
                    )))
                ),
            ]
        );
        // The home page is served from cache when its entry is checked
        assert_eq!(
            platform.source.requests(),
            vec![
                "content/start.html".to_owned(),
                "content/api.html".to_owned(),
                "content/guide.html".to_owned(),
            ]
        );
    }
}
