//! Configuration management for Docshelf.
//!
//! Parses `docshelf.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`]. Hosts that
//! embed the configuration text (the browser host reads it from a
//! `<script type="application/toml">` element) use [`Config::from_toml_str`].
//!
//! ## Sections
//!
//! - `[site]`: site root directory (native hosts only)
//! - `[router]`: default page, default extension, content directory, startup delay
//! - `[navigation]`: mobile breakpoint and the local storage key for section state
//! - `[search]`: debounce window
//! - `[messages]`: user-visible strings
//! - `[nav]`: sidebar outline used when there is no rendered DOM to read

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override site root directory.
    pub root: Option<PathBuf>,
    /// Override content directory (relative to the site root).
    pub content_dir: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docshelf.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site configuration (paths are relative strings from TOML).
    site: SiteConfigRaw,
    /// Router configuration.
    pub router: RouterConfig,
    /// Sidebar navigation configuration.
    pub navigation: NavigationConfig,
    /// Search configuration.
    pub search: SearchConfig,
    /// User-visible strings.
    pub messages: Messages,
    /// Sidebar outline.
    pub nav: NavOutline,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw site configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    root: Option<String>,
}

/// Resolved site configuration with absolute paths.
#[derive(Debug, Default)]
pub struct SiteConfig {
    /// Directory holding the page shell and the content directory.
    pub root: PathBuf,
}

/// Router configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Page shown when the location has no fragment.
    pub default_path: String,
    /// Extension appended to paths without one (with or without a leading dot).
    pub default_extension: String,
    /// Directory content fragments are fetched from.
    pub content_dir: String,
    /// Delay before the initial route is handled, in milliseconds.
    pub startup_delay_ms: u64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            default_path: "start.html".to_owned(),
            default_extension: "html".to_owned(),
            content_dir: "content".to_owned(),
            startup_delay_ms: 10,
        }
    }
}

impl RouterConfig {
    /// Default extension without a leading dot.
    #[must_use]
    pub fn extension(&self) -> &str {
        self.default_extension.trim_start_matches('.')
    }

    /// Content directory without surrounding slashes.
    #[must_use]
    pub fn content_dir(&self) -> &str {
        self.content_dir.trim_matches('/')
    }

    /// Startup delay as a [`Duration`].
    #[must_use]
    pub fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }
}

/// Sidebar navigation configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Viewport width (logical pixels) at or below which the mobile menu is used.
    pub mobile_breakpoint: u32,
    /// Local storage key holding the section collapse state.
    pub storage_key: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 920,
            storage_key: "sectionStates".to_owned(),
        }
    }
}

/// Search configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before filtering, in milliseconds.
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: 300 }
    }
}

impl SearchConfig {
    /// Debounce window as a [`Duration`].
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// User-visible strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Text under the loading spinner.
    pub loading: String,
    /// Heading of the error view.
    pub error_title: String,
    /// Label in front of the failed path.
    pub path_label: String,
    /// Label in front of the error description.
    pub error_label: String,
    /// Retry button caption.
    pub retry: String,
    /// Home button caption.
    pub home: String,
    /// Placeholder shown when a search matches nothing.
    pub no_results: String,
    /// Section title indexed for links outside any titled section.
    pub unknown_section: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            loading: "Loading documentation...".to_owned(),
            error_title: "Could not load the page".to_owned(),
            path_label: "Path".to_owned(),
            error_label: "Error".to_owned(),
            retry: "Try again".to_owned(),
            home: "Home".to_owned(),
            no_results: "Nothing found".to_owned(),
            unknown_section: "Unknown".to_owned(),
        }
    }
}

/// Sidebar outline: sections and their links, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NavOutline {
    /// Collapsible sections.
    pub sections: Vec<NavSection>,
    /// Links that live outside any section.
    pub links: Vec<NavLink>,
}

impl NavOutline {
    /// Total number of links in the outline.
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.links.len() + self.sections.iter().map(|s| s.links.len()).sum::<usize>()
    }
}

/// A collapsible sidebar section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NavSection {
    /// Identifier used as the persisted state key (`data-section`).
    pub id: Option<String>,
    /// Visible section title.
    pub title: Option<String>,
    /// Links in this section.
    pub links: Vec<NavLink>,
}

/// A sidebar link.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NavLink {
    /// Visible label.
    pub label: String,
    /// Target path (`data-path`), as written in the markup.
    #[serde(default)]
    pub path: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docshelf.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the result does not validate.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Parse configuration from TOML text.
    ///
    /// Relative paths resolve against the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(text)?;
        config.resolve_paths(Path::new("."));
        config.validate()?;
        Ok(config)
    }

    /// Directory content fragments are read from.
    #[must_use]
    pub fn content_root(&self) -> PathBuf {
        self.site_resolved.root.join(self.router.content_dir())
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(root) = &settings.root {
            self.site_resolved.root.clone_from(root);
        }
        if let Some(content_dir) = &settings.content_dir {
            self.router.content_dir.clone_from(content_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfigRaw::default(),
            router: RouterConfig::default(),
            navigation: NavigationConfig::default(),
            search: SearchConfig::default(),
            messages: Messages::default(),
            nav: NavOutline::default(),
            site_resolved: SiteConfig {
                root: base.to_path_buf(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file or text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_router()?;
        self.validate_navigation()?;
        Ok(())
    }

    /// Validate router configuration.
    fn validate_router(&self) -> Result<(), ConfigError> {
        let router = &self.router;
        require_non_empty(&router.default_path, "router.default_path")?;
        require_non_empty(router.extension(), "router.default_extension")?;
        require_non_empty(router.content_dir(), "router.content_dir")?;

        // The default path is used verbatim, so it must already be in canonical form
        let path = router.default_path.as_str();
        if path.starts_with('#') || path.starts_with('/') {
            return Err(ConfigError::Validation(
                "router.default_path must not start with '#' or '/'".to_owned(),
            ));
        }
        let last_segment = path.rsplit('/').next().unwrap_or(path);
        if !path.ends_with('/') && !last_segment.contains('.') {
            return Err(ConfigError::Validation(
                "router.default_path must have a file extension".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate navigation configuration.
    fn validate_navigation(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.navigation.storage_key, "navigation.storage_key")?;
        if self.navigation.mobile_breakpoint == 0 {
            return Err(ConfigError::Validation(
                "navigation.mobile_breakpoint must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.site_resolved = SiteConfig {
            root: config_dir.join(self.site.root.as_deref().unwrap_or(".")),
        };
    }
}
