//! Location fragment normalization.
//!
//! Maps raw hash fragments (`#/guide`, `#`, `#/api/`) to canonical
//! content-relative paths (`guide.html`, `start.html`, `api/`).

use std::fmt;

use docshelf_config::RouterConfig;

/// Prefix of every navigable fragment.
pub const FRAGMENT_PREFIX: &str = "#/";

/// A canonical content-relative path.
///
/// Never empty and never starts with `#` or `/`. Has a file extension in its
/// last segment unless it ends with `/`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentPath(String);

impl ContentPath {
    /// The path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Location fragment that navigates to this path.
    #[must_use]
    pub fn to_fragment(&self) -> String {
        format!("{FRAGMENT_PREFIX}{}", self.0)
    }
}

impl fmt::Display for ContentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContentPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ContentPath {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ContentPath {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Normalizes raw fragments into [`ContentPath`]s.
#[derive(Clone, Debug)]
pub struct PathNormalizer {
    default_path: String,
    extension: String,
}

impl PathNormalizer {
    /// Create a normalizer.
    ///
    /// `default_path` must already be canonical (config validation checks
    /// this); `extension` may carry a leading dot.
    #[must_use]
    pub fn new(default_path: impl Into<String>, extension: &str) -> Self {
        Self {
            default_path: default_path.into(),
            extension: extension.trim_start_matches('.').to_owned(),
        }
    }

    /// Create a normalizer from router configuration.
    #[must_use]
    pub fn from_config(config: &RouterConfig) -> Self {
        Self::new(config.default_path.clone(), config.extension())
    }

    /// The path used for an empty fragment.
    #[must_use]
    pub fn default_path(&self) -> ContentPath {
        ContentPath(self.default_path.clone())
    }

    /// Normalize a raw fragment.
    ///
    /// Strips every leading `#` and `/`. An empty remainder maps to
    /// the default path. A remainder whose last segment has no extension and
    /// which does not end with `/` gets the default extension appended.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> ContentPath {
        let path = raw.trim_start_matches(['#', '/']);
        if path.is_empty() {
            return self.default_path();
        }

        if path.ends_with('/') || has_extension(path) {
            ContentPath(path.to_owned())
        } else {
            ContentPath(format!("{path}.{}", self.extension))
        }
    }
}

/// Whether the last path segment contains a dot.
fn has_extension(path: &str) -> bool {
    path.rsplit('/').next().is_some_and(|segment| segment.contains('.'))
}

/// Extract the raw path from an in-content link target.
///
/// Returns `None` unless `href` starts with the fragment prefix.
#[must_use]
pub fn route_from_href(href: &str) -> Option<&str> {
    href.strip_prefix(FRAGMENT_PREFIX)
}
