//! What the content area shows, and its HTML form.

use docshelf_config::Messages;
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::error::LoadError;
use crate::path::ContentPath;

/// Contents of the content area.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Loading placeholder.
    Loading,
    /// A loaded content fragment.
    Page {
        /// Path the fragment was loaded from.
        path: ContentPath,
        /// Fragment HTML, inserted as-is.
        html: String,
    },
    /// A failed load.
    Error(ErrorView),
}

/// A failed load as shown to the reader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorView {
    /// Path that failed; the retry action reloads it.
    pub path: ContentPath,
    /// Human-readable description.
    pub message: String,
    /// Path the home action navigates to.
    pub home: ContentPath,
}

impl ErrorView {
    /// Build the view for `error` at `path`.
    #[must_use]
    pub fn new(path: ContentPath, error: &LoadError, home: ContentPath) -> Self {
        Self {
            path,
            message: error.to_string(),
            home,
        }
    }
}

impl Screen {
    /// HTML for the content element.
    ///
    /// Buttons carry `data-action` (`retry` or `home`) and `data-path`
    /// attributes; the host routes clicks on them back to the app.
    #[must_use]
    pub fn to_html(&self, messages: &Messages) -> String {
        match self {
            Self::Loading => {
                let loading = encode_text(&messages.loading);
                format!(
                    concat!(
                        r#"<div class="loading-spinner text-center py-5">"#,
                        r#"<div class="spinner-border text-primary" role="status">"#,
                        r#"<span class="visually-hidden">{loading}</span></div>"#,
                        r#"<p class="mt-3 text-muted">{loading}</p></div>"#,
                    ),
                    loading = loading
                )
            }
            Self::Page { html, .. } => html.clone(),
            Self::Error(view) => format!(
                concat!(
                    r#"<div class="error"><h3>{title}</h3>"#,
                    r"<p><strong>{path_label}:</strong> {path}</p>",
                    r"<p><strong>{error_label}:</strong> {message}</p>",
                    r#"<button class="retry-btn" data-action="retry" data-path="{path_attr}">{retry}</button>"#,
                    r#"<button class="home-btn" data-action="home" data-path="{home_attr}">{home}</button>"#,
                    r"</div>",
                ),
                title = encode_text(&messages.error_title),
                path_label = encode_text(&messages.path_label),
                path = encode_text(view.path.as_str()),
                error_label = encode_text(&messages.error_label),
                message = encode_text(&view.message),
                path_attr = encode_double_quoted_attribute(view.path.as_str()),
                retry = encode_text(&messages.retry),
                home_attr = encode_double_quoted_attribute(view.home.as_str()),
                home = encode_text(&messages.home),
            ),
        }
    }
}
