//! Configuration embedded in the page.

use docshelf_config::Config;

/// Parse the text of the configuration `<script>` element.
///
/// A missing element gives the defaults. Text that fails to parse or
/// validate is logged and also gives the defaults, so a broken config never
/// leaves the page without navigation.
pub(crate) fn load_config(text: Option<&str>) -> Config {
    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        return Config::default();
    };
    match Config::from_toml_str(text) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring invalid page configuration");
            Config::default()
        }
    }
}
