//! CLI error types.

use docshelf_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Runtime setup failed.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// `check` found pages that do not load.
    #[error("{failed} of {total} pages failed to load")]
    PagesFailed { failed: usize, total: usize },
}
