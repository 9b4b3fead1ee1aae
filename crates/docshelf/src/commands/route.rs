//! `docshelf route` command implementation.

use std::path::PathBuf;

use clap::Args;
use docshelf_config::Config;
use docshelf_viewer::PathNormalizer;

use crate::error::CliError;
use crate::output::{Output, Tone};

/// Arguments for the route command.
#[derive(Args)]
pub(crate) struct RouteArgs {
    /// Location fragments, e.g. `#/guide` or `api/`.
    #[arg(required = true)]
    fragments: Vec<String>,

    /// Path to configuration file (default: auto-discover docshelf.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl RouteArgs {
    /// Execute the route command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let normalizer = PathNormalizer::from_config(&config.router);

        for fragment in &self.fragments {
            let path = normalizer.normalize(fragment);
            output.line(
                Tone::Plain,
                format_args!(
                    "{fragment} -> {path} ({}/{path})",
                    config.router.content_dir()
                ),
            );
        }
        Ok(())
    }
}
