//! Docshelf CLI - static documentation viewer.
//!
//! Runs the viewer core against a site on disk:
//! - `check`: load every sidebar entry and report pages that fail
//! - `search`: filter the sidebar the way the search box does
//! - `route`: show how location fragments normalize

mod commands;
mod error;
mod host;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, RouteArgs, SearchArgs};
use error::CliError;
use output::{Output, Tone};

/// Docshelf - static documentation viewer.
#[derive(Parser)]
#[command(name = "docshelf", version, about)]
struct Cli {
    /// Enable verbose output (log route handling and content loads).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load every page in the sidebar and report failures.
    Check(CheckArgs),
    /// Filter sidebar entries by a query.
    Search(SearchArgs),
    /// Print the content path for location fragments.
    Route(RouteArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli.command) {
        output.line(Tone::Bad, format_args!("Error: {err}"));
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Check(args) => {
            // The viewer core is single-threaded
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            rt.block_on(args.execute())
        }
        Commands::Search(args) => args.execute(),
        Commands::Route(args) => args.execute(),
    }
}
