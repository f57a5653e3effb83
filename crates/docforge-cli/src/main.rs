//! # docforge CLI entry point
//!
//! Parses command-line arguments, installs logging and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use docforge_cli::inspect::{run_inspect, InspectArgs};
use docforge_cli::schema::run_schema;
use docforge_cli::validate::{run_validate, ValidateArgs};
use docforge_cli::{load_policy, EXIT_LOAD_FAILURE};

/// Content gate for multi-language documentation corpora.
///
/// Validates authored content before it reaches the rendering application:
/// unique ids, resolving references, quiz answer bounds, highlight bounds
/// and cross-language concept links.
#[derive(Parser, Debug)]
#[command(name = "docforge", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a validation policy file (YAML or JSON).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate content and print every diagnostic.
    Validate(ValidateArgs),

    /// Freeze content and print per-language counts and digests.
    Inspect(InspectArgs),

    /// Print the bundled language-config JSON Schema.
    Schema,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "docforge starting");

    let result = match cli.command {
        Commands::Validate(args) => {
            load_policy(cli.config.as_deref()).and_then(|policy| run_validate(&args, &policy))
        }
        Commands::Inspect(args) => run_inspect(&args),
        Commands::Schema => run_schema(),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_LOAD_FAILURE)
        }
    }
}
