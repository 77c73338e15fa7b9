//! dispose-lint CLI tool.
//!
//! Usage:
//! ```bash
//! dispose-lint check [OPTIONS] <MODEL>...
//! dispose-lint list-rules
//! dispose-lint init
//! ```
//!
//! Models are JSON exports of a compilation's symbols and method bodies.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Disposal-pattern linter for .NET compilation models
#[derive(Parser)]
#[command(name = "dispose-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "DISPOSE_LINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run lint checks on exported compilation models
    Check {
        /// Model files to analyze
        #[arg(required = true)]
        models: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated names or codes)
        #[arg(long)]
        rules: Option<String>,

        /// Exclude type patterns, e.g. `MyApp.Generated.*` (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Number of worker threads
        #[arg(short = 'j', long)]
        jobs: Option<usize>,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
    /// Rendered diagnostics.
    Rich,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            models,
            format,
            rules,
            exclude,
            jobs,
        } => {
            let source = config_resolver::resolve(Path::new("."), cli.config.as_deref());
            commands::check::run(&models, format, rules, exclude, jobs, &source)
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
