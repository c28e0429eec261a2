//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::logging::Logging;
use super::output::{Output, OutputFormat};
use super::{names, resolve};

#[derive(Parser)]
#[command(name = "taskcat")]
#[command(author, version, about = "Category tasks for delimiter-named build tasks")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output and category tracing
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Category separator (overrides manifest settings)
    #[arg(long, short = 's', global = true, env = "TASKCAT_SEPARATOR")]
    pub separator: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a manifest's tasks, finalize categories, and list the result
    Resolve {
        /// Path to the task manifest
        manifest: PathBuf,
    },

    /// Show the resolved tasks as a dependency tree
    Tree {
        /// Path to the task manifest
        manifest: PathBuf,
    },

    /// Show the categories a task name belongs to
    Parse {
        /// Task name
        name: String,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let logging = Logging::init(cli.verbose);
    let output = Output::new(cli.format, cli.verbose);

    let separator = cli.separator.as_deref();
    match cli.command {
        Commands::Resolve { manifest } => {
            output.verbose_ctx("resolve", &format!("Reading manifest: {}", manifest.display()));
            resolve::list(&output, &logging, &manifest, separator)?
        }
        Commands::Tree { manifest } => {
            output.verbose_ctx("tree", &format!("Reading manifest: {}", manifest.display()));
            resolve::tree(&output, &logging, &manifest, separator)?
        }
        Commands::Parse { name } => names::parse(&output, &name, separator)?,
    }

    Ok(())
}
