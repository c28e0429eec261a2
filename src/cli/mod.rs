//! # Command-Line Interface
//!
//! The `taskcat` binary runs a task manifest through the categorizer and
//! reports the tasks a host runner would end up with.
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `resolve <manifest>` | List every task and category task, dependencies first |
//! | `tree <manifest>` | Show the same tasks as a dependency tree |
//! | `parse <name>` | Show the parent category and category chain of a name |
//!
//! ## Output Formats
//!
//! All commands support `--format`:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! `--verbose` (or `-v`) turns on category tracing and debug logging, as does
//! `debug = true` in the manifest settings.
//! `RUST_LOG` takes precedence when set.

mod app;
mod logging;
mod names;
mod output;
mod resolve;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
