//! # Storage Layer
//!
//! File formats read by the `taskcat` binary.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Tasks | TOML `[[task]]` array | any path given on the command line |
//! | Config | TOML | `[settings]` in the manifest, or `taskcat.toml` beside it |
//!
//! Nothing is written back; every run starts from the manifest.

mod config;
mod manifest;

pub use config::{CategorizerConfig, ConfigError, CONFIG_FILE_NAME};
pub use manifest::{ManifestError, TaskEntry, TaskManifest};
