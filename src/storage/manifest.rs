//! Task manifests
//!
//! A manifest lists the tasks a build script would register, in order:
//!
//! ```toml
//! [settings]
//! category_separator = ":"
//!
//! [[task]]
//! name = "build:js"
//! deps = ["lint"]
//! run = "esbuild src/index.js"
//! ```
//!
//! `run` is kept as an opaque body and never executed.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::CategorizerConfig;
use crate::categorizer::{Categorizer, TaskHost};
use crate::domain::CategoryError;

#[derive(Debug, Error, PartialEq)]
pub enum ManifestError {
    #[error("Failed to parse manifest: {0}")]
    Parse(String),

    #[error("Task #{0} in manifest has an empty name")]
    EmptyName(usize),
}

/// One `[[task]]` entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskEntry {
    pub name: String,

    /// Omitted means the task only has a body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deps: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run: Option<String>,
}

/// A parsed task manifest
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TaskManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<CategorizerConfig>,

    #[serde(default, rename = "task")]
    pub tasks: Vec<TaskEntry>,
}

impl TaskManifest {
    /// Parses a manifest from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ManifestError> {
        let manifest: Self =
            toml::from_str(content).map_err(|e| ManifestError::Parse(e.to_string()))?;

        if let Some(idx) = manifest.tasks.iter().position(|t| t.name.is_empty()) {
            return Err(ManifestError::EmptyName(idx + 1));
        }

        Ok(manifest)
    }

    /// Reads and parses a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Invalid manifest: {}", path.display()))
    }

    /// Returns the manifest's settings, or `taskcat.toml` next to it
    pub fn config(&self, manifest_path: &Path) -> Result<CategorizerConfig> {
        if let Some(settings) = &self.settings {
            settings.validate().context("Invalid [settings] in manifest")?;
            return Ok(settings.clone());
        }

        match manifest_path.parent() {
            Some(dir) => CategorizerConfig::load_from_dir(dir),
            None => Ok(CategorizerConfig::default()),
        }
    }

    /// Registers every task with the categorizer, in manifest order
    pub fn register_all<H>(&self, categorizer: &mut Categorizer<H>) -> Result<Vec<H::Handle>, CategoryError>
    where
        H: TaskHost<Body = String>,
    {
        self.tasks
            .iter()
            .map(|task| match (&task.deps, &task.run) {
                (None, Some(run)) => categorizer.register_body(&task.name, run.clone()),
                (deps, run) => categorizer.register(
                    &task.name,
                    deps.clone().unwrap_or_default(),
                    run.clone(),
                ),
            })
            .collect()
    }
}
