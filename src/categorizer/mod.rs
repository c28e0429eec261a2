//! # Categorizer
//!
//! Wraps a host task runner's registration primitive and turns delimited
//! task names into category tasks.
//!
//! ## Lifecycle
//!
//! 1. Create one [`Categorizer`] per build-script run around a [`TaskHost`].
//! 2. Call [`Categorizer::register`] for every task. Each name is linked into
//!    its category chain; a task named like a pending category absorbs the
//!    category's members as extra dependencies.
//! 3. Call [`Categorizer::finalize`] once, after the last registration, to
//!    register every remaining category as a task.
//!
//! Misuse of this order is reported as a [`LifecycleWarning`] through
//! `tracing` rather than failing. Dropping a categorizer that still holds
//! pending categories warns with the full list.
//!
//! ## Example
//!
//! ```
//! use task_categorizer::{Categorizer, RecordingHost};
//!
//! let mut host = RecordingHost::<String>::new();
//! let mut cat = Categorizer::new(&mut host);
//! cat.register("js:lint", vec![], None).unwrap();
//! cat.register("js:min", vec![], None).unwrap();
//! cat.finalize();
//! drop(cat);
//!
//! assert_eq!(host.get("js").unwrap().dependencies, vec!["js:lint", "js:min"]);
//! ```

mod finalizer;
mod host;
mod lifecycle;
mod registrar;

pub use host::{RecordingHost, RegisteredTask, TaskHost};
pub use lifecycle::LifecycleWarning;

use tracing::{debug, warn};

use crate::domain::{CategoryError, CategoryRegistry, NameParser};
use crate::storage::{CategorizerConfig, ConfigError};

/// Category-aware front end for a [`TaskHost`]
pub struct Categorizer<H: TaskHost> {
    host: H,
    parser: NameParser,
    registry: CategoryRegistry,
    debug: bool,
    finalized: bool,
    closed: bool,
    warnings: Vec<LifecycleWarning>,
}

impl<H: TaskHost> Categorizer<H> {
    /// Creates a categorizer with the default `:` separator
    pub fn new(host: H) -> Self {
        Self::with_parser(host, NameParser::default(), false)
    }

    /// Creates a categorizer from configuration
    pub fn with_config(host: H, config: &CategorizerConfig) -> Result<Self, ConfigError> {
        let parser = config.parser()?;
        Ok(Self::with_parser(host, parser, config.debug))
    }

    fn with_parser(host: H, parser: NameParser, debug: bool) -> Self {
        Self {
            host,
            parser,
            registry: CategoryRegistry::new(),
            debug,
            finalized: false,
            closed: false,
            warnings: Vec::new(),
        }
    }

    /// Returns the category that directly contains `name`
    pub fn parent_category<'a>(&self, name: &'a str) -> Option<&'a str> {
        self.parser.parent_category(name)
    }

    /// Returns every category containing `name`, outermost first
    pub fn ancestor_categories(&self, name: &str) -> Vec<String> {
        self.parser.ancestor_categories(name)
    }

    /// Adds `member` to `category` if it isn't part of it yet
    ///
    /// Fails if a task named `category` has already been registered.
    pub fn add_member(&mut self, category: &str, member: &str) -> Result<bool, CategoryError> {
        let added = self.registry.add_member(category, member)?;
        if self.debug {
            if added {
                debug!(category, member, "added member to category");
            } else {
                debug!(category, member, "member already in category");
            }
        }
        Ok(added)
    }

    /// Returns pending category names in creation order
    pub fn pending_categories(&self) -> Vec<String> {
        self.registry.pending_categories()
    }

    /// Returns the pending categories and members
    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    /// Returns the name parser in use
    pub fn parser(&self) -> &NameParser {
        &self.parser
    }

    /// Returns the wrapped host
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns the wrapped host mutably
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Returns true once `finalize()` has run
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Returns lifecycle warnings reported so far
    pub fn warnings(&self) -> &[LifecycleWarning] {
        &self.warnings
    }

    /// Returns the warning for categories that were never materialized, if any
    pub fn unfinalized(&self) -> Option<LifecycleWarning> {
        if self.registry.is_empty() {
            return None;
        }

        let pending = self
            .registry
            .pending_categories()
            .into_iter()
            .map(|category| {
                let members = self
                    .registry
                    .members(&category)
                    .map(<[String]>::to_vec)
                    .unwrap_or_default();
                (category, members)
            })
            .collect();

        Some(LifecycleWarning::Unmaterialized { pending })
    }

    /// Ends the categorizer's lifecycle and returns every warning it reported
    ///
    /// Reports unmaterialized categories here instead of on drop.
    pub fn close(mut self) -> Vec<LifecycleWarning> {
        if let Some(warning) = self.unfinalized() {
            self.report(warning);
        }
        self.closed = true;
        std::mem::take(&mut self.warnings)
    }

    fn report(&mut self, warning: LifecycleWarning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }
}

impl<H: TaskHost> Drop for Categorizer<H> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Some(warning) = self.unfinalized() {
            warn!("{}", warning);
        }
    }
}
