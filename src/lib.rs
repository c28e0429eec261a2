//! Task Categorizer - category tasks for delimiter-named build tasks
//!
//! Task names like `build:js:min` imply the categories `build` and
//! `build:js`. The categorizer tracks which tasks belong to which category
//! as they are registered with a host task runner, and registers each
//! category as a task depending on its members once registration is done.

pub mod domain;
pub mod storage;
pub mod categorizer;
pub mod cli;

pub use categorizer::{Categorizer, LifecycleWarning, RecordingHost, RegisteredTask, TaskHost};
pub use domain::{CategoryError, CategoryRegistry, NameParser};
pub use storage::CategorizerConfig;
