//! Domain models for task categories
//!
//! Contains the naming rules and category bookkeeping without any I/O concerns.

mod name;
mod registry;
mod graph;

pub use name::{NameParser, DEFAULT_SEPARATOR};
pub use registry::{CategoryError, CategoryRegistry};
pub use graph::{CategoryGraph, GraphError};
