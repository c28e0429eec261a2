//! Ordering mistakes that are reported instead of failing the build

use serde::Serialize;
use std::fmt;

/// A non-fatal misuse of the register/finalize lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LifecycleWarning {
    /// `finalize()` ran more than once
    FinalizedTwice,

    /// A task was registered after `finalize()` already ran
    RegisteredAfterFinalize { name: String },

    /// Categories were still pending when the categorizer was closed
    Unmaterialized { pending: Vec<(String, Vec<String>)> },
}

impl fmt::Display for LifecycleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleWarning::FinalizedTwice => {
                write!(f, "finalize() was called more than once")
            }
            LifecycleWarning::RegisteredAfterFinalize { name } => write!(
                f,
                "task '{}' was registered after finalize(); its categories stay pending until the next finalize()",
                name
            ),
            LifecycleWarning::Unmaterialized { pending } => {
                write!(f, "categories were never finalized into tasks:")?;
                for (category, members) in pending {
                    write!(f, "\n  {} -> [{}]", category, members.join(", "))?;
                }
                Ok(())
            }
        }
    }
}
