//! Error types for graph analysis.
//!
//! The core is deliberately hard to fail: bad registry lookups degrade to
//! neutral defaults, traversal bounds surface as a `truncated` flag, and the
//! only hard errors are bad input (nothing to analyze) and internal
//! consistency violations that callers defuse locally.

use thiserror::Error;

use crate::paths::PackageId;

/// Result type for graph analysis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by graph construction and path explanation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The root asset path was empty; traversal never starts.
    #[error("root asset path is empty")]
    EmptyRootPath,

    /// The first-parent chain contains a cycle.
    ///
    /// The builder writes each child's parent exactly once, so this can only
    /// happen on a graph whose internal state was corrupted. The bounded
    /// parent walk reports it instead of looping forever.
    #[error("parent chain for {0} contains a cycle; graph state is inconsistent")]
    ParentCycle(PackageId),
}
