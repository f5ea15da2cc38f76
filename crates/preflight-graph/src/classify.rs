//! Dependency edge classification.
//!
//! Every discovered edge gets a human-readable reason and a set of semantic
//! flags derived from the packages involved, the reference kind, and the BFS
//! depth at which the edge was found. Classification is a pure function: it
//! never consults the asset registry and never fails.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::paths::PackageId;

/// Path substrings that mark a package as editor/development-only content.
pub const EDITOR_ONLY_MARKERS: [&str; 4] = ["/Editor/", "/Developers/", "/Test/", "/Debug/"];

/// Prefix of the project's primary runtime content root.
///
/// References from content under this root to editor-only content are the
/// ones that can break a shipping build.
pub const RUNTIME_CONTENT_ROOT: &str = "/Game/";

/// Whether a reference is required at load time or optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepKind {
    /// Required at load time.
    Hard,
    /// Optional/lazy; not required at load time.
    Soft,
}

impl fmt::Display for DepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hard => write!(f, "Hard"),
            Self::Soft => write!(f, "Soft"),
        }
    }
}

/// Semantic flag attached to a node or edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    /// The target package looks like editor/development-only content.
    EditorOnly,
    /// Editor-only content reached from under the runtime content root.
    Suspicious,
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EditorOnly => write!(f, "editor_only"),
            Self::Suspicious => write!(f, "suspicious"),
        }
    }
}

/// Result of classifying a single dependency edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Human-readable explanation for the edge. Never empty.
    pub reason: String,
    /// Semantic flags, possibly empty.
    pub flags: Vec<Flag>,
}

/// Check a package path against the editor-only markers.
#[must_use]
pub fn is_editor_only_suspected(path: &str) -> bool {
    EDITOR_ONLY_MARKERS.iter().any(|m| path.contains(m))
}

/// Classify the edge `from -> to` discovered at `depth_of_to`.
///
/// The base reason follows the reference kind. An editor-only target
/// overrides the reason and adds [`Flag::EditorOnly`]; if the root also lives
/// under [`RUNTIME_CONTENT_ROOT`], [`Flag::Suspicious`] is added on top.
/// Edges deeper than the first level get a `" (Transitive)"` suffix.
///
/// The source package does not currently influence classification; it is part
/// of the signature so policies keying on the referencing side can be added
/// without changing every call site.
#[must_use]
pub fn classify(
    root: &PackageId,
    _from: &PackageId,
    to: &PackageId,
    kind: DepKind,
    depth_of_to: u32,
) -> Classification {
    let mut flags = Vec::new();

    let mut reason = match kind {
        DepKind::Soft => "Soft Reference (optional)".to_string(),
        DepKind::Hard => "Hard Runtime Reference".to_string(),
    };

    if is_editor_only_suspected(to.as_str()) {
        reason = "Editor-only Suspected".to_string();
        flags.push(Flag::EditorOnly);

        if root.as_str().starts_with(RUNTIME_CONTENT_ROOT) {
            flags.push(Flag::Suspicious);
        }
    }

    if depth_of_to > 1 {
        reason.push_str(" (Transitive)");
    }

    Classification { reason, flags }
}
