//! Registry snapshot loading.
//!
//! The CLI does not talk to a live asset registry; it consumes a JSON
//! snapshot exported from the host project:
//!
//! ```json
//! {
//!   "/Game/Foo/Foo": { "class": "Blueprint", "hard": ["/Game/Bar/Bar"], "soft": [] },
//!   "/Game/Bar/Bar": { "class": "StaticMesh", "soft": ["/Editor/Dev/Baz"] }
//! }
//! ```
//!
//! `class`, `hard` and `soft` are all optional per entry. A `BTreeMap` keeps
//! entry iteration stable, so analysis over a snapshot is deterministic.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use preflight_graph::{InMemorySource, PackageId, UNKNOWN_CLASS};
use serde::Deserialize;
use tracing::{debug, warn};

/// One asset entry in a snapshot file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotAsset {
    /// Resolved asset class; defaults to `"Unknown"`.
    #[serde(default)]
    pub class: Option<String>,
    /// Direct hard dependencies.
    #[serde(default)]
    pub hard: Vec<String>,
    /// Direct soft dependencies.
    #[serde(default)]
    pub soft: Vec<String>,
}

/// A parsed snapshot file: package path to asset entry.
pub type RegistrySnapshot = BTreeMap<String, SnapshotAsset>;

/// Load a snapshot file into an in-memory dependency source.
///
/// # Errors
///
/// Fails when the file cannot be read or is not valid snapshot JSON; both
/// are input errors reported at the CLI edge.
pub fn load_snapshot(path: &Path) -> anyhow::Result<InMemorySource> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read snapshot file {}", path.display()))?;
    let snapshot: RegistrySnapshot = serde_json::from_str(&text)
        .with_context(|| format!("snapshot file {} is not valid JSON", path.display()))?;

    let mut source = InMemorySource::new();
    for (package, asset) in &snapshot {
        source.insert(
            package.as_str(),
            asset.class.clone().unwrap_or_else(|| UNKNOWN_CLASS.to_string()),
            asset.hard.iter().map(|p| PackageId::new(p.clone())).collect(),
            asset.soft.iter().map(|p| PackageId::new(p.clone())).collect(),
        );
    }

    if source.is_empty() {
        warn!(path = %path.display(), "snapshot contains no assets; every package will be an unknown leaf");
    }
    debug!(path = %path.display(), assets = source.len(), "registry snapshot loaded");
    Ok(source)
}
