//! The asset registry seam.
//!
//! The host asset database is modeled as an injected, read-only trait rather
//! than ambient global state. The graph builder is the only consumer; a
//! failed lookup is recovered locally (empty dependency lists, `"Unknown"`
//! class) so one bad asset never aborts a traversal.

use std::collections::HashMap;

use thiserror::Error;

use crate::paths::PackageId;

/// Sentinel class name for assets whose type cannot be resolved.
pub const UNKNOWN_CLASS: &str = "Unknown";

/// A failed registry lookup.
///
/// Callers treat this as "no data": the builder logs it and substitutes
/// neutral defaults.
#[derive(Debug, Clone, Error)]
#[error("registry lookup failed for {package}: {message}")]
pub struct SourceError {
    /// The package the lookup was for.
    pub package: PackageId,
    /// What went wrong, in the source's own words.
    pub message: String,
}

impl SourceError {
    /// Create a lookup error for a package.
    pub fn new(package: PackageId, message: impl Into<String>) -> Self {
        Self {
            package,
            message: message.into(),
        }
    }
}

/// Direct outgoing dependencies of a package, split by reference kind.
///
/// Neither list contains duplicates within itself; a package may appear in
/// both when it is referenced both ways.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyLists {
    /// Load-time (hard) references.
    pub hard: Vec<PackageId>,
    /// Optional (soft) references.
    pub soft: Vec<PackageId>,
}

/// Read-only view of the host asset registry.
///
/// Implementations must return dependencies in a stable order per call;
/// graph construction is deterministic only to the extent the source is.
pub trait DependencySource {
    /// Direct hard and soft dependencies of `package`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the underlying registry cannot answer;
    /// callers recover with empty lists.
    fn dependencies(&self, package: &PackageId) -> Result<DependencyLists, SourceError>;

    /// Resolved asset class name of `package`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the underlying registry cannot answer;
    /// callers recover with [`UNKNOWN_CLASS`].
    fn asset_class(&self, package: &PackageId) -> Result<String, SourceError>;
}

/// One asset's registry record in an [`InMemorySource`].
#[derive(Debug, Clone, Default)]
pub struct AssetRecord {
    /// Resolved asset class name.
    pub class: String,
    /// Direct hard dependencies.
    pub hard: Vec<PackageId>,
    /// Direct soft dependencies.
    pub soft: Vec<PackageId>,
}

/// Map-backed [`DependencySource`].
///
/// Used by tests and by snapshot files standing in for a live registry.
/// Unknown packages behave like the host registry: no dependencies, unknown
/// class, no error.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    assets: HashMap<PackageId, AssetRecord>,
}

impl InMemorySource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset with its class and dependency lists.
    pub fn insert(
        &mut self,
        package: impl Into<PackageId>,
        class: impl Into<String>,
        hard: Vec<PackageId>,
        soft: Vec<PackageId>,
    ) {
        self.assets.insert(
            package.into(),
            AssetRecord {
                class: class.into(),
                hard,
                soft,
            },
        );
    }

    /// Builder-style [`insert`](Self::insert) for test fixtures.
    #[must_use]
    pub fn with_asset(
        mut self,
        package: impl Into<PackageId>,
        class: impl Into<String>,
        hard: &[&str],
        soft: &[&str],
    ) -> Self {
        self.insert(
            package,
            class,
            hard.iter().map(|p| PackageId::new(*p)).collect(),
            soft.iter().map(|p| PackageId::new(*p)).collect(),
        );
        self
    }

    /// Number of registered assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether no assets are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl DependencySource for InMemorySource {
    fn dependencies(&self, package: &PackageId) -> Result<DependencyLists, SourceError> {
        Ok(self
            .assets
            .get(package)
            .map(|record| DependencyLists {
                hard: record.hard.clone(),
                soft: record.soft.clone(),
            })
            .unwrap_or_default())
    }

    fn asset_class(&self, package: &PackageId) -> Result<String, SourceError> {
        Ok(self
            .assets
            .get(package)
            .map_or_else(|| UNKNOWN_CLASS.to_string(), |record| record.class.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_package_yields_empty_lists_and_unknown_class() {
        let source = InMemorySource::new();
        let pkg = PackageId::new("/Game/Missing");

        let lists = source.dependencies(&pkg).expect("lookup should not fail");
        assert!(lists.hard.is_empty());
        assert!(lists.soft.is_empty());
        assert_eq!(
            source.asset_class(&pkg).expect("lookup should not fail"),
            UNKNOWN_CLASS
        );
    }

    #[test]
    fn registered_asset_round_trips() {
        let source = InMemorySource::new().with_asset(
            "/Game/Foo",
            "Blueprint",
            &["/Game/Bar"],
            &["/Game/Baz"],
        );
        let pkg = PackageId::new("/Game/Foo");

        let lists = source.dependencies(&pkg).expect("lookup should not fail");
        assert_eq!(lists.hard, vec![PackageId::new("/Game/Bar")]);
        assert_eq!(lists.soft, vec![PackageId::new("/Game/Baz")]);
        assert_eq!(
            source.asset_class(&pkg).expect("lookup should not fail"),
            "Blueprint"
        );
    }
}
