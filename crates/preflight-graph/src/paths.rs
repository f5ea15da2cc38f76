//! Canonical identifiers for packages and asset objects.
//!
//! Asset paths arrive in several loosely-formatted shapes: plain package
//! paths (`/Game/Foo/Bar`), object paths (`/Game/Foo/Bar.Bar`), and editor
//! "export text" references (`Blueprint'/Game/Foo/Bar.Bar'`). This module
//! normalizes all of them into two canonical forms:
//!
//! - [`ObjectPath`]: `package.leaf`, naming one object inside a package
//! - [`PackageId`]: the package portion alone
//!
//! Normalization is pure and idempotent; an already-canonical input is
//! returned unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical `package.leaf` path identifying an asset object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectPath(String);

impl ObjectPath {
    /// Normalize a raw asset path into a canonical object path.
    ///
    /// Steps:
    /// 1. Trim surrounding whitespace.
    /// 2. If the string carries an export-text quote (`Class'/Pkg/Name.Name'`),
    ///    extract the quoted substring.
    /// 3. If no `.` object separator remains, append `.` plus the final `/`
    ///    segment so the package's default object is named.
    ///
    /// Empty input passes through unchanged.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        let mut s = raw.trim();
        if s.is_empty() {
            return Self(String::new());
        }

        if s.ends_with('\'') {
            if let Some(open) = s.find('\'') {
                let close = s.rfind('\'').unwrap_or(open);
                if close > open {
                    s = &s[open + 1..close];
                }
            }
        }

        if s.contains('.') {
            Self(s.to_string())
        } else {
            let leaf = s.rsplit('/').next().unwrap_or(s);
            Self(format!("{s}.{leaf}"))
        }
    }

    /// The package this object lives in.
    #[must_use]
    pub fn package(&self) -> PackageId {
        let package = self.0.split_once('.').map_or(self.0.as_str(), |(p, _)| p);
        PackageId::new(package)
    }

    /// The canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical name of a content package.
///
/// Two packages are equal iff their canonical strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(String);

impl PackageId {
    /// Wrap an already-canonical package name.
    ///
    /// Dependency lists returned by an asset registry are package names
    /// already; they are wrapped without re-normalization.
    pub fn new(package: impl Into<String>) -> Self {
        Self(package.into())
    }

    /// Normalize a raw asset path down to its package.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        ObjectPath::from_raw(raw).package()
    }

    /// The canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PackageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PackageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/Game/Foo/Bar", "/Game/Foo/Bar.Bar")]
    #[case("/Game/Foo/Bar.Bar", "/Game/Foo/Bar.Bar")]
    #[case("  /Game/Foo/Bar  ", "/Game/Foo/Bar.Bar")]
    #[case("Blueprint'/Game/Foo/Bar.Bar'", "/Game/Foo/Bar.Bar")]
    #[case("Material'/Game/Mats/M_Rock'", "/Game/Mats/M_Rock.M_Rock")]
    #[case("/Game/Foo/Bar.Bar_C", "/Game/Foo/Bar.Bar_C")]
    fn object_path_normalization(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(
            ObjectPath::from_raw(raw).as_str(),
            expected,
            "normalizing {raw:?}"
        );
    }

    #[test]
    fn object_path_is_idempotent() {
        let once = ObjectPath::from_raw("SkeletalMesh'/Game/Chars/Hero.Hero'");
        let twice = ObjectPath::from_raw(once.as_str());
        assert_eq!(once, twice, "second normalization must be a no-op");
    }

    #[test]
    fn object_path_empty_input_passes_through() {
        assert_eq!(ObjectPath::from_raw("").as_str(), "");
        assert_eq!(ObjectPath::from_raw("   ").as_str(), "");
    }

    #[rstest]
    #[case("/Game/Foo/Bar.Bar", "/Game/Foo/Bar")]
    #[case("/Game/Foo/Bar", "/Game/Foo/Bar")]
    #[case("WidgetBlueprint'/Game/UI/WBP_Menu.WBP_Menu'", "/Game/UI/WBP_Menu")]
    fn package_id_strips_object_suffix(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(PackageId::from_raw(raw).as_str(), expected);
    }

    #[test]
    fn package_equality_is_string_equality() {
        assert_eq!(
            PackageId::from_raw("/Game/Foo/Bar.Bar"),
            PackageId::new("/Game/Foo/Bar")
        );
        assert_ne!(PackageId::new("/Game/A"), PackageId::new("/Game/a"));
    }
}
