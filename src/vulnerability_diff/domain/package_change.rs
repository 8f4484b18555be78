use super::Package;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// What happened to one previously affected package in the next release
///
/// `removed` only states whether a package of that name is still listed in
/// the next SBOM; it says nothing about whether its version changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageChange {
    package_name: String,
    previous_version: String,
    new_version: String,
    removed: bool,
}

impl PackageChange {
    /// The package is still present in the next release at `new_version`
    pub fn retained(previous: &Package, new_version: impl Into<String>) -> Self {
        Self {
            package_name: previous.name().to_string(),
            previous_version: previous.version().to_string(),
            new_version: new_version.into(),
            removed: false,
        }
    }

    /// The package no longer appears in the next release
    pub fn removed(previous: &Package) -> Self {
        Self {
            package_name: previous.name().to_string(),
            previous_version: previous.version().to_string(),
            new_version: String::new(),
            removed: true,
        }
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn previous_version(&self) -> &str {
        &self.previous_version
    }

    pub fn new_version(&self) -> &str {
        &self.new_version
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }
}

struct ChangeDetails<'a>(&'a PackageChange);

impl Serialize for ChangeDetails<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut details = serializer.serialize_struct("ChangeDetails", 3)?;
        details.serialize_field("previous_version", &self.0.previous_version)?;
        details.serialize_field("new_version", &self.0.new_version)?;
        details.serialize_field("removed", &self.0.removed)?;
        details.end()
    }
}

/// Serialized as `{"<package>": {"previous_version", "new_version", "removed"}}`
impl Serialize for PackageChange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.package_name, &ChangeDetails(self))?;
        map.end()
    }
}

/// Per-identifier package changes for every fixed vulnerability
pub type PackageChanges = BTreeMap<String, Vec<PackageChange>>;
