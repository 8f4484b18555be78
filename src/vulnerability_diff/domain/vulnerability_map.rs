use super::Package;
use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};

/// Mapping from vulnerability identifier to the packages it affects
///
/// Keys only appear through [`VulnerabilityMap::insert`], so an identifier is
/// never stored with an empty package set. Iteration is ordered by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VulnerabilityMap {
    entries: BTreeMap<String, BTreeSet<Package>>,
}

impl VulnerabilityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `package` as affected by `identifier`, creating the entry if absent.
    ///
    /// Returns `false` when the package was already recorded for that identifier.
    pub fn insert(&mut self, identifier: impl Into<String>, package: Package) -> bool {
        self.entries
            .entry(identifier.into())
            .or_default()
            .insert(package)
    }

    pub fn packages(&self, identifier: &str) -> Option<&BTreeSet<Package>> {
        self.entries.get(identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, BTreeSet<Package>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<S: Into<String>> FromIterator<(S, Package)> for VulnerabilityMap {
    fn from_iter<I: IntoIterator<Item = (S, Package)>>(iter: I) -> Self {
        let mut map = VulnerabilityMap::new();
        for (identifier, package) in iter {
            map.insert(identifier, package);
        }
        map
    }
}

impl<'a> IntoIterator for &'a VulnerabilityMap {
    type Item = (&'a String, &'a BTreeSet<Package>);
    type IntoIter = btree_map::Iter<'a, String, BTreeSet<Package>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
