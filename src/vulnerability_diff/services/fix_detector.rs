use crate::vulnerability_diff::domain::{Package, PackageChange, PackageChanges, VulnerabilityMap};
use std::collections::HashMap;

/// FixDetector service for comparing two releases
///
/// This service contains the pure comparison rules; it performs no I/O and
/// knows nothing about how the vulnerability maps were produced.
pub struct FixDetector;

impl FixDetector {
    /// Returns the identifiers present in `previous` but absent from `next`
    ///
    /// Only identifier presence matters: an identifier still reported in
    /// `next` is not fixed, even if it now affects entirely different packages.
    pub fn fixed_identifiers(previous: &VulnerabilityMap, next: &VulnerabilityMap) -> Vec<String> {
        previous
            .identifiers()
            .filter(|identifier| !next.contains(identifier))
            .map(str::to_string)
            .collect()
    }

    /// Builds a name to version lookup from an SBOM package list
    ///
    /// When a name is listed more than once the last entry wins.
    pub fn version_index(packages: &[Package]) -> HashMap<&str, &str> {
        packages
            .iter()
            .map(|package| (package.name(), package.version()))
            .collect()
    }

    /// Describes, for every fixed identifier, what became of each package the
    /// previous release reported against it
    ///
    /// A package whose name is missing from `next_versions` is marked removed;
    /// otherwise it is reported with the version found there.
    pub fn package_changes(
        fixed: &[String],
        previous: &VulnerabilityMap,
        next_versions: &HashMap<&str, &str>,
    ) -> PackageChanges {
        let mut changes = PackageChanges::new();

        for identifier in fixed {
            let Some(packages) = previous.packages(identifier) else {
                continue;
            };

            let records = packages
                .iter()
                .map(|package| match next_versions.get(package.name()) {
                    Some(new_version) => PackageChange::retained(package, *new_version),
                    None => PackageChange::removed(package),
                })
                .collect();

            changes.insert(identifier.clone(), records);
        }

        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str, &str)]) -> VulnerabilityMap {
        entries
            .iter()
            .map(|(id, name, version)| (*id, Package::new(*name, *version)))
            .collect()
    }

    #[test]
    fn test_fixed_identifiers_presence_only() {
        let previous = map(&[
            ("CVE-1234", "pkgA", "1.0"),
            ("CVE-1234", "pkgC", "3.0"),
            ("CVE-5678", "pkgB", "2.0"),
        ]);
        let next = map(&[("CVE-5678", "pkgB", "2.1")]);

        assert_eq!(FixDetector::fixed_identifiers(&previous, &next), vec!["CVE-1234"]);
    }

    #[test]
    fn test_fixed_identifiers_different_packages_not_fixed() {
        let previous = map(&[("CVE-2023-9999", "pkg3", "3.0")]);
        let next = map(&[("CVE-2023-9999", "other", "9.9")]);

        assert!(FixDetector::fixed_identifiers(&previous, &next).is_empty());
    }

    #[test]
    fn test_fixed_identifiers_empty_next() {
        let previous = map(&[("CVE-1", "a", "1"), ("CVE-2", "b", "1")]);
        let next = VulnerabilityMap::new();

        assert_eq!(
            FixDetector::fixed_identifiers(&previous, &next),
            vec!["CVE-1", "CVE-2"]
        );
    }

    #[test]
    fn test_fixed_identifiers_new_vulnerabilities_ignored() {
        let previous = VulnerabilityMap::new();
        let next = map(&[("CVE-NEW", "a", "1")]);

        assert!(FixDetector::fixed_identifiers(&previous, &next).is_empty());
    }

    #[test]
    fn test_version_index_last_wins() {
        let packages = vec![Package::new("pkgA", "1.0"), Package::new("pkgA", "1.1")];
        let index = FixDetector::version_index(&packages);
        assert_eq!(index.get("pkgA"), Some(&"1.1"));
    }

    #[test]
    fn test_package_changes() {
        let previous = map(&[
            ("CVE-1234", "pkgA", "1.0.0"),
            ("CVE-1234", "pkgC", "3.0.0"),
        ]);
        let next_packages = vec![Package::new("pkgA", "1.1.0")];
        let index = FixDetector::version_index(&next_packages);

        let changes =
            FixDetector::package_changes(&["CVE-1234".to_string()], &previous, &index);
        let records = &changes["CVE-1234"];

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].package_name(), "pkgA");
        assert_eq!(records[0].previous_version(), "1.0.0");
        assert_eq!(records[0].new_version(), "1.1.0");
        assert!(!records[0].is_removed());
        assert_eq!(records[1].package_name(), "pkgC");
        assert_eq!(records[1].previous_version(), "3.0.0");
        assert_eq!(records[1].new_version(), "");
        assert!(records[1].is_removed());
    }

    #[test]
    fn test_package_changes_unchanged_version_is_not_removed() {
        let previous = map(&[("CVE-1", "package2", "2.0.0")]);
        let next_packages = vec![Package::new("package2", "2.0.0")];
        let index = FixDetector::version_index(&next_packages);

        let changes = FixDetector::package_changes(&["CVE-1".to_string()], &previous, &index);

        assert_eq!(changes["CVE-1"][0].new_version(), "2.0.0");
        assert!(!changes["CVE-1"][0].is_removed());
    }

    #[test]
    fn test_package_changes_unknown_identifier_skipped() {
        let previous = VulnerabilityMap::new();
        let changes =
            FixDetector::package_changes(&["CVE-1".to_string()], &previous, &HashMap::new());
        assert!(changes.is_empty());
    }
}
