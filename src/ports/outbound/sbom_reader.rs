use crate::shared::Result;
use crate::vulnerability_diff::domain::Package;
use std::path::Path;

/// SbomReader port for reading the package list of an SBOM document
///
/// Used to enrich fixed vulnerabilities with the next release's versions
/// without going through a scanner.
pub trait SbomReader {
    /// Reads every package listed in the SBOM at `path`, in document order
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a supported SBOM
    fn read_packages(&self, path: &Path) -> Result<Vec<Package>>;
}
