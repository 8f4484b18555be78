use crate::shared::Result;
use crate::vulnerability_diff::domain::PackageChanges;

/// DiffFormatter port for rendering diff results
pub trait DiffFormatter {
    /// Formats the list of fixed vulnerability identifiers
    fn format_fixed(&self, identifiers: &[String]) -> Result<String>;

    /// Formats fixed vulnerabilities together with their per-package changes
    fn format_changes(&self, changes: &PackageChanges) -> Result<String>;
}
