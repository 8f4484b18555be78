use crate::ports::outbound::DiffFormatter;
use crate::shared::Result;
use crate::vulnerability_diff::domain::PackageChanges;

/// JsonFormatter adapter for machine-readable diff output
///
/// Fixed identifiers render as a JSON array; per-package changes render as
/// `{id: [{package: {previous_version, new_version, removed}}]}`.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffFormatter for JsonFormatter {
    fn format_fixed(&self, identifiers: &[String]) -> Result<String> {
        serde_json::to_string_pretty(identifiers).map_err(Into::into)
    }

    fn format_changes(&self, changes: &PackageChanges) -> Result<String> {
        serde_json::to_string_pretty(changes).map_err(Into::into)
    }
}
