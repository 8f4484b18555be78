use serde::{Deserialize, Serialize};

/// Subset of Trivy's JSON report that the diff needs
///
/// Every field is optional: Trivy omits or nulls sections that have nothing
/// to report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrivyReport {
    #[serde(rename = "Results", default)]
    pub results: Option<Vec<TrivyResult>>,
}

/// One scanned target (OS packages, a language lockfile, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrivyResult {
    #[serde(rename = "Target", default)]
    pub target: Option<String>,
    #[serde(rename = "Class", default)]
    pub class: Option<String>,
    #[serde(rename = "Vulnerabilities", default)]
    pub vulnerabilities: Option<Vec<TrivyVulnerability>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrivyVulnerability {
    #[serde(rename = "VulnerabilityID", default)]
    pub vulnerability_id: Option<String>,
    #[serde(rename = "PkgName", default)]
    pub pkg_name: Option<String>,
    #[serde(rename = "InstalledVersion", default)]
    pub installed_version: Option<String>,
}

impl TrivyReport {
    /// Iterates over every vulnerability entry of every result section
    pub fn vulnerabilities(&self) -> impl Iterator<Item = &TrivyVulnerability> {
        self.results
            .iter()
            .flatten()
            .filter_map(|result| result.vulnerabilities.as_ref())
            .flatten()
    }
}
