use crate::ports::outbound::SbomReader;
use crate::shared::error::DiffusedError;
use crate::shared::security::{validate_input_file, MAX_SBOM_SIZE};
use crate::shared::Result;
use crate::vulnerability_diff::domain::Package;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Package list of an SPDX JSON document; everything else is ignored
#[derive(Debug, Deserialize)]
struct SpdxDocument {
    #[serde(default)]
    packages: Vec<SpdxPackage>,
}

#[derive(Debug, Deserialize)]
struct SpdxPackage {
    name: String,
    #[serde(rename = "versionInfo", default)]
    version_info: Option<String>,
}

/// FileSystemReader adapter for reading SBOM documents from the file system
///
/// This adapter implements the SbomReader port for SPDX JSON files.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    /// Reads a file after rejecting non-regular and oversized targets
    fn safe_read_file(&self, path: &Path) -> Result<String> {
        validate_input_file(path, "SBOM", MAX_SBOM_SIZE)?;

        fs::read_to_string(path).map_err(|e| anyhow::anyhow!("Failed to read SBOM: {}", e))
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomReader for FileSystemReader {
    fn read_packages(&self, path: &Path) -> Result<Vec<Package>> {
        let content = self.safe_read_file(path).map_err(|e| DiffusedError::SbomReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        let document: SpdxDocument =
            serde_json::from_str(&content).map_err(|e| DiffusedError::SbomParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;

        tracing::debug!(
            sbom = %path.display(),
            packages = document.packages.len(),
            "loaded SBOM"
        );

        Ok(document
            .packages
            .into_iter()
            .map(|pkg| Package::new(pkg.name, pkg.version_info.unwrap_or_default()))
            .collect())
    }
}
