use crate::ports::outbound::Scanner;
use crate::shared::error::StageOutcome;
use crate::shared::ScannerResult;
use crate::vulnerability_diff::domain::VulnerabilityMap;
use std::fmt;
use std::path::Path;

/// Which side of the comparison a [`Release`] stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseRole {
    Previous,
    Next,
}

impl fmt::Display for ReleaseRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseRole::Previous => write!(f, "previous"),
            ReleaseRole::Next => write!(f, "next"),
        }
    }
}

/// Release - one side of a comparison, wrapping a scanner bound to its subject
///
/// Tracks how far the release got through the pipeline
/// (SBOM retrieved, scanned, processed) so the diff engine only runs the
/// stages that are still missing.
pub struct Release<S> {
    role: ReleaseRole,
    scanner: S,
}

impl<S: Scanner> Release<S> {
    pub fn new(role: ReleaseRole, scanner: S) -> Self {
        Self { role, scanner }
    }

    pub fn role(&self) -> ReleaseRole {
        self.role
    }

    pub fn scanner(&self) -> &S {
        &self.scanner
    }

    pub fn scanner_mut(&mut self) -> &mut S {
        &mut self.scanner
    }

    pub fn sbom(&self) -> Option<&Path> {
        self.scanner.state().sbom()
    }

    pub fn image(&self) -> Option<&str> {
        self.scanner.state().image()
    }

    pub fn raw_result(&self) -> Option<&S::Report> {
        self.scanner.state().raw_result.as_ref()
    }

    pub fn processed_result(&self) -> &VulnerabilityMap {
        &self.scanner.state().processed_result
    }

    /// Most recent operational diagnostic, empty when none was recorded
    pub fn error(&self) -> &str {
        &self.scanner.state().error
    }

    /// True when an SBOM still has to be produced from the image
    pub fn needs_sbom(&self) -> bool {
        self.sbom().is_none() && self.image().is_some()
    }

    /// True when an SBOM is available but has not been scanned yet
    pub fn needs_scan(&self) -> bool {
        self.raw_result().is_none() && self.sbom().is_some()
    }

    /// True when a scan report exists but has not been normalized yet
    pub fn needs_processing(&self) -> bool {
        self.processed_result().is_empty() && self.raw_result().is_some()
    }

    pub async fn retrieve_sbom(&mut self, output_path: &Path) -> ScannerResult<StageOutcome> {
        tracing::debug!(release = %self.role, output = %output_path.display(), "retrieving SBOM");
        self.scanner.retrieve_sbom(output_path).await
    }

    pub async fn scan_sbom(&mut self) -> ScannerResult<StageOutcome> {
        tracing::debug!(release = %self.role, "scanning SBOM");
        self.scanner.scan_sbom().await
    }

    pub fn process_result(&mut self) -> ScannerResult<()> {
        tracing::debug!(release = %self.role, "processing scan result");
        self.scanner.process_result()
    }

    /// Discards scan output so the next pipeline run scans again
    pub fn reset(&mut self) {
        self.scanner.state_mut().reset();
    }
}
