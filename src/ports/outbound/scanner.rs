use crate::shared::error::{ScanError, StageOutcome};
use crate::shared::ScannerResult;
use crate::vulnerability_diff::domain::{ScanSubject, VulnerabilityMap};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Sentinel returned by [`Scanner::get_version`] when the backend cannot report one
pub const UNKNOWN_VERSION: &str = "unknown";

/// State shared by every scanner backend
///
/// `raw_result` holds the backend-native report of the last successful scan;
/// `processed_result` is rebuilt from it by [`Scanner::process_result`].
#[derive(Debug, Clone)]
pub struct ScannerState<R> {
    subject: ScanSubject,
    pub raw_result: Option<R>,
    pub processed_result: VulnerabilityMap,
    pub error: String,
}

impl<R> ScannerState<R> {
    pub fn new(subject: ScanSubject) -> Self {
        Self {
            subject,
            raw_result: None,
            processed_result: VulnerabilityMap::new(),
            error: String::new(),
        }
    }

    pub fn subject(&self) -> &ScanSubject {
        &self.subject
    }

    pub fn sbom(&self) -> Option<&Path> {
        self.subject.sbom()
    }

    pub fn image(&self) -> Option<&str> {
        self.subject.image()
    }

    pub fn set_sbom(&mut self, sbom: PathBuf) {
        self.subject.set_sbom(sbom);
    }

    /// Stores the diagnostic for a failed stage and hands the failure back as an outcome
    pub fn record_failure(&mut self, message: String, error: ScanError) -> StageOutcome {
        tracing::warn!("{}", message);
        self.error = message;
        StageOutcome::Failed(error)
    }

    /// Drops scan output so that the next pipeline run recomputes it
    pub fn reset(&mut self) {
        self.raw_result = None;
        self.processed_result.clear();
    }
}

/// Scanner port for obtaining normalized vulnerability data
///
/// A scanner is bound to one [`ScanSubject`]. Configuration misuse (missing
/// image, missing SBOM, processing before scanning) is returned as `Err`;
/// backend failures are recorded in the state's `error` and reported as
/// [`StageOutcome::Failed`].
#[async_trait]
pub trait Scanner: Send + Sync {
    /// Backend-native scan report
    type Report: Send + Sync;

    fn state(&self) -> &ScannerState<Self::Report>;

    fn state_mut(&mut self) -> &mut ScannerState<Self::Report>;

    /// Produces an SBOM at `output_path` from the configured image
    ///
    /// On success the subject's SBOM path is set to `output_path`.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if no image is configured or
    /// `output_path` is empty.
    async fn retrieve_sbom(&mut self, output_path: &Path) -> ScannerResult<StageOutcome>;

    /// Scans the configured SBOM and stores the backend report as `raw_result`
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if no SBOM is configured or retrieved.
    async fn scan_sbom(&mut self) -> ScannerResult<StageOutcome>;

    /// Rebuilds `processed_result` from `raw_result`, discarding prior content
    ///
    /// # Errors
    /// Returns `Precondition` if no scan has produced a `raw_result`.
    fn process_result(&mut self) -> ScannerResult<()>;

    /// Reports the backend tool's version, or [`UNKNOWN_VERSION`]
    ///
    /// Does not depend on the scan subject and never fails.
    async fn get_version(&self) -> String;
}
