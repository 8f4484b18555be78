use crate::application::release::{Release, ReleaseRole};
use crate::ports::outbound::{ProgressReporter, SbomReader, Scanner};
use crate::shared::error::{DiffusedError, StageOutcome};
use crate::shared::{Memo, Result, ScannerResult};
use crate::vulnerability_diff::domain::{Package, PackageChanges};
use crate::vulnerability_diff::services::FixDetector;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Number of pipeline stages reported through the progress reporter
const TOTAL_STAGES: usize = 4;

/// Prefix of the temporary directory that receives generated SBOMs
const WORKSPACE_PREFIX: &str = "diffused-";

/// Derives the file name of the SBOM generated for `image`
///
/// Every character other than ASCII alphanumerics, `.`, `-` and `_` becomes
/// `_`, then `.json` is appended.
///
/// # Examples
/// ```
/// use diffused::application::use_cases::sbom_file_name;
///
/// assert_eq!(sbom_file_name("previous/image:latest"), "previous_image_latest.json");
/// ```
pub fn sbom_file_name(image: &str) -> String {
    let mut name: String = image
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    name.push_str(".json");
    name
}

/// VulnerabilityDiffer - Use case for finding vulnerabilities fixed between two releases
///
/// Drives both releases through the pipeline (SBOM retrieval, scan,
/// normalization) and compares their vulnerability maps. Each stage only runs
/// for releases that still need it, the two releases run concurrently, and
/// both the diff and its per-package enrichment are memoized until
/// [`reset`](Self::reset).
///
/// Backend failures never abort the pipeline: the affected release keeps its
/// diagnostic in [`Release::error`] and the diff is computed from whatever
/// data is available.
///
/// # Type Parameters
/// * `S` - Scanner implementation used for both releases
/// * `SR` - SbomReader implementation
/// * `PR` - ProgressReporter implementation
pub struct VulnerabilityDiffer<S, SR, PR> {
    previous: Release<S>,
    next: Release<S>,
    sbom_reader: SR,
    progress_reporter: PR,
    workspace: Option<TempDir>,
    fixed: Memo<Vec<String>>,
    all_info: Memo<PackageChanges>,
}

impl<S, SR, PR> VulnerabilityDiffer<S, SR, PR>
where
    S: Scanner,
    SR: SbomReader,
    PR: ProgressReporter,
{
    /// Creates a new VulnerabilityDiffer with injected dependencies
    pub fn new(previous: S, next: S, sbom_reader: SR, progress_reporter: PR) -> Self {
        Self {
            previous: Release::new(ReleaseRole::Previous, previous),
            next: Release::new(ReleaseRole::Next, next),
            sbom_reader,
            progress_reporter,
            workspace: None,
            fixed: Memo::default(),
            all_info: Memo::default(),
        }
    }

    pub fn previous(&self) -> &Release<S> {
        &self.previous
    }

    pub fn next(&self) -> &Release<S> {
        &self.next
    }

    pub fn previous_mut(&mut self) -> &mut Release<S> {
        &mut self.previous
    }

    pub fn next_mut(&mut self) -> &mut Release<S> {
        &mut self.next
    }

    pub fn progress_reporter(&self) -> &PR {
        &self.progress_reporter
    }

    /// Directory holding generated SBOMs, once one has been created
    pub fn workspace(&self) -> Option<&Path> {
        self.workspace.as_ref().map(TempDir::path)
    }

    /// Diagnostics recorded by the releases, in previous/next order
    pub fn errors(&self) -> Vec<(ReleaseRole, &str)> {
        [&self.previous, &self.next]
            .into_iter()
            .filter(|release| !release.error().is_empty())
            .map(|release| (release.role(), release.error()))
            .collect()
    }

    fn release(&self, role: ReleaseRole) -> &Release<S> {
        match role {
            ReleaseRole::Previous => &self.previous,
            ReleaseRole::Next => &self.next,
        }
    }

    /// Returns the per-release directory for generated SBOMs, creating the
    /// temporary workspace on first use
    fn workspace_dir(&mut self, role: ReleaseRole) -> Result<PathBuf> {
        let workspace = match self.workspace.take() {
            Some(workspace) => workspace,
            None => {
                let workspace = tempfile::Builder::new()
                    .prefix(WORKSPACE_PREFIX)
                    .tempdir()
                    .map_err(|e| anyhow::anyhow!("Failed to create temporary directory: {}", e))?;
                tracing::debug!(path = %workspace.path().display(), "created SBOM workspace");
                workspace
            }
        };

        // Separate directories keep identical image references from colliding.
        let dir = workspace.path().join(role.to_string());
        self.workspace = Some(workspace);

        fs::create_dir_all(&dir).map_err(|e| {
            anyhow::anyhow!("Failed to create directory {}: {}", dir.display(), e)
        })?;
        Ok(dir)
    }

    /// Output path for a release that still needs an SBOM, if any
    fn pending_sbom_path(&mut self, role: ReleaseRole) -> Result<Option<PathBuf>> {
        let release = self.release(role);
        let file_name = match release.image() {
            Some(image) if release.needs_sbom() => sbom_file_name(image),
            _ => return Ok(None),
        };

        Ok(Some(self.workspace_dir(role)?.join(file_name)))
    }

    /// Generates SBOMs for releases that only have an image reference
    ///
    /// # Errors
    /// Returns an error if the temporary workspace cannot be created or a
    /// scanner rejects its configuration. Backend failures are recorded on the
    /// release instead.
    pub async fn retrieve_sboms(&mut self) -> Result<()> {
        self.progress_reporter
            .report_stage(1, TOTAL_STAGES, "Retrieving SBOMs");

        let previous_path = self.pending_sbom_path(ReleaseRole::Previous)?;
        let next_path = self.pending_sbom_path(ReleaseRole::Next)?;

        let (previous, next) = futures::join!(
            retrieve_into(&mut self.previous, previous_path.as_deref()),
            retrieve_into(&mut self.next, next_path.as_deref()),
        );
        log_outcome(ReleaseRole::Previous, "SBOM retrieval", previous?);
        log_outcome(ReleaseRole::Next, "SBOM retrieval", next?);
        Ok(())
    }

    /// Retrieves missing SBOMs, then scans every release that has an SBOM but
    /// no scan report yet
    pub async fn scan_sboms(&mut self) -> Result<()> {
        self.retrieve_sboms().await?;

        self.progress_reporter
            .report_stage(2, TOTAL_STAGES, "Scanning SBOMs");

        let (previous, next) = futures::join!(
            scan_if_needed(&mut self.previous),
            scan_if_needed(&mut self.next),
        );
        log_outcome(ReleaseRole::Previous, "SBOM scan", previous?);
        log_outcome(ReleaseRole::Next, "SBOM scan", next?);
        Ok(())
    }

    /// Scans as needed, then normalizes every scan report not yet processed
    ///
    /// Releases whose scan failed have no report and are skipped.
    pub async fn process_results(&mut self) -> Result<()> {
        self.scan_sboms().await?;

        self.progress_reporter
            .report_stage(3, TOTAL_STAGES, "Processing scan results");

        for release in [&mut self.previous, &mut self.next] {
            if release.needs_processing() {
                release.process_result()?;
            }
        }
        Ok(())
    }

    /// Runs the pipeline and stores the identifiers fixed in the next release
    pub async fn diff_vulnerabilities(&mut self) -> Result<()> {
        self.process_results().await?;

        self.progress_reporter
            .report_stage(4, TOTAL_STAGES, "Comparing vulnerabilities");

        let fixed = FixDetector::fixed_identifiers(
            self.previous.processed_result(),
            self.next.processed_result(),
        );
        tracing::debug!(fixed = fixed.len(), "computed vulnerability diff");

        self.fixed.set(fixed);
        Ok(())
    }

    /// Identifiers present in the previous release but not in the next one
    ///
    /// Computed on first access and cached afterwards.
    pub async fn vulnerabilities_diff(&mut self) -> Result<&[String]> {
        if !self.fixed.is_computed() {
            self.diff_vulnerabilities().await?;
        }

        self.fixed.get().map(Vec::as_slice).ok_or_else(|| {
            anyhow::Error::from(DiffusedError::precondition(
                "Vulnerability diff was not computed",
            ))
        })
    }

    /// Reads the package list of the SBOM at `path`
    pub fn load_sbom(&self, path: &Path) -> Result<Vec<Package>> {
        self.sbom_reader.read_packages(path)
    }

    /// Describes what became of each package behind every fixed vulnerability
    ///
    /// Looks package names up in the next release's SBOM: a name that is no
    /// longer listed is reported as removed, otherwise the listed version is
    /// reported. Nothing is loaded when the diff is empty or the next release
    /// has no SBOM.
    pub async fn generate_additional_info(&mut self) -> Result<()> {
        if !self.fixed.is_computed() {
            self.diff_vulnerabilities().await?;
        }

        let fixed = self.fixed.get().cloned().unwrap_or_default();
        let next_sbom = self.next.sbom().map(Path::to_path_buf);

        let next_sbom = match next_sbom {
            Some(path) if !fixed.is_empty() => path,
            _ => {
                tracing::debug!("no fixed vulnerabilities or next SBOM, skipping package details");
                self.all_info.set(PackageChanges::new());
                return Ok(());
            }
        };

        self.progress_reporter.report(&format!(
            "📖 Loading next SBOM: {}",
            next_sbom.display()
        ));
        let packages = self.load_sbom(&next_sbom)?;
        let versions = FixDetector::version_index(&packages);
        let changes =
            FixDetector::package_changes(&fixed, self.previous.processed_result(), &versions);

        self.all_info.set(changes);
        Ok(())
    }

    /// Fixed vulnerabilities with per-package version changes
    ///
    /// Computed on first access and cached afterwards.
    pub async fn vulnerabilities_diff_all_info(&mut self) -> Result<&PackageChanges> {
        if !self.all_info.is_computed() {
            self.generate_additional_info().await?;
        }

        self.all_info.get().ok_or_else(|| {
            anyhow::Error::from(DiffusedError::precondition(
                "Vulnerability details were not computed",
            ))
        })
    }

    /// Clears the cached diff and package details so the next access recomputes them
    pub fn reset(&mut self) {
        self.fixed.reset();
        self.all_info.reset();
    }
}

async fn retrieve_into<S: Scanner>(
    release: &mut Release<S>,
    output_path: Option<&Path>,
) -> ScannerResult<Option<StageOutcome>> {
    match output_path {
        Some(path) => release.retrieve_sbom(path).await.map(Some),
        None => Ok(None),
    }
}

async fn scan_if_needed<S: Scanner>(release: &mut Release<S>) -> ScannerResult<Option<StageOutcome>> {
    if release.needs_scan() {
        release.scan_sbom().await.map(Some)
    } else {
        Ok(None)
    }
}

fn log_outcome(role: ReleaseRole, stage: &str, outcome: Option<StageOutcome>) {
    match outcome {
        Some(StageOutcome::Completed) => tracing::debug!(release = %role, "{} completed", stage),
        Some(StageOutcome::Failed(error)) => {
            tracing::debug!(release = %role, error = %error, "{} failed", stage)
        }
        None => tracing::debug!(release = %role, "{} skipped", stage),
    }
}
