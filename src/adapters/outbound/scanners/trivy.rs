use super::{ScannerSettings, TrivyReport};
use crate::adapters::outbound::process::TokioCommandRunner;
use crate::ports::outbound::{CommandRunner, Scanner, ScannerState, UNKNOWN_VERSION};
use crate::shared::error::{DiffusedError, ScanError, StageOutcome};
use crate::shared::ScannerResult;
use crate::vulnerability_diff::domain::{Package, ScanSubject, VulnerabilityMap};
use async_trait::async_trait;
use std::path::Path;

/// TrivyScanner adapter backed by the `trivy` command-line tool
///
/// SBOMs are produced with `trivy image --format spdx-json` and scanned with
/// `trivy sbom --format json`. Every invocation goes through a
/// [`CommandRunner`] and is bounded by the timeouts in [`ScannerSettings`].
pub struct TrivyScanner<R = TokioCommandRunner> {
    state: ScannerState<TrivyReport>,
    runner: R,
    settings: ScannerSettings,
}

impl TrivyScanner<TokioCommandRunner> {
    pub fn new(subject: ScanSubject, settings: ScannerSettings) -> Self {
        Self::with_runner(subject, TokioCommandRunner::new(), settings)
    }
}

impl<R: CommandRunner> TrivyScanner<R> {
    pub fn with_runner(subject: ScanSubject, runner: R, settings: ScannerSettings) -> Self {
        Self {
            state: ScannerState::new(subject),
            runner,
            settings,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn settings(&self) -> &ScannerSettings {
        &self.settings
    }

    /// Asks the installed tool for its version
    ///
    /// Needs no scan subject. Any execution or parsing problem yields
    /// [`UNKNOWN_VERSION`].
    pub async fn probe_version(runner: &R, settings: &ScannerSettings) -> String {
        let args = vec!["--version".to_string()];

        match runner
            .run(&settings.binary, &args, settings.version_timeout)
            .await
        {
            Ok(output) => parse_version(&output.stdout).unwrap_or_else(|| {
                tracing::debug!(stdout = %output.stdout, "unrecognized version output");
                UNKNOWN_VERSION.to_string()
            }),
            Err(e) => {
                tracing::debug!("{}", describe_failure("version check", &e));
                UNKNOWN_VERSION.to_string()
            }
        }
    }
}

/// Extracts `X.Y.Z` from a first line shaped like `Version: X.Y.Z`
fn parse_version(stdout: &str) -> Option<String> {
    let first_line = stdout.lines().next()?;
    let version = first_line.trim().strip_prefix("Version:")?.trim();

    if version.is_empty() {
        return None;
    }
    Some(version.to_string())
}

/// Renders a backend failure into the diagnostic stored on the scanner
fn describe_failure(operation: &str, error: &ScanError) -> String {
    match error {
        ScanError::ProcessFailure { stderr, .. } => {
            format!("Trivy {} failed: {}", operation, stderr.trim())
        }
        ScanError::Timeout { timeout } => format!(
            "Trivy {} timed out after {}s",
            operation,
            timeout.as_secs()
        ),
        ScanError::MalformedOutput { details } => {
            format!("Error parsing Trivy output: {}", details)
        }
        ScanError::Spawn { .. } | ScanError::Unexpected { .. } => {
            format!("Unexpected error during Trivy {}: {}", operation, error)
        }
    }
}

#[async_trait]
impl<R: CommandRunner> Scanner for TrivyScanner<R> {
    type Report = TrivyReport;

    fn state(&self) -> &ScannerState<TrivyReport> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ScannerState<TrivyReport> {
        &mut self.state
    }

    async fn retrieve_sbom(&mut self, output_path: &Path) -> ScannerResult<StageOutcome> {
        let image = self
            .state
            .image()
            .ok_or_else(|| {
                DiffusedError::invalid_configuration("You must set the image to retrieve the SBOM")
            })?
            .to_string();

        if output_path.as_os_str().is_empty() {
            return Err(DiffusedError::invalid_configuration(
                "You must set the output_file with a valid path",
            ));
        }

        let output_arg = path_argument(output_path)?;
        let operation = format!("SBOM generation for {}", image);
        let args = vec![
            "image".to_string(),
            "--format".to_string(),
            "spdx-json".to_string(),
            "--output".to_string(),
            output_arg,
            image,
        ];

        match self
            .runner
            .run(&self.settings.binary, &args, self.settings.scan_timeout)
            .await
        {
            Ok(_) => {
                tracing::debug!(sbom = %output_path.display(), "{} finished", operation);
                self.state.set_sbom(output_path.to_path_buf());
                Ok(StageOutcome::Completed)
            }
            Err(e) => Ok(self.state.record_failure(describe_failure(&operation, &e), e)),
        }
    }

    async fn scan_sbom(&mut self) -> ScannerResult<StageOutcome> {
        let sbom = self
            .state
            .sbom()
            .ok_or_else(|| {
                DiffusedError::invalid_configuration(
                    "You must set the SBOM path or retrieve from a container image",
                )
            })?
            .to_path_buf();

        let sbom_arg = path_argument(&sbom)?;
        let operation = format!("SBOM scan for {}", sbom.display());
        let args = vec![
            "sbom".to_string(),
            "--format".to_string(),
            "json".to_string(),
            sbom_arg,
        ];

        let output = match self
            .runner
            .run(&self.settings.binary, &args, self.settings.scan_timeout)
            .await
        {
            Ok(output) => output,
            Err(e) => return Ok(self.state.record_failure(describe_failure(&operation, &e), e)),
        };

        match serde_json::from_str::<TrivyReport>(&output.stdout) {
            Ok(report) => {
                tracing::debug!("{} finished", operation);
                self.state.raw_result = Some(report);
                Ok(StageOutcome::Completed)
            }
            Err(e) => {
                let error = ScanError::MalformedOutput {
                    details: e.to_string(),
                };
                Ok(self
                    .state
                    .record_failure(describe_failure(&operation, &error), error))
            }
        }
    }

    fn process_result(&mut self) -> ScannerResult<()> {
        let report = self.state.raw_result.as_ref().ok_or_else(|| {
            DiffusedError::precondition("Run a scan before processing its output")
        })?;

        let mut processed = VulnerabilityMap::new();
        for vulnerability in report.vulnerabilities() {
            let Some(identifier) = vulnerability
                .vulnerability_id
                .as_deref()
                .filter(|id| !id.is_empty())
            else {
                continue;
            };

            processed.insert(
                identifier,
                Package::new(
                    vulnerability.pkg_name.clone().unwrap_or_default(),
                    vulnerability.installed_version.clone().unwrap_or_default(),
                ),
            );
        }

        self.state.processed_result = processed;
        Ok(())
    }

    async fn get_version(&self) -> String {
        Self::probe_version(&self.runner, &self.settings).await
    }
}

/// Paths are handed to the backend unchanged, so they must be valid UTF-8
fn path_argument(path: &Path) -> ScannerResult<String> {
    path.to_str().map(str::to_string).ok_or_else(|| {
        DiffusedError::invalid_configuration(format!(
            "Path is not valid UTF-8: {}",
            path.display()
        ))
    })
}
