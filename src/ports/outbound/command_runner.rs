use crate::shared::error::ScanError;
use async_trait::async_trait;
use std::time::Duration;

/// Captured output of a finished external command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }
}

/// CommandRunner port for executing external tools
///
/// Implementations run `program` directly (never through a shell) and must
/// not block longer than `timeout`.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args` and returns its captured output
    ///
    /// # Errors
    /// - `ScanError::Spawn` if the executable cannot be started
    /// - `ScanError::ProcessFailure` if it exits unsuccessfully
    /// - `ScanError::Timeout` if it does not finish within `timeout`
    async fn run(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<CommandOutput, ScanError>;
}
