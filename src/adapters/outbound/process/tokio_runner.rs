use crate::ports::outbound::{CommandOutput, CommandRunner};
use crate::shared::error::ScanError;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// TokioCommandRunner adapter for running external tools as child processes
///
/// Arguments are passed straight to the executable without a shell. The child
/// is killed if it outlives the timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioCommandRunner;

impl TokioCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<CommandOutput, ScanError> {
        tracing::debug!(program, ?args, timeout_secs = timeout.as_secs(), "running command");

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ScanError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(ScanError::Unexpected {
                    details: format!("failed to collect output of `{}`: {}", program, e),
                })
            }
            // Dropping the wait future drops the child, which kills it.
            Err(_) => return Err(ScanError::Timeout { timeout }),
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(ScanError::ProcessFailure {
                status: output.status.code(),
                stderr,
            });
        }

        Ok(CommandOutput { stdout, stderr })
    }
}
