use async_trait::async_trait;
use diffused::prelude::*;
use std::fs;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the mock does when a rule matches
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Exit successfully with this stdout
    Stdout(String),
    /// Write this content to the path following `--output`, then exit successfully
    WriteOutput(String),
    /// Exit with status 1 and this stderr
    Fail(String),
    /// Behave as if the timeout elapsed
    Timeout,
    /// Behave as if the executable does not exist
    Missing,
}

#[derive(Debug, Clone)]
struct Rule {
    fragments: Vec<String>,
    response: MockResponse,
}

/// Mock CommandRunner for testing that answers from a rule table and
/// records every invocation
///
/// A rule matches when every fragment is contained in one of the arguments;
/// the first matching rule wins. Unmatched invocations succeed with empty
/// output.
#[derive(Default, Clone)]
pub struct MockCommandRunner {
    rules: Arc<Mutex<Vec<Rule>>>,
    pub calls: Arc<Mutex<Vec<(String, Vec<String>, Duration)>>>,
}

impl MockCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, fragments: &[&str], response: MockResponse) -> Self {
        self.rules.lock().unwrap().push(Rule {
            fragments: fragments.iter().map(|f| f.to_string()).collect(),
            response,
        });
        self
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>, Duration)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of invocations whose first argument is `subcommand`
    pub fn count(&self, subcommand: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, args, _)| args.first().map(String::as_str) == Some(subcommand))
            .count()
    }

    fn response_for(&self, args: &[String]) -> Option<MockResponse> {
        self.rules
            .lock()
            .unwrap()
            .iter()
            .find(|rule| {
                rule.fragments
                    .iter()
                    .all(|fragment| args.iter().any(|arg| arg.contains(fragment.as_str())))
            })
            .map(|rule| rule.response.clone())
    }
}

#[async_trait]
impl CommandRunner for MockCommandRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> std::result::Result<CommandOutput, ScanError> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec(), timeout));

        match self.response_for(args) {
            None => Ok(CommandOutput::default()),
            Some(MockResponse::Stdout(stdout)) => Ok(CommandOutput::new(stdout, "")),
            Some(MockResponse::WriteOutput(content)) => {
                let output = args
                    .iter()
                    .position(|arg| arg == "--output")
                    .and_then(|i| args.get(i + 1))
                    .ok_or_else(|| ScanError::Unexpected {
                        details: "no --output argument".to_string(),
                    })?;
                fs::write(output, content).map_err(|e| ScanError::Unexpected {
                    details: e.to_string(),
                })?;
                Ok(CommandOutput::default())
            }
            Some(MockResponse::Fail(stderr)) => Err(ScanError::ProcessFailure {
                status: Some(1),
                stderr,
            }),
            Some(MockResponse::Timeout) => Err(ScanError::Timeout { timeout }),
            Some(MockResponse::Missing) => Err(ScanError::Spawn {
                program: program.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
            }),
        }
    }
}
