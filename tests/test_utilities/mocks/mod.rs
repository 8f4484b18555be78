/// Mock implementations for testing
mod mock_command_runner;
mod mock_progress_reporter;
mod mock_sbom_reader;

pub use mock_command_runner::{MockCommandRunner, MockResponse};
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_sbom_reader::MockSbomReader;
