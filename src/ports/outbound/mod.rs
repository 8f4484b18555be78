/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define how the diff engine reaches scan backends, the file
/// system, and the console.
pub mod command_runner;
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;
pub mod sbom_reader;
pub mod scanner;

pub use command_runner::{CommandOutput, CommandRunner};
pub use formatter::DiffFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use sbom_reader::SbomReader;
pub use scanner::{Scanner, ScannerState, UNKNOWN_VERSION};
