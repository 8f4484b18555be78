//! diffused - vulnerability diff tool for SBOMs and container images
//!
//! This library reports which vulnerabilities were fixed between a previous
//! and a next release of a software artifact. Each release is described by an
//! SBOM or by a container image reference; images are turned into SBOMs and
//! both sides are scanned with an external scanner before being compared.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`vulnerability_diff`): Vulnerability maps and the comparison rules
//! - **Application Layer** (`application`): Releases, the diff use case and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use diffused::prelude::*;
//!
//! # async fn example() -> Result<()> {
//! let settings = ScannerSettings::default();
//! let previous = TrivyScanner::new(ScanSubject::from_sbom("previous.json")?, settings.clone());
//! let next = TrivyScanner::new(ScanSubject::from_sbom("next.json")?, settings);
//!
//! let mut differ = VulnerabilityDiffer::new(
//!     previous,
//!     next,
//!     FileSystemReader::new(),
//!     StderrProgressReporter::new(),
//! );
//!
//! let formatter = JsonFormatter::new();
//! let output = formatter.format_fixed(differ.vulnerabilities_diff().await?)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod shared;
pub mod vulnerability_diff;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, RichFormatter};
    pub use crate::adapters::outbound::process::TokioCommandRunner;
    pub use crate::adapters::outbound::scanners::{ScannerSettings, TrivyScanner};
    pub use crate::application::dto::OutputFormat;
    pub use crate::application::release::{Release, ReleaseRole};
    pub use crate::application::use_cases::VulnerabilityDiffer;
    pub use crate::ports::outbound::{
        CommandOutput, CommandRunner, DiffFormatter, OutputPresenter, ProgressReporter,
        SbomReader, Scanner, ScannerState,
    };
    pub use crate::shared::error::{DiffusedError, ScanError, StageOutcome};
    pub use crate::shared::Result;
    pub use crate::vulnerability_diff::domain::{
        Package, PackageChange, PackageChanges, ScanSubject, VulnerabilityMap,
    };
    pub use crate::vulnerability_diff::services::FixDetector;
}
