/// Scanner adapters for vulnerability backends
mod settings;
mod trivy;
mod trivy_report;

pub use settings::ScannerSettings;
pub use trivy::TrivyScanner;
pub use trivy_report::{TrivyReport, TrivyResult, TrivyVulnerability};
