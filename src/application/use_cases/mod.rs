/// Use cases module containing application business logic orchestration
mod vulnerability_differ;

pub use vulnerability_differ::{sbom_file_name, VulnerabilityDiffer};
