pub mod package;
pub mod package_change;
pub mod scan_subject;
pub mod vulnerability_map;

pub use package::Package;
pub use package_change::{PackageChange, PackageChanges};
pub use scan_subject::ScanSubject;
pub use vulnerability_map::VulnerabilityMap;
