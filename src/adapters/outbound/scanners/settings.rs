use std::time::Duration;

/// Executable and timeouts used by process-backed scanners
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerSettings {
    pub binary: String,
    /// Bound for SBOM generation and SBOM scans
    pub scan_timeout: Duration,
    /// Bound for the version probe
    pub version_timeout: Duration,
}

impl ScannerSettings {
    pub const DEFAULT_BINARY: &'static str = "trivy";
    pub const DEFAULT_SCAN_TIMEOUT_SECS: u64 = 120;
    pub const DEFAULT_VERSION_TIMEOUT_SECS: u64 = 10;
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            binary: Self::DEFAULT_BINARY.to_string(),
            scan_timeout: Duration::from_secs(Self::DEFAULT_SCAN_TIMEOUT_SECS),
            version_timeout: Duration::from_secs(Self::DEFAULT_VERSION_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = ScannerSettings::default();
        assert_eq!(settings.binary, "trivy");
        assert_eq!(settings.scan_timeout, Duration::from_secs(120));
        assert_eq!(settings.version_timeout, Duration::from_secs(10));
    }
}
