use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

/// Builds an SPDX JSON document listing `packages` as `(name, version)`
pub fn spdx_document(packages: &[(&str, &str)]) -> String {
    let packages: Vec<_> = packages
        .iter()
        .enumerate()
        .map(|(i, (name, version))| {
            json!({
                "SPDXID": format!("SPDXRef-Package-{}", i),
                "name": name,
                "versionInfo": version,
            })
        })
        .collect();

    serde_json::to_string_pretty(&json!({
        "spdxVersion": "SPDX-2.3",
        "dataLicense": "CC0-1.0",
        "SPDXID": "SPDXRef-DOCUMENT",
        "name": "test-image",
        "packages": packages,
    }))
    .unwrap()
}

/// Builds a Trivy JSON report with one result section holding `findings`
/// as `(vulnerability id, package name, installed version)`
pub fn trivy_report(findings: &[(&str, &str, &str)]) -> String {
    let vulnerabilities: Vec<_> = findings
        .iter()
        .map(|(id, name, version)| {
            json!({
                "VulnerabilityID": id,
                "PkgName": name,
                "InstalledVersion": version,
                "Severity": "HIGH",
            })
        })
        .collect();

    serde_json::to_string_pretty(&json!({
        "SchemaVersion": 2,
        "ArtifactType": "cyclonedx",
        "Results": [{
            "Target": "test-image (alpine 3.18)",
            "Class": "os-pkgs",
            "Type": "alpine",
            "Vulnerabilities": vulnerabilities,
        }],
    }))
    .unwrap()
}

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Previous release: CVE-2023-1234 on pkgA and pkgC, CVE-2023-5678 on pkgB
pub fn previous_findings() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![
        ("CVE-2023-1234", "pkgA", "1.0.0"),
        ("CVE-2023-1234", "pkgC", "3.0.0"),
        ("CVE-2023-5678", "pkgB", "2.0.0"),
    ]
}

/// Next release: only CVE-2023-5678 remains, on an updated pkgB
pub fn next_findings() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![("CVE-2023-5678", "pkgB", "2.1.0")]
}

/// Next release SBOM: pkgA updated, pkgB updated, pkgC removed
pub fn next_packages() -> Vec<(&'static str, &'static str)> {
    vec![("pkgA", "1.1.0"), ("pkgB", "2.1.0")]
}
