use diffused::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock SbomReader for testing that returns a fixed package list
#[derive(Default, Clone)]
pub struct MockSbomReader {
    pub packages: Vec<Package>,
    pub should_fail: bool,
    pub reads: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockSbomReader {
    pub fn new(packages: &[(&str, &str)]) -> Self {
        Self {
            packages: packages
                .iter()
                .map(|(name, version)| Package::new(*name, *version))
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn read_count(&self) -> usize {
        self.reads.lock().unwrap().len()
    }
}

impl SbomReader for MockSbomReader {
    fn read_packages(&self, path: &Path) -> Result<Vec<Package>> {
        self.reads.lock().unwrap().push(path.to_path_buf());
        if self.should_fail {
            anyhow::bail!("Mock SBOM reader failure");
        }
        Ok(self.packages.clone())
    }
}
