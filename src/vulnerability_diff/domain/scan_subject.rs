use crate::shared::error::DiffusedError;
use crate::shared::ScannerResult;
use std::path::{Path, PathBuf};

/// What a scanner operates on: an SBOM file, a container image, or both
///
/// When both are present the SBOM wins; the image is only used to produce a
/// missing SBOM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSubject {
    sbom: Option<PathBuf>,
    image: Option<String>,
}

impl ScanSubject {
    /// Creates a scan subject, treating blank values as absent
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if neither an SBOM nor an image is given.
    pub fn new(sbom: Option<PathBuf>, image: Option<String>) -> ScannerResult<Self> {
        let sbom = sbom.filter(|path| !path.as_os_str().to_string_lossy().trim().is_empty());
        let image = image.filter(|image| !image.trim().is_empty());

        if sbom.is_none() && image.is_none() {
            return Err(DiffusedError::invalid_configuration(
                "You must set sbom or image",
            ));
        }

        Ok(Self { sbom, image })
    }

    pub fn from_sbom(sbom: impl Into<PathBuf>) -> ScannerResult<Self> {
        Self::new(Some(sbom.into()), None)
    }

    pub fn from_image(image: impl Into<String>) -> ScannerResult<Self> {
        Self::new(None, Some(image.into()))
    }

    pub fn sbom(&self) -> Option<&Path> {
        self.sbom.as_deref()
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Records the SBOM produced for this subject's image
    pub fn set_sbom(&mut self, sbom: PathBuf) {
        self.sbom = Some(sbom);
    }
}
