use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of an SBOM we are willing to load into memory (100 MB)
pub const MAX_SBOM_SIZE: u64 = 100 * 1024 * 1024;

/// Checks that `path` resolves to a regular file no larger than `max_size` bytes.
///
/// Symbolic links are followed; the checks apply to the link target.
///
/// `description` names the file in error messages (e.g. "next SBOM").
pub fn validate_input_file(path: &Path, description: &str, max_size: u64) -> Result<()> {
    let metadata = fs::metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read {} metadata for {}: {}",
            description,
            path.display(),
            e
        )
    })?;

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    if metadata.len() > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            metadata.len(),
            max_size
        );
    }

    Ok(())
}

/// Rejects an output target that already exists as a symbolic link.
pub fn validate_output_target(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_symlink() => anyhow::bail!(
            "Security: Output path {} is a symbolic link. For security reasons, writing to symbolic links is not allowed.",
            path.display()
        ),
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => anyhow::bail!(
            "Failed to read metadata for {}: {}",
            path.display(),
            e
        ),
    }
}
