use crate::shared::error::DiffusedError;

/// Result type for application and adapter code; errors carry context via anyhow.
pub type Result<T> = std::result::Result<T, anyhow::Error>;

/// Result type of the scanner contract, whose errors are always configuration misuse.
pub type ScannerResult<T> = std::result::Result<T, DiffusedError>;
