use crate::shared::Result;

/// OutputPresenter port for delivering rendered diff output
///
/// Abstracts where the rendered report ends up (stdout, a file, ...).
pub trait OutputPresenter {
    /// Presents the rendered report
    ///
    /// # Errors
    /// Returns an error if the destination cannot be written
    fn present(&self, content: &str) -> Result<()>;
}
