use crate::adapters::outbound::formatters::{JsonFormatter, RichFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::DiffFormatter;

/// Factory for creating diff formatters
///
/// Selects the formatter adapter for an [`OutputFormat`]. `colored` only
/// affects the rich formatter.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use diffused::application::dto::OutputFormat;
    /// use diffused::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Json, false);
    /// assert_eq!(formatter.format_fixed(&[]).unwrap(), "[]");
    /// ```
    pub fn create(format: OutputFormat, colored: bool) -> Box<dyn DiffFormatter> {
        match format {
            OutputFormat::Rich => Box::new(RichFormatter::new(colored)),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }
}
