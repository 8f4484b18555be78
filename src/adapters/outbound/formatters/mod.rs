/// Formatter adapters for the supported diff output formats
mod json_formatter;
mod rich_formatter;

pub use json_formatter::JsonFormatter;
pub use rich_formatter::RichFormatter;
