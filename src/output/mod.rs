//! Result line formatting
//!
//! The measurement is printed either as a sentence or as a CSV record for
//! scripts that collect results over time.

mod formatter;

pub use formatter::{
    OutputFormatter,
    HumanFormatter,
    CsvFormatter,
    format_duration,
};

use crate::types::OutputFormat;

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create the formatter for the configured output format
    pub fn create_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Human => Box::new(HumanFormatter),
            OutputFormat::Csv => Box::new(CsvFormatter),
        }
    }
}
