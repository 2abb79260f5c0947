//! CSV title collections.
//!
//! Reads the title column out of a CSV export and writes result sets back
//! out as a single-column CSV.
//!
//! # Example
//!
//! ```
//! use bibcompare::{TitleLoader, csv::CsvLoader};
//!
//! let input = "Title,Author,Year\nExample Paper,Smith J,2023";
//!
//! let loader = CsvLoader::new();
//!
//! let records = loader.parse(input).unwrap();
//! assert_eq!(records[0].title(), "Example Paper");
//! ```

mod config;
mod parse;
mod write;

use crate::error::ParseError;
use crate::{Record, TitleLoader};
pub use config::CsvConfig;
use parse::csv_parse;
pub use write::{save_csv, write_titles};

/// Loader for the title column of CSV exports.
///
/// The title column is chosen by name from the header row, see
/// [`CsvConfig`] for the candidate names and their priority.
///
/// # Examples
///
/// Basic usage:
/// ```
/// use bibcompare::csv::CsvLoader;
/// use bibcompare::TitleLoader;
///
/// let input = "TI,AU,PY\nExample Paper,Smith J,2023";
/// let loader = CsvLoader::new();
/// let records = loader.parse(input).unwrap();
/// assert_eq!(records[0].source(), Some("TI"));
/// ```
///
/// With custom configuration:
/// ```
/// use bibcompare::csv::{CsvConfig, CsvLoader};
///
/// let mut config = CsvConfig::new();
/// config.set_delimiter(b';');
///
/// let loader = CsvLoader::with_config(config);
/// ```
///
/// Auto-detection of the delimiter:
/// ```
/// use bibcompare::csv::CsvLoader;
/// use bibcompare::TitleLoader;
///
/// let loader = CsvLoader::with_auto_detection();
/// let records = loader.parse("Title\tYear\nTab Separated\t2021").unwrap();
/// assert_eq!(records[0].title(), "Tab Separated");
/// ```
#[derive(Debug, Clone)]
pub struct CsvLoader {
    config: CsvConfig,
    auto_detect: bool,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvLoader {
    /// Creates a new CSV loader with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: CsvConfig::new(),
            auto_detect: false,
        }
    }

    /// Creates a new CSV loader with custom configuration
    #[must_use]
    pub fn with_config(config: CsvConfig) -> Self {
        Self {
            config,
            auto_detect: false,
        }
    }

    /// Creates a new CSV loader that detects the delimiter from the input
    #[must_use]
    pub fn with_auto_detection() -> Self {
        Self {
            config: CsvConfig::new(),
            auto_detect: true,
        }
    }

    pub fn set_config(&mut self, config: CsvConfig) -> &mut Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CsvConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut CsvConfig {
        &mut self.config
    }

    /// Enables or disables delimiter detection
    pub fn set_auto_detection(&mut self, enabled: bool) -> &mut Self {
        self.auto_detect = enabled;
        self
    }

    fn effective_config(&self, input: &str) -> CsvConfig {
        let mut config = self.config.clone();
        if self.auto_detect {
            config.set_delimiter(parse::detect_csv_delimiter(input));
        }
        config
    }
}

impl TitleLoader for CsvLoader {
    /// Extract titles from CSV text.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` when the configuration is invalid, the header row
    /// has none of the configured title columns, or a row is malformed.
    fn parse(&self, input: &str) -> Result<Vec<Record>, ParseError> {
        let input = input.trim_start_matches('\u{feff}');
        csv_parse(input, &self.effective_config(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValueError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_basic_csv() {
        let input = "\
Title,Author,Year,Journal
Test Paper,Smith J,2023,Test Journal
Another Paper,\"Doe, Jane\",2022,Another Journal";

        let records = CsvLoader::new().parse(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title(), "Test Paper");
        assert_eq!(records[1].title(), "Another Paper");
        assert_eq!(records[1].normalized_title(), "another paper");
    }

    #[test]
    fn test_custom_title_column() {
        let input = "\
Document Title,Writers
Test Paper,Smith J";

        let mut config = CsvConfig::new();
        config.add_title_columns(vec!["Document Title".to_string()]);

        let records = CsvLoader::with_config(config).parse(input).unwrap();
        assert_eq!(records[0].title(), "Test Paper");
        assert_eq!(records[0].source(), Some("Document Title"));
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let input = "\u{feff}Title,Year\nPaper,2020";
        let records = CsvLoader::new().parse(input).unwrap();
        assert_eq!(records[0].source(), Some("Title"));
    }

    #[test]
    fn test_auto_detection() {
        let input = "\
title;author;year
Test Paper;Smith J;2023
Another Paper;Doe J;2024";

        let records = CsvLoader::with_auto_detection().parse(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title(), "Test Paper");
    }

    #[test]
    fn test_without_auto_detection_semicolons_hide_the_title() {
        let input = "title;author\nTest Paper;Smith J";
        let err = CsvLoader::new().parse(input).unwrap_err();
        assert!(matches!(err.error, ValueError::MissingTitleColumn { .. }));
    }

    #[test]
    fn test_invalid_configuration() {
        let mut config = CsvConfig::new();
        config.set_title_columns(Vec::new());

        let err = CsvLoader::with_config(config).parse("Title\nX").unwrap_err();
        assert!(matches!(err.error, ValueError::Config(_)));
    }

    #[test]
    fn test_malformed_row_reports_line() {
        let mut config = CsvConfig::new();
        config.set_flexible(false);
        let input = "Title,Author\nFirst Paper,Smith J\nSecond Paper";

        let err = CsvLoader::with_config(config).parse(input).unwrap_err();
        assert_eq!(err.line, Some(3));
    }

    #[test]
    fn test_empty_input() {
        assert!(CsvLoader::new().parse("").unwrap().is_empty());
    }

    #[test]
    fn test_loader_configuration_methods() {
        let mut loader = CsvLoader::new();
        assert_eq!(loader.config().delimiter(), b',');

        loader.config_mut().set_delimiter(b';');
        assert_eq!(loader.config().delimiter(), b';');

        loader.set_config(CsvConfig::new());
        assert_eq!(loader.config().delimiter(), b',');

        loader.set_auto_detection(true);
        assert!(loader.auto_detect);
    }
}
