//! Normalize, deduplicate and compare citation title collections.
//!
//! `bibcompare` answers the question "which references in this export are new
//! compared to that one?" for literature searches exported from reference
//! managers and bibliographic databases. Only titles are compared. Titles are
//! normalized first, so differences in capitalization, accents, HTML entities,
//! inline markup and punctuation do not hide a match, while differences in
//! wording or spacing still count.
//!
//! # Features
//!
//! - `csv` - CSV exports with a title column (enabled by default)
//! - `xml` - EndNote XML exports (enabled by default)
//! - `regex` / `lite` - regex backend (`regex` by default)
//! - `cli` - the `bibcompare` command-line tool
//!
//! # Basic Usage
//!
//! ```rust
//! use bibcompare::{Operation, Record, compare, dedupe::find_duplicates};
//!
//! let a: Vec<Record> = ["Machine Learning for Genomics", "Protein Folding"]
//!     .into_iter()
//!     .map(Record::from)
//!     .collect();
//! let b: Vec<Record> = ["<i>Machine learning</i> for genomics.", "Deep Learning Basics"]
//!     .into_iter()
//!     .map(Record::from)
//!     .collect();
//!
//! assert!(find_duplicates(&b).is_empty());
//!
//! let (new_titles, summary) = compare(&a, &b, Operation::DifferenceBMinusA);
//! assert_eq!(new_titles.len(), 1);
//! println!("{summary}");
//! ```
//!
//! # Loading Exports
//!
//! ```rust
//! use bibcompare::{CsvLoader, EndNoteXmlLoader, TitleLoader};
//!
//! let csv = CsvLoader::new().parse("TI,AU\nExample Paper,Smith J").unwrap();
//! assert_eq!(csv[0].title(), "Example Paper");
//! assert_eq!(csv[0].source(), Some("TI"));
//!
//! let xml = r#"<xml><records><record><titles>
//! <title><style face="normal">Example Paper</style></title>
//! </titles></record></records></xml>"#;
//! let endnote = EndNoteXmlLoader::new().parse(xml).unwrap();
//! assert_eq!(csv[0], endnote[0]);
//! ```
//!
//! For files on disk, [`loader::load_titles`] picks the format from the file
//! extension and degrades to an empty collection (with a logged error) when a
//! file cannot be read.
//!
//! # Error Handling
//!
//! Normalization and comparison are total. Parsing returns [`ParseError`]
//! with line information where available; file loading wraps it in
//! [`LoadError`].
//!
//! # Logging
//!
//! Diagnostics (duplicate titles, unreadable files, unknown operation
//! selectors) are emitted through [`tracing`]. The library never installs a
//! subscriber.

use std::path::Path;

#[cfg(feature = "csv")]
extern crate csv as csv_crate;

pub mod compare;
#[cfg(feature = "csv")]
pub mod csv;
pub mod dedupe;
#[cfg(feature = "xml")]
pub mod endnote_xml;
pub mod error;
pub mod loader;
pub mod normalize;
pub mod record;

// Reexports
pub use compare::{
    ComparisonSummary, Operation, SetComparison, compare, compare_with_selector, order_records,
};
#[cfg(feature = "csv")]
pub use csv::{CsvLoader, save_csv, write_titles};
pub use dedupe::{DuplicateGroup, find_duplicates};
#[cfg(feature = "xml")]
pub use endnote_xml::EndNoteXmlLoader;
#[cfg(feature = "csv")]
pub use error::ExportError;
pub use error::{CompareError, LoadError, ParseError, SourceSpan, ValueError};
pub use normalize::normalize;
pub use record::Record;

mod regex;

/// Collection file formats understood by the loaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionFormat {
    EndNoteXml,
    Csv,
    Unknown,
}

impl CollectionFormat {
    /// Convert the format to a string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionFormat::EndNoteXml => "EndNote XML",
            CollectionFormat::Csv => "CSV",
            CollectionFormat::Unknown => "Unknown",
        }
    }

    /// Pick the format from a file extension (`.csv` or `.xml`, any case).
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("csv") => CollectionFormat::Csv,
            Some("xml") => CollectionFormat::EndNoteXml,
            _ => CollectionFormat::Unknown,
        }
    }
}

impl std::fmt::Display for CollectionFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for title extractors.
pub trait TitleLoader {
    /// Extract one [`Record`] per title from the input, in input order.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the input is malformed
    fn parse(&self, input: &str) -> std::result::Result<Vec<Record>, ParseError>;
}

/// Detect the format of `content` and extract its titles.
///
/// Content starting with `<` is treated as EndNote XML; anything else as CSV
/// with delimiter auto-detection.
///
/// # Examples
///
/// ```
/// use bibcompare::{CollectionFormat, detect_and_parse};
///
/// let (records, format) = detect_and_parse("Title;Year\nExample Title;2023").unwrap();
/// assert_eq!(format, CollectionFormat::Csv);
/// assert_eq!(records[0].title(), "Example Title");
/// ```
pub fn detect_and_parse(content: &str) -> Result<(Vec<Record>, CollectionFormat), LoadError> {
    let trimmed = content.trim_start_matches('\u{feff}').trim();

    if trimmed.is_empty() {
        return Ok((Vec::new(), CollectionFormat::Unknown));
    }

    if trimmed.starts_with('<') {
        #[cfg(feature = "xml")]
        {
            let records = EndNoteXmlLoader::new().parse(content)?;
            return Ok((records, CollectionFormat::EndNoteXml));
        }
        #[cfg(not(feature = "xml"))]
        return Err(LoadError::UnknownFormat);
    }

    #[cfg(feature = "csv")]
    {
        let records = CsvLoader::with_auto_detection().parse(content)?;
        return Ok((records, CollectionFormat::Csv));
    }
    #[cfg(not(feature = "csv"))]
    return Err(LoadError::UnknownFormat);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("search.csv", CollectionFormat::Csv)]
    #[case("SEARCH.CSV", CollectionFormat::Csv)]
    #[case("dir/endnote.xml", CollectionFormat::EndNoteXml)]
    #[case("export.ris", CollectionFormat::Unknown)]
    #[case("no_extension", CollectionFormat::Unknown)]
    fn test_format_from_path(#[case] path: &str, #[case] expected: CollectionFormat) {
        assert_eq!(CollectionFormat::from_path(path), expected);
    }

    #[test]
    fn test_detect_and_parse_csv() {
        let (records, format) = detect_and_parse("Title,Year\nTest Title,2020").unwrap();
        assert_eq!(format, CollectionFormat::Csv);
        assert_eq!(records[0].title(), "Test Title");
    }

    #[test]
    fn test_detect_and_parse_endnote() {
        let content = r#"<?xml version="1.0" encoding="UTF-8"?>
<xml><records><record>
<titles><title><style face="normal" font="default" size="100%">Test Title</style></title></titles>
</record></records></xml>"#;

        let (records, format) = detect_and_parse(content).unwrap();
        assert_eq!(format, CollectionFormat::EndNoteXml);
        assert_eq!(records[0].title(), "Test Title");
    }

    #[test]
    fn test_detect_and_parse_empty() {
        let result = detect_and_parse("  \n");
        assert!(
            matches!(result, Ok((records, format)) if records.is_empty() && format == CollectionFormat::Unknown)
        );
    }

    #[test]
    fn test_detect_and_parse_csv_without_title_column() {
        let result = detect_and_parse("Author,Year\nSmith,2020");
        assert!(matches!(result, Err(LoadError::Parse(_))));
    }
}
