//! Error types for loading, comparing and exporting title collections.
//!
//! Parsing failures carry line/column positions and the format being read.
//! Loader and exporter errors wrap them together with I/O context.

use crate::CollectionFormat;
use std::path::PathBuf;
use thiserror::Error;

/// A byte-offset span into the original source text.
///
/// Both `start` and `end` are byte offsets (not character indices) from the
/// beginning of the source string.  `start` is inclusive, `end` is exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSpan {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl SourceSpan {
    /// Create a new `SourceSpan`.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Error loading a collection from a file or a string.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Unable to detect collection format from input")]
    UnknownFormat,

    #[error("{} has an unsupported file extension, must be .xml or .csv", .path.display())]
    UnsupportedExtension { path: PathBuf },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Error selecting a set operation.
#[derive(Error, Debug)]
pub enum CompareError {
    #[error("Unknown set operation \"{0}\"")]
    UnknownOperation(String),
}

/// Error writing a result set.
#[cfg(feature = "csv")]
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Parse error with detailed location and context information.
#[derive(Error, Debug)]
#[error("Error in {format} format{}: {error}",
    match (line, column) {
        (Some(l), Some(c)) => format!(" at line {} column {}", l, c),
        (Some(l), None) => format!(" at line {}", l),
        (None, Some(c)) => format!(" at column {}", c),
        (None, None) => String::new(),
    }
)]
pub struct ParseError {
    /// Line number where the error occurred (1-based, None if not available)
    pub line: Option<usize>,
    /// Column number where the error occurred (1-based, None if not available)
    pub column: Option<usize>,
    /// Byte-offset span into the source text.
    pub span: Option<SourceSpan>,
    /// The collection format being parsed
    pub format: CollectionFormat,
    /// The specific error that occurred
    pub error: ValueError,
}

impl ParseError {
    pub fn new(
        line: Option<usize>,
        column: Option<usize>,
        format: CollectionFormat,
        error: ValueError,
    ) -> Self {
        Self {
            line,
            column,
            span: None,
            format,
            error,
        }
    }

    /// Attach a byte-offset span to this error, returning `self` (builder style).
    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = Some(span);
        self
    }

    pub fn at_line(line: usize, format: CollectionFormat, error: ValueError) -> Self {
        Self::new(Some(line), None, format, error)
    }

    pub fn at_position(
        line: usize,
        column: usize,
        format: CollectionFormat,
        error: ValueError,
    ) -> Self {
        Self::new(Some(line), Some(column), format, error)
    }

    pub fn without_position(format: CollectionFormat, error: ValueError) -> Self {
        Self::new(None, None, format, error)
    }
}

/// Value-level errors that can occur while extracting titles.
#[derive(Error, Debug)]
pub enum ValueError {
    #[error("Bad syntax: {0}")]
    Syntax(String),

    #[error("No title column found, expected one of: {}", .expected.join(", "))]
    MissingTitleColumn { expected: Vec<String> },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

#[cfg(feature = "csv")]
impl From<csv::Error> for ParseError {
    fn from(err: csv::Error) -> Self {
        let (line, column) = if let Some(position) = err.position() {
            (
                Some(position.line() as usize),
                Some(position.byte() as usize),
            )
        } else {
            (None, None)
        };

        ParseError::new(
            line,
            column,
            CollectionFormat::Csv,
            ValueError::Syntax(err.to_string()),
        )
    }
}

#[cfg(feature = "xml")]
impl From<quick_xml::Error> for ParseError {
    fn from(err: quick_xml::Error) -> Self {
        ParseError::without_position(
            CollectionFormat::EndNoteXml,
            ValueError::Syntax(err.to_string()),
        )
    }
}
