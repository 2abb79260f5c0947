//! CSV title-column configuration.
//!
//! Database exports name their title column differently; the defaults cover
//! Embase, ProQuest, PubMed, Web of Science and PsycInfo exports.

/// Default title column names, highest priority first.
pub(crate) const DEFAULT_TITLE_COLUMNS: &[&str] = &["title", "Title", "TI", "Article Title"];

/// Configuration for reading titles from CSV.
///
/// The title column is the first configured name, in priority order, that
/// appears in the header row. Names are matched exactly (case-sensitive).
///
/// # Examples
///
/// ```
/// use bibcompare::csv::CsvConfig;
///
/// let mut config = CsvConfig::new();
/// config
///     .add_title_columns(vec!["Document Title".to_string()])
///     .set_delimiter(b';');
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Candidate title column names, highest priority first
    pub(crate) title_columns: Vec<String>,
    /// Delimiter to use for parsing the CSV
    pub(crate) delimiter: u8,
    /// Quote character
    pub(crate) quote: u8,
    /// Whether to trim whitespace around fields and headers
    pub(crate) trim: bool,
    /// Allow rows with a different number of fields than the header
    pub(crate) flexible: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvConfig {
    /// Creates a new CSV configuration with default settings.
    ///
    /// Titles are kept verbatim (no trimming) and ragged rows are accepted.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title_columns: DEFAULT_TITLE_COLUMNS.iter().map(|s| s.to_string()).collect(),
            delimiter: b',',
            quote: b'"',
            trim: false,
            flexible: true,
        }
    }

    /// Replace the candidate title column names.
    pub fn set_title_columns(&mut self, columns: Vec<String>) -> &mut Self {
        self.title_columns = columns;
        self
    }

    /// Append lower-priority candidate title column names.
    pub fn add_title_columns(&mut self, columns: Vec<String>) -> &mut Self {
        self.title_columns.extend(columns);
        self
    }

    pub fn set_delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    pub fn set_quote(&mut self, quote: u8) -> &mut Self {
        self.quote = quote;
        self
    }

    pub fn set_trim(&mut self, trim: bool) -> &mut Self {
        self.trim = trim;
        self
    }

    pub fn set_flexible(&mut self, flexible: bool) -> &mut Self {
        self.flexible = flexible;
        self
    }

    pub fn title_columns(&self) -> &[String] {
        &self.title_columns
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Index and name of the title column within `headers`, if any.
    pub(crate) fn find_title_column<'h>(&self, headers: &'h [String]) -> Option<(usize, &'h str)> {
        self.title_columns.iter().find_map(|wanted| {
            headers
                .iter()
                .position(|header| header == wanted)
                .map(|i| (i, headers[i].as_str()))
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.title_columns.is_empty() {
            return Err("No title columns defined".to_string());
        }
        if self.title_columns.iter().any(|c| c.is_empty()) {
            return Err("Empty title column name".to_string());
        }
        if self.delimiter == b'\n' || self.delimiter == b'\r' {
            return Err("Delimiter cannot be a newline character".to_string());
        }
        if self.delimiter == self.quote {
            return Err("Delimiter and quote character must differ".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_config_new() {
        let config = CsvConfig::new();
        assert_eq!(config.delimiter, b',');
        assert!(!config.trim);
        assert!(config.flexible);
        assert_eq!(config.title_columns(), ["title", "Title", "TI", "Article Title"]);
    }

    #[test]
    fn test_title_column_priority_beats_position() {
        let config = CsvConfig::new();
        // "Title" is listed before "TI" in the defaults, so it wins even
        // though "TI" comes first in the file.
        let hs = headers(&["TI", "AU", "Title"]);
        let found = config.find_title_column(&hs);
        assert_eq!(found, Some((2, "Title")));
    }

    #[test]
    fn test_title_column_is_case_sensitive() {
        let config = CsvConfig::new();
        assert_eq!(config.find_title_column(&headers(&["TITLE", "ti"])), None);
        assert_eq!(
            config.find_title_column(&headers(&["Authors", "Article Title"])),
            Some((1, "Article Title"))
        );
    }

    #[test]
    fn test_add_title_columns() {
        let mut config = CsvConfig::new();
        config.add_title_columns(vec!["Document Title".to_string()]);

        assert_eq!(
            config.find_title_column(&headers(&["Document Title"])),
            Some((0, "Document Title"))
        );
        // Defaults keep priority.
        assert_eq!(
            config.find_title_column(&headers(&["Document Title", "TI"])),
            Some((1, "TI"))
        );
    }

    #[test]
    fn test_validate() {
        assert!(CsvConfig::new().validate().is_ok());

        let mut config = CsvConfig::new();
        config.set_title_columns(Vec::new());
        assert!(config.validate().is_err());

        let mut config = CsvConfig::new();
        config.set_title_columns(vec![String::new()]);
        assert!(config.validate().is_err());

        let mut config = CsvConfig::new();
        config.set_delimiter(b'\n');
        assert!(config.validate().is_err());

        let mut config = CsvConfig::new();
        config.set_delimiter(b'"');
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_configuration_chaining() {
        let mut config = CsvConfig::new();
        config
            .set_delimiter(b';')
            .set_quote(b'\'')
            .set_trim(true)
            .set_flexible(false);

        assert_eq!(config.delimiter(), b';');
        assert_eq!(config.quote, b'\'');
        assert!(config.trim);
        assert!(!config.flexible);
    }
}
