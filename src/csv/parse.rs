//! CSV title extraction.

use crate::csv::config::CsvConfig;
use crate::error::{ParseError, SourceSpan, ValueError};
use crate::{CollectionFormat, Record};
use csv_crate::ReaderBuilder;

/// Read the title column of a CSV document, one [`Record`] per data row.
///
/// Rows that are too short to reach the title column produce a record with an
/// empty title, so the collection keeps one entry per row.
pub(crate) fn csv_parse(text: &str, config: &CsvConfig) -> Result<Vec<Record>, ParseError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    config.validate().map_err(|msg| {
        ParseError::without_position(CollectionFormat::Csv, ValueError::Config(msg))
    })?;

    let mut reader = ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .quote(config.quote)
        .trim(if config.trim {
            csv_crate::Trim::All
        } else {
            csv_crate::Trim::None
        })
        .flexible(config.flexible)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| {
            ParseError::at_line(
                1,
                CollectionFormat::Csv,
                ValueError::Syntax(format!("Header parsing error: {}", e)),
            )
        })?
        .iter()
        .map(String::from)
        .collect();

    let (title_index, title_header) = config.find_title_column(&headers).ok_or_else(|| {
        ParseError::at_line(
            1,
            CollectionFormat::Csv,
            ValueError::MissingTitleColumn {
                expected: config.title_columns.clone(),
            },
        )
        .with_span(SourceSpan::new(0, text.find('\n').unwrap_or(text.len())))
    })?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(ParseError::from)?;
        let title = row.get(title_index).unwrap_or_default();
        records.push(Record::new(title, Some(title_header)));
    }

    Ok(records)
}

/// Detect the CSV delimiter by looking for the candidate that splits the
/// first lines into a consistent, largest number of fields.
pub(crate) fn detect_csv_delimiter(content: &str) -> u8 {
    let delimiters = [b',', b';', b'\t', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(5).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delimiter in &delimiters {
        let mut score = 0;
        let mut consistent = true;
        let mut expected_fields = None;

        for line in &sample_lines {
            let field_count = line.split(delimiter as char).count();

            if let Some(expected) = expected_fields {
                if field_count != expected {
                    consistent = false;
                    break;
                }
            } else {
                expected_fields = Some(field_count);
            }

            score += field_count;
        }

        if consistent && score > best_score {
            best_score = score;
            best_delimiter = delimiter;
        }
    }

    best_delimiter
}
