//! Loading title collections from files.
//!
//! The format is chosen by file extension. [`load_collection`] reports every
//! failure; [`load_titles`] logs it and carries on with an empty collection so
//! that one unreadable export does not abort a comparison.

use crate::compare::order_records;
use crate::dedupe::find_duplicates;
use crate::error::LoadError;
use crate::{CollectionFormat, Record, TitleLoader};
use std::path::Path;
use tracing::{debug, error, warn};

const CSV_HELP: &str = "Error reading csv file, please ensure it is exported from one of the \
    following databases: Embase, ProQuest, PubMed, Web of Science, or PsycInfo";
const XML_HELP: &str =
    "Error reading EndNote xml file, please ensure it is exported from EndNote";

/// Read a file as UTF-8 text, dropping a leading byte order mark.
///
/// Invalid UTF-8 is decoded lossily and logged rather than rejected.
pub fn read_source(path: &Path) -> Result<String, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err.utf8_error(),
                "file is not valid UTF-8, undecodable bytes are replaced"
            );
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    };

    Ok(match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

/// Load every title of the collection at `path`, in file order.
///
/// # Errors
///
/// Returns [`LoadError::UnsupportedExtension`] for anything but `.csv` and
/// `.xml`, [`LoadError::Io`] when the file cannot be read, and
/// [`LoadError::Parse`] when its content is malformed.
pub fn load_collection(path: impl AsRef<Path>) -> Result<Vec<Record>, LoadError> {
    let path = path.as_ref();
    let format = CollectionFormat::from_path(path);
    let unsupported = || LoadError::UnsupportedExtension {
        path: path.to_path_buf(),
    };

    let records = match format {
        #[cfg(feature = "csv")]
        CollectionFormat::Csv => crate::csv::CsvLoader::new().parse(&read_source(path)?)?,
        #[cfg(feature = "xml")]
        CollectionFormat::EndNoteXml => {
            crate::endnote_xml::EndNoteXmlLoader::new().parse(&read_source(path)?)?
        }
        _ => return Err(unsupported()),
    };

    debug!(path = %path.display(), %format, count = records.len(), "loaded collection");
    Ok(records)
}

/// Load a collection, logging instead of failing.
///
/// Any error is logged with a hint about the supported exports and yields an
/// empty collection. Titles that occur more than once are logged as warnings.
pub fn load_titles(path: impl AsRef<Path>) -> Vec<Record> {
    let path = path.as_ref();
    match load_collection(path) {
        Ok(records) => {
            let duplicates = find_duplicates(&records);
            for duplicate in order_records(&duplicates) {
                warn!(path = %path.display(), "Duplicate Title found: {}", duplicate.title());
            }
            records
        }
        Err(err) => {
            match CollectionFormat::from_path(path) {
                CollectionFormat::Csv => error!(path = %path.display(), error = %err, "{CSV_HELP}"),
                CollectionFormat::EndNoteXml => {
                    error!(path = %path.display(), error = %err, "{XML_HELP}")
                }
                CollectionFormat::Unknown => error!("{err}"),
            }
            Vec::new()
        }
    }
}

/// Load the two collections to compare.
///
/// Both paths must have a supported extension; beyond that, loading is as
/// lenient as [`load_titles`].
///
/// # Errors
///
/// Returns [`LoadError::UnsupportedExtension`] for the first path whose
/// extension is neither `.csv` nor `.xml`.
pub fn load_pair(
    a: impl AsRef<Path>,
    b: impl AsRef<Path>,
) -> Result<(Vec<Record>, Vec<Record>), LoadError> {
    let (a, b) = (a.as_ref(), b.as_ref());
    for path in [a, b] {
        if CollectionFormat::from_path(path) == CollectionFormat::Unknown {
            return Err(LoadError::UnsupportedExtension {
                path: path.to_path_buf(),
            });
        }
    }
    Ok((load_titles(a), load_titles(b)))
}
