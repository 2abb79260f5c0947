//! Single-column CSV export of result sets.

use crate::Record;
use crate::error::ExportError;
use csv_crate::{QuoteStyle, Terminator, WriterBuilder};
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

/// Header cell of exported files.
const TITLE_HEADER: &str = "Title";

/// Write `records` as a `Title` column, one row per record, using the raw
/// (unnormalized) title. Fields are quoted only when they need to be.
pub fn write_titles<'a, W, I>(writer: W, records: I) -> Result<(), ExportError>
where
    W: io::Write,
    I: IntoIterator<Item = &'a Record>,
{
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::CRLF)
        .from_writer(writer);

    writer.write_record([TITLE_HEADER])?;
    for record in records {
        writer.write_record([record.title()])?;
    }
    writer.flush().map_err(csv_crate::Error::from)?;
    Ok(())
}

/// Save `records` to `path`, appending `.csv` when the path does not already
/// end in that extension. Returns the path that was written.
///
/// # Errors
///
/// Returns [`ExportError::Io`] when the file cannot be created.
pub fn save_csv<'a, P, I>(path: P, records: I) -> Result<PathBuf, ExportError>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a Record>,
{
    let path = with_csv_extension(path.as_ref());
    let file = File::create(&path).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    write_titles(BufWriter::new(file), records)?;
    tracing::debug!(path = %path.display(), "saved result set");
    Ok(path)
}

fn with_csv_extension(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == "csv") {
        return path.to_path_buf();
    }
    let mut name = OsString::from(path.as_os_str());
    name.push(".csv");
    PathBuf::from(name)
}
