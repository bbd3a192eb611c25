//! CSV import and export.
//!
//! Import files need a `Keyword` column and may carry a `Tags` column of
//! comma-separated labels. Exports always use the `Keyword,Tags` layout with
//! tags joined by `", "`.

use std::io::{Read, Write};

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::tags::parse_tags;

pub const KEYWORD_COLUMN: &str = "Keyword";
pub const TAGS_COLUMN: &str = "Tags";

/// One usable row of an import file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    pub keyword: String,
    pub tags: Vec<String>,
}

/// Reads every row of an import file.
///
/// Rows with a blank keyword are skipped. A missing or empty `Tags` cell is an
/// empty tag list. The first malformed record aborts the read.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<ImportRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|source| Error::Import { row: 1, source })?
        .clone();
    // An empty export has no header at all.
    if headers.is_empty() {
        log::debug!("Import file is empty");
        return Ok(Vec::new());
    }

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
    };

    let keyword_col = column(KEYWORD_COLUMN).ok_or(Error::MissingColumn(KEYWORD_COLUMN))?;
    let tags_col = column(TAGS_COLUMN);

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        // Header is row 1.
        let record = record.map_err(|source| Error::Import { row: i + 2, source })?;

        let keyword = record.get(keyword_col).unwrap_or_default().trim();
        if keyword.is_empty() {
            continue;
        }

        let tags = tags_col
            .and_then(|col| record.get(col))
            .map(parse_tags)
            .unwrap_or_default();

        rows.push(ImportRow {
            keyword: keyword.to_string(),
            tags,
        });
    }

    log::debug!("Read {} import rows", rows.len());
    Ok(rows)
}

/// Writes entries as CSV. Nothing is written for an empty slice.
pub fn write_entries<W: Write>(writer: W, entries: &[Entry]) -> Result<()> {
    if entries.is_empty() {
        return Ok(());
    }

    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record([KEYWORD_COLUMN, TAGS_COLUMN])?;
    for entry in entries {
        writer.write_record([entry.keyword.as_str(), entry.joined_tags().as_str()])?;
    }
    writer.flush()?;
    Ok(())
}
