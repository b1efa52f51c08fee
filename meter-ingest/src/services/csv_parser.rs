//! CSV parsing into untyped rows
//!
//! The header row names the fields. Each data record becomes a [`RawRow`]
//! holding exactly the fields present on that line:
//! - values past the last named column, and columns whose header repeats an
//!   earlier one, are kept as `Field<n>` (1-based column) so rows with extra
//!   data are visibly malformed
//! - a blank column (both header and value empty, e.g. a trailing comma) is
//!   ignored
//! - short records simply carry fewer fields
//!
//! Values are passed through untouched; trimming and interpretation are the
//! validator's job.

use async_trait::async_trait;
use csv::StringRecord;
use meter_common::{Error, Result};
use std::path::Path;
use tracing::debug;

use crate::models::RawRow;
use crate::types::CsvParser;

/// [`CsvParser`] reading files from the local file system
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvFileParser;

#[async_trait]
impl CsvParser for CsvFileParser {
    async fn parse(&self, path: &Path) -> Result<Vec<RawRow>> {
        if path.as_os_str().is_empty() {
            return Err(Error::InvalidInput("file path must not be empty".to_string()));
        }

        if !tokio::fs::try_exists(path).await? {
            return Err(Error::NotFound(format!("{} not found", path.display())));
        }

        let bytes = tokio::fs::read(path).await?;
        let rows = parse_csv(&bytes)?;

        debug!(path = %path.display(), rows = rows.len(), "Parsed CSV upload");
        Ok(rows)
    }
}

/// Parse CSV text (header row first) into raw rows
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(to_raw_row(&headers, &record?));
    }
    Ok(rows)
}

fn to_raw_row(headers: &StringRecord, record: &StringRecord) -> RawRow {
    let mut row = RawRow::new();
    for (index, value) in record.iter().enumerate() {
        let header = headers.get(index).map(str::trim).unwrap_or_default();
        if !header.is_empty() && !row.contains(header) {
            row.insert(header, value);
        } else if !header.is_empty() || !value.trim().is_empty() {
            // Repeated header or unnamed value: keep the column under its position
            row.insert(format!("Field{}", index + 1), value);
        }
    }
    row
}
