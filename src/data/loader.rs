use std::collections::BTreeSet;
use std::path::Path;

use thiserror::Error;

use super::model::{Column, ColumnTable};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons a file could not be turned into a [`ColumnTable`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("file is empty")]
    EmptyFile,
    #[error("file has no usable header row")]
    NoHeader,
    #[error("no column contains numeric values")]
    NoNumericColumns,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a delimited text file into a [`ColumnTable`].
///
/// Layout: one header row with column names, then one row per sample.
/// Cells that do not parse as `f64` are skipped, so a column only keeps
/// its numeric samples. Columns left without any sample (e.g. a textual
/// timestamp column) are dropped.
pub fn load_file(path: &Path) -> Result<ColumnTable, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_bytes(&bytes)
}

/// Parse CSV text into a [`ColumnTable`]. See [`load_file`].
pub fn parse_table(text: &str) -> Result<ColumnTable, LoadError> {
    parse_bytes(text.as_bytes())
}

/// Parse raw file contents. Invalid UTF-8 only affects the cell it sits in:
/// such a cell is skipped, and a header is decoded lossily.
pub fn parse_bytes(bytes: &[u8]) -> Result<ColumnTable, LoadError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(LoadError::EmptyFile);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let raw_headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();
    if raw_headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::NoHeader);
    }
    let headers = unique_names(&raw_headers);

    let mut values: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
    let mut skipped = 0usize;

    for result in reader.byte_records() {
        let record = result?;
        for (col_idx, cell) in record.iter().enumerate().take(headers.len()) {
            match std::str::from_utf8(cell).ok().and_then(parse_cell) {
                Some(v) => values[col_idx].push(v),
                None => skipped += 1,
            }
        }
    }

    let columns: Vec<Column> = headers
        .into_iter()
        .zip(values)
        .map(|(name, vals)| Column::new(name, vals))
        .collect();
    let dropped: Vec<&str> = columns
        .iter()
        .filter(|c| c.is_empty())
        .map(|c| c.name.as_str())
        .collect();
    if !dropped.is_empty() {
        log::debug!("Dropping non-numeric columns {dropped:?}");
    }
    log::debug!("Skipped {skipped} non-numeric cells");

    let table = ColumnTable::from_columns(columns);
    if table.is_empty() {
        return Err(LoadError::NoNumericColumns);
    }
    Ok(table)
}

fn parse_cell(cell: &str) -> Option<f64> {
    if cell.is_empty() {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Make header names unique: blanks become `column N`, repeats get a ` (k)` suffix.
fn unique_names(raw: &[String]) -> Vec<String> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    raw.iter()
        .enumerate()
        .map(|(i, name)| {
            let base = if name.is_empty() {
                format!("column {}", i + 1)
            } else {
                name.clone()
            };
            let mut candidate = base.clone();
            let mut k = 2;
            while seen.contains(&candidate) {
                candidate = format!("{base} ({k})");
                k += 1;
            }
            if candidate != base {
                log::warn!("Duplicate column name '{base}' renamed to '{candidate}'");
            }
            seen.insert(candidate.clone());
            candidate
        })
        .collect()
}
