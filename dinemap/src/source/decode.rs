use std::collections::HashMap;

use crate::error::{DirectoryError, Result};

/// One decoded CSV row. Every value is a raw string; a column missing from
/// the row (or from the header) is absent.
///
/// Keys are stored normalized (see [`normalize_header`]) so lookups tolerate
/// `Restaurant ID` / `RestaurantID` / `restaurant_id` drift between
/// schema revisions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: &str, value: impl Into<String>) {
        self.fields.insert(normalize_header(column), value.into());
    }

    pub fn with(mut self, column: &str, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(&normalize_header(column)).map(|v| v.as_str())
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.fields.contains_key(&normalize_header(column))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (column, value) in iter {
            row.insert(column.as_ref(), value);
        }
        row
    }
}

/// Lowercase and drop whitespace, `_` and `-`.
pub fn normalize_header(column: &str) -> String {
    column
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Decode CSV bytes into raw rows keyed by the header row.
///
/// Short records leave trailing columns absent, extra cells are ignored and
/// blank lines are skipped. A cell that is not valid UTF-8 is left absent
/// so only that field degrades; the rest of the row is kept.
pub fn decode_rows(bytes: &[u8]) -> Result<Vec<RawRow>> {
    let bytes = strip_bom(bytes);

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(DirectoryError::Parse("Empty CSV file".to_string()));
    }

    let delimiter = detect_delimiter(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| DirectoryError::Parse(format!("Failed to read CSV headers: {e}")))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect::<Vec<_>>();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(DirectoryError::Parse("CSV has no headers".to_string()));
    }

    let mut rows = Vec::new();
    let mut record = csv::ByteRecord::new();
    let mut line = 0usize;
    loop {
        line += 1;
        match reader.read_byte_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                tracing::warn!("Stopped reading CSV at record {}: {}", line, e);
                break;
            }
        }

        if record
            .iter()
            .all(|field| field.iter().all(u8::is_ascii_whitespace))
        {
            continue;
        }

        let mut row = RawRow::new();
        for (header, field) in headers.iter().zip(record.iter()) {
            if header.is_empty() {
                continue;
            }
            match std::str::from_utf8(field) {
                Ok(value) => row.insert(header, value),
                Err(e) => {
                    tracing::warn!(
                        "Dropping column '{}' of CSV record {}: {}",
                        header,
                        line,
                        e
                    );
                }
            }
        }
        rows.push(row);
    }

    tracing::debug!(
        "Decoded {} CSV rows across {} columns (delimiter {:?})",
        rows.len(),
        headers.len(),
        delimiter as char
    );

    Ok(rows)
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// Comma unless semicolons or tabs split the header and the first rows into
/// a wider, consistent grid.
fn detect_delimiter(bytes: &[u8]) -> u8 {
    [b',', b';', b'\t']
        .into_iter()
        .map(|delimiter| (delimiter, grid_score(bytes, delimiter)))
        .fold((b',', 0), |best, candidate| {
            if candidate.1 > best.1 {
                candidate
            } else {
                best
            }
        })
        .0
}

/// Zero for a single column. Otherwise the column count, boosted when the
/// header and the next few records all agree on it.
fn grid_score(bytes: &[u8], delimiter: u8) -> usize {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let widths: Vec<usize> = reader
        .byte_records()
        .take(6)
        .map_while(|record| record.ok())
        .map(|record| record.len())
        .collect();

    match widths.first() {
        Some(&width) if width > 1 => {
            if widths.iter().all(|&w| w == width) {
                width * 10
            } else {
                width
            }
        }
        _ => 0,
    }
}
