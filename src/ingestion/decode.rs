//! CSV decoding and row normalization.

use std::collections::BTreeMap;

use crate::error::IngestResult;

/// One normalized CSV data row.
///
/// Keys are trimmed header names, values are trimmed cell contents. A cell that is
/// absent because the row is shorter than the header normalizes to `""`, so every
/// header name is always present as a key. Unknown columns are carried along;
/// validation ignores them but they stay visible in failure payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number in the input; the header is line 1, so data starts at 2.
    pub line: usize,
    /// Column name to trimmed value.
    pub fields: BTreeMap<String, String>,
}

impl RawRow {
    /// Value for `column`, if the column existed in the header.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

/// Decode a CSV byte buffer into normalized rows.
///
/// - The bytes must be valid UTF-8; a leading byte-order-mark is stripped.
/// - The first line names the columns; values are paired with headers by position.
/// - Keys and values are whitespace-trimmed; short rows pad missing values with `""`.
///
/// Pure transformation over the whole buffer; the returned rows can be iterated
/// any number of times.
pub fn decode(bytes: &[u8]) -> IngestResult<Vec<RawRow>> {
    let text = std::str::from_utf8(bytes)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();

    let mut rows = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        let record = result?;
        let mut fields = BTreeMap::new();
        for (csv_idx, header) in headers.iter().enumerate() {
            let raw = record.get(csv_idx).unwrap_or("");
            fields.insert(header.clone(), raw.trim().to_owned());
        }
        // Report 1-based line numbers for users; +1 again because the header is line 1.
        rows.push(RawRow {
            line: row_idx0 + 2,
            fields,
        });
    }

    Ok(rows)
}
