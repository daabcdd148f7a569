//! Shared TSV utilities for loading schema files.
//!
//! Every showcase schema file is tab-separated with a header row. Rows
//! are loaded as header→value maps; cell values are kept verbatim since
//! meanings and titles flow straight into rendered output.

use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{Result, SchemaError};

/// Read a TSV file into a vector of row maps keyed by column header.
///
/// Handles BOM characters on the header row. Short rows are padded with
/// empty strings; extra cells beyond the header are dropped.
pub fn read_tsv_rows(path: &Path) -> Result<Vec<BTreeMap<String, String>>> {
    let bytes = std::fs::read(path).map_err(|e| SchemaError::io(path, e))?;
    parse_tsv(path, &bytes)
}

/// Read a TSV file stored in ISO-8859-1 (the encoding value tables).
///
/// Latin-1 maps bytes 0x00-0xFF directly onto U+0000-U+00FF, so the
/// decode is a plain per-byte widening.
pub fn read_tsv_rows_latin1(path: &Path) -> Result<Vec<BTreeMap<String, String>>> {
    let bytes = std::fs::read(path).map_err(|e| SchemaError::io(path, e))?;
    let decoded: String = bytes.iter().map(|&b| char::from(b)).collect();
    parse_tsv(path, decoded.as_bytes())
}

fn parse_tsv(path: &Path, bytes: &[u8]) -> Result<Vec<BTreeMap<String, String>>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| SchemaError::Tsv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .iter()
        .map(|h| h.trim_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| SchemaError::Tsv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut row = BTreeMap::new();
        for (idx, header) in headers.iter().enumerate() {
            let value = record.get(idx).unwrap_or("");
            row.insert(header.clone(), value.to_string());
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Fetch a required column from a row map, erroring with the source path
/// when the column is absent.
pub fn require_column<'a>(
    row: &'a BTreeMap<String, String>,
    path: &Path,
    column: &str,
) -> Result<&'a str> {
    row.get(column)
        .map(String::as_str)
        .ok_or_else(|| SchemaError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).expect("create fixture");
        file.write_all(contents).expect("write fixture");
        path
    }

    #[test]
    fn reads_rows_by_header() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_file(
            dir.path(),
            "sample.txt",
            b"encoding_id\ttitle\n100\tYes/No\n200\tUnits\n",
        );
        let rows = read_tsv_rows(&path).expect("read rows");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["encoding_id"], "100");
        assert_eq!(rows[1]["title"], "Units");
    }

    #[test]
    fn pads_short_rows() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_file(dir.path(), "short.txt", b"a\tb\tc\n1\t2\n");
        let rows = read_tsv_rows(&path).expect("read rows");
        assert_eq!(rows[0]["c"], "");
    }

    #[test]
    fn latin1_bytes_decode() {
        let dir = tempfile::tempdir().expect("tempdir");
        // 0xB5 is MICRO SIGN in ISO-8859-1
        let path = write_file(
            dir.path(),
            "latin1.txt",
            b"value\tmeaning\n1\t\xB5mol/L\n",
        );
        let rows = read_tsv_rows_latin1(&path).expect("read rows");
        assert_eq!(rows[0]["meaning"], "\u{b5}mol/L");
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = read_tsv_rows(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, SchemaError::Io { .. }));
    }

    #[test]
    fn missing_column_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_file(dir.path(), "cols.txt", b"a\n1\n");
        let rows = read_tsv_rows(&path).expect("read rows");
        let err = require_column(&rows[0], &path, "b").unwrap_err();
        assert!(matches!(err, SchemaError::MissingColumn { .. }));
    }
}
