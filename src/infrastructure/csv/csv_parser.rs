// ============================================================
// CSV PARSER
// ============================================================
// Decode uploaded bytes and parse CSV content into a typed table

use std::collections::HashSet;

use csv::{ReaderBuilder, StringRecord};
use encoding_rs::{Encoding, UTF_8};

use crate::domain::csv::Table;
use crate::domain::error::AppError;

/// CSV parser: header row first, comma delimited, UTF-8 only
#[derive(Debug, Clone)]
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode raw upload bytes and parse them
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Table, AppError> {
        let content = decode_utf8(bytes)?;
        self.parse_content(content)
    }

    /// Parse CSV content from string
    pub fn parse_content(&self, content: &str) -> Result<Table, AppError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true) // Short rows are padded, long rows rejected below
            .from_reader(content.as_bytes());

        let mut records = reader
            .records()
            .filter(|result| !matches!(result, Ok(record) if is_blank(record)));

        let header_record = match records.next() {
            Some(result) => result.map_err(tokenizing_error)?,
            None => {
                return Err(AppError::ParseError(
                    "No columns to parse from file".to_string(),
                ))
            }
        };
        let headers = normalize_headers(&header_record);
        let expected = headers.len();

        let mut rows = Vec::new();
        for result in records {
            let record = result.map_err(tokenizing_error)?;
            if record.len() > expected {
                let line = record
                    .position()
                    .map(|pos| pos.line())
                    .unwrap_or(rows.len() as u64 + 2);
                return Err(AppError::ParseError(format!(
                    "Error tokenizing data. Expected {} fields in line {}, saw {}",
                    expected,
                    line,
                    record.len()
                )));
            }
            rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }

        Ok(Table::from_records(headers, &rows))
    }
}

/// Strict UTF-8 decoding. A leading UTF-8 BOM is dropped; any other BOM is rejected.
pub fn decode_utf8(bytes: &[u8]) -> Result<&str, AppError> {
    let body = match Encoding::for_bom(bytes) {
        Some((encoding, bom_length)) if encoding == UTF_8 => &bytes[bom_length..],
        Some((encoding, _)) => {
            return Err(AppError::DecodeError(format!(
                "expected UTF-8 text, found a {} byte-order mark",
                encoding.name()
            )))
        }
        None => bytes,
    };

    std::str::from_utf8(body).map_err(|err| {
        let position = err.valid_up_to();
        match err.error_len() {
            Some(_) => AppError::DecodeError(format!(
                "'utf-8' codec can't decode byte 0x{:02x} in position {}: invalid byte sequence",
                body[position], position
            )),
            None => AppError::DecodeError(format!(
                "'utf-8' codec can't decode bytes in position {}: unexpected end of data",
                position
            )),
        }
    })
}

fn is_blank(record: &StringRecord) -> bool {
    record.len() == 1 && record.get(0).map_or(true, |field| field.trim().is_empty())
}

fn tokenizing_error(err: csv::Error) -> AppError {
    AppError::ParseError(format!("Error tokenizing data. {}", err))
}

/// Empty header names become `Unnamed: <index>`; repeated names get `.1`, `.2`, ...
fn normalize_headers(record: &StringRecord) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut headers = Vec::with_capacity(record.len());

    for (idx, raw) in record.iter().enumerate() {
        let base = if raw.is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            raw.to_string()
        };

        let mut name = base.clone();
        let mut suffix = 0;
        while seen.contains(&name) {
            suffix += 1;
            name = format!("{}.{}", base, suffix);
        }
        seen.insert(name.clone());
        headers.push(name);
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::csv::{Cell, ColumnType};

    #[test]
    fn test_parse_simple_csv() {
        let content = "Name,Absences,Deliverables\nAlice,2,6\nBob,0,3";
        let table = CsvParser::new().parse_content(content).unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.headers(), vec!["Name", "Absences", "Deliverables"]);
        assert_eq!(table.cell(0, "Name"), Some(&Cell::Text("Alice".to_string())));
        assert_eq!(table.cell(1, "Deliverables"), Some(&Cell::Integer(3)));
        assert_eq!(
            table.column("Absences").unwrap().column_type,
            ColumnType::Integer
        );
    }

    #[test]
    fn test_header_only() {
        let table = CsvParser::new().parse_content("Name,Absences\n").unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_empty_input_has_no_columns() {
        let err = CsvParser::new().parse_bytes(b"").unwrap_err();
        assert_eq!(
            err,
            AppError::ParseError("No columns to parse from file".to_string())
        );
    }

    #[test]
    fn test_too_many_fields_is_rejected() {
        let err = CsvParser::new()
            .parse_content("a,b\n1,2\n3,4,5\n")
            .unwrap_err();
        assert_eq!(
            err,
            AppError::ParseError(
                "Error tokenizing data. Expected 2 fields in line 3, saw 3".to_string()
            )
        );
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = CsvParser::new().parse_content("a,b\n1\n").unwrap();
        assert_eq!(table.cell(0, "b"), Some(&Cell::Empty));
    }

    #[test]
    fn test_whitespace_only_lines_are_skipped() {
        let table = CsvParser::new()
            .parse_content("Name,Absences\nAlice,2\n   \n\t\nBob,0\n")
            .unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(1, "Name"), Some(&Cell::Text("Bob".to_string())));
    }

    #[test]
    fn test_quoted_fields() {
        let table = CsvParser::new()
            .parse_content("Name,Note\n\"Doe, Jane\",\"said \"\"hi\"\"\"\n")
            .unwrap();
        assert_eq!(table.cell(0, "Name"), Some(&Cell::Text("Doe, Jane".to_string())));
        assert_eq!(table.cell(0, "Note"), Some(&Cell::Text("said \"hi\"".to_string())));
    }

    #[test]
    fn test_header_normalization() {
        let table = CsvParser::new().parse_content("A,,A,A\n1,2,3,4\n").unwrap();
        assert_eq!(table.headers(), vec!["A", "Unnamed: 1", "A.1", "A.2"]);
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let table = CsvParser::new()
            .parse_bytes(b"\xEF\xBB\xBFAbsences,Deliverables\n1,2\n")
            .unwrap();
        assert_eq!(table.headers(), vec!["Absences", "Deliverables"]);
    }

    #[test]
    fn test_invalid_utf8_is_a_decode_error() {
        let err = CsvParser::new().parse_bytes(b"Name\n\xff\xfe\xfd").unwrap_err();
        assert!(matches!(err, AppError::DecodeError(_)));
        assert!(err.to_string().contains("0xff in position 5"));
    }

    #[test]
    fn test_utf16_bom_is_rejected() {
        let err = decode_utf8(b"\xFF\xFEN\x00").unwrap_err();
        assert!(matches!(err, AppError::DecodeError(_)));
    }
}
