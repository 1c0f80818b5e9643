// ============================================================
// CSV WRITER
// ============================================================
// Serialize a table back to BOM-prefixed CSV bytes

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::domain::csv::{Table, UTF8_BOM};
use crate::domain::error::AppError;

/// CSV writer: header row, minimal quoting, `\n` after every record
#[derive(Debug, Clone)]
pub struct CsvWriter {
    delimiter: u8,
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the table as UTF-8 CSV preceded by a byte-order mark, so
    /// spreadsheet applications detect the encoding.
    pub fn write(&self, table: &Table) -> Result<Vec<u8>, AppError> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(UTF8_BOM.to_vec());

        writer.write_record(table.headers()).map_err(serialize_error)?;

        for cells in (0..table.row_count()).filter_map(|row| table.row(row)) {
            let rendered = cells.into_iter().map(|cell| cell.render());
            writer.write_record(rendered).map_err(serialize_error)?;
        }

        writer
            .into_inner()
            .map_err(|err| AppError::SerializeError(format!("Failed to flush CSV: {}", err)))
    }
}

fn serialize_error(err: csv::Error) -> AppError {
    AppError::SerializeError(format!("Failed to write CSV: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::csv::CsvParser;

    fn write(content: &str) -> Vec<u8> {
        let table = CsvParser::new().parse_content(content).unwrap();
        CsvWriter::new().write(&table).unwrap()
    }

    #[test]
    fn test_output_starts_with_bom() {
        let bytes = write("a,b\n1,2\n");
        assert!(bytes.starts_with(UTF8_BOM));
        assert_eq!(&bytes[3..], b"a,b\n1,2\n");
    }

    #[test]
    fn test_header_only_table() {
        assert_eq!(&write("Name,Absences\n")[3..], b"Name,Absences\n");
    }

    #[test]
    fn test_minimal_quoting() {
        let bytes = write("Name,Note\n\"Doe, Jane\",plain\n");
        assert_eq!(&bytes[3..], b"Name,Note\n\"Doe, Jane\",plain\n");
    }

    #[test]
    fn test_float_column_renders_integers_as_floats() {
        let bytes = write("x\n2\n2.5\n\n");
        assert_eq!(&bytes[3..], b"x\n2.0\n2.5\n");
    }

    #[test]
    fn test_missing_values_render_empty() {
        let bytes = write("a,b\n1,NA\n2,3\n");
        assert_eq!(&bytes[3..], b"a,b\n1,\n2,3\n");
    }

    #[test]
    fn test_rows_keep_column_order() {
        let bytes = write("c,a,b\n3,1,2\n6,4,5\nz,x,y\n");
        assert_eq!(&bytes[3..], b"c,a,b\n3,1,2\n6,4,5\nz,x,y\n");
    }
}
