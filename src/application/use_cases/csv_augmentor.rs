// ============================================================
// CSV AUGMENTOR USE CASE
// ============================================================
// Validate an upload, derive the ratio column and re-serialize

use std::time::Instant;

use tracing::debug;

use crate::application::use_cases::column_derivation::{derive_column, Derivation};
use crate::domain::csv::{DerivedColumn, OutputPayload, UploadedFile};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::csv::{CsvParser, CsvWriter};

/// Single-pass, stateless CSV transformation
#[derive(Debug, Clone, Default)]
pub struct CsvAugmentor {
    parser: CsvParser,
    writer: CsvWriter,
    rule: DerivedColumn,
}

impl CsvAugmentor {
    pub fn new(rule: DerivedColumn) -> Self {
        Self {
            parser: CsvParser::new(),
            writer: CsvWriter::new(),
            rule,
        }
    }

    /// Process the `file` part of a request, if there was one
    pub fn process_upload(&self, upload: Option<UploadedFile>) -> Result<OutputPayload> {
        let upload = upload.ok_or(AppError::MissingFilePart)?;
        self.process(&upload.bytes, &upload.filename)
    }

    pub fn process(&self, bytes: &[u8], filename: &str) -> Result<OutputPayload> {
        if filename.is_empty() {
            return Err(AppError::EmptyFilename);
        }

        let start = Instant::now();
        let mut table = self.parser.parse_bytes(bytes)?;
        let derivation = derive_column(&mut table, &self.rule)?;
        let output = self.writer.write(&table)?;

        debug!(
            filename,
            rows = table.row_count(),
            columns = table.column_count(),
            derived = derivation == Derivation::Applied,
            output_bytes = output.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "CSV augmented"
        );

        Ok(OutputPayload::csv(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::csv::{OUTPUT_FILENAME, UTF8_BOM};

    fn body(payload: &OutputPayload) -> &str {
        assert!(payload.bytes.starts_with(UTF8_BOM));
        std::str::from_utf8(&payload.bytes[UTF8_BOM.len()..]).unwrap()
    }

    #[test]
    fn test_intern_scenario() {
        let payload = CsvAugmentor::default()
            .process(b"Name,Absences,Deliverables\nAlice,2,6\nBob,0,3", "interns.csv")
            .unwrap();

        assert_eq!(
            body(&payload),
            "Name,Absences,Deliverables,Performance Ratio\nAlice,2,6,2.0\nBob,0,3,3.0\n"
        );
        assert_eq!(payload.filename, OUTPUT_FILENAME);
        assert!(payload.content_type.starts_with("text/csv"));
    }

    #[test]
    fn test_missing_upload() {
        let err = CsvAugmentor::default().process_upload(None).unwrap_err();
        assert_eq!(err, AppError::MissingFilePart);
    }

    #[test]
    fn test_empty_filename_is_checked_before_parsing() {
        let upload = UploadedFile::new("", b"\xff\xfe".to_vec());
        let err = CsvAugmentor::default().process_upload(Some(upload)).unwrap_err();
        assert_eq!(err, AppError::EmptyFilename);
    }

    #[test]
    fn test_without_source_columns_only_reserializes() {
        let input = "Name,Absence Count,Deliverables\nAlice,2,6\n";
        let payload = CsvAugmentor::default().process(input.as_bytes(), "a.csv").unwrap();
        assert_eq!(body(&payload), input);

        // Feeding the output back in is a no-op beyond re-serialization.
        let again = CsvAugmentor::default().process(&payload.bytes, "a.csv").unwrap();
        assert_eq!(again, payload);
    }

    #[test]
    fn test_row_count_and_columns_preserved() {
        let input = "Id,Absences,Deliverables,Team\n1,0,1,red\n2,1,1,blue\n3,4,10,red\n";
        let payload = CsvAugmentor::default().process(input.as_bytes(), "a.csv").unwrap();
        let lines: Vec<&str> = body(&payload).lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Id,Absences,Deliverables,Team,Performance Ratio");
        assert_eq!(lines[2], "2,1,1,blue,0.5");
        assert_eq!(lines[3], "3,4,10,red,2.0");
    }

    #[test]
    fn test_header_only_input_keeps_header() {
        let payload = CsvAugmentor::default()
            .process(b"Absences,Deliverables\n", "a.csv")
            .unwrap();
        assert_eq!(body(&payload), "Absences,Deliverables,Performance Ratio\n");
    }

    #[test]
    fn test_processing_errors_propagate() {
        let augmentor = CsvAugmentor::default();
        assert!(matches!(
            augmentor.process(b"\xff\xfe\xfd", "a.csv"),
            Err(AppError::DecodeError(_))
        ));
        assert!(matches!(
            augmentor.process(b"Absences,Deliverables\nx,1\n", "a.csv"),
            Err(AppError::TypeError(_))
        ));
    }
}
