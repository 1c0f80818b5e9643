// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Core types and value objects for CSV augmentation
// No I/O, no async, no external dependencies

mod cell;
mod derived_column;
mod table;
mod upload;

pub use cell::{format_float, infer_column, is_numeric_text, Cell, ColumnType};
pub use derived_column::{
    DerivedColumn, ABSENCES_COLUMN, DELIVERABLES_COLUMN, PERFORMANCE_RATIO_COLUMN,
};
pub use table::{Column, Table};
pub use upload::{OutputPayload, UploadedFile, OUTPUT_CONTENT_TYPE, OUTPUT_FILENAME, UTF8_BOM};
