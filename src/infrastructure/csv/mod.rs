// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// CSV decoding, parsing and serialization

mod csv_parser;
mod csv_writer;

pub use csv_parser::{decode_utf8, CsvParser};
pub use csv_writer::CsvWriter;
