// ============================================================
// UPLOAD AND OUTPUT PAYLOADS
// ============================================================

use serde::{Deserialize, Serialize};

pub const OUTPUT_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
pub const OUTPUT_FILENAME: &str = "processed_interns_data.csv";
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Raw bytes and declared filename of one uploaded file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

/// Serialized CSV ready to be sent as a download
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputPayload {
    /// UTF-8 BOM followed by the CSV text
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub filename: String,
}

impl OutputPayload {
    pub fn csv(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            content_type: OUTPUT_CONTENT_TYPE.to_string(),
            filename: OUTPUT_FILENAME.to_string(),
        }
    }
}
