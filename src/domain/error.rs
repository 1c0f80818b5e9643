use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppError {
    /// The request carried no multipart part named `file` with a filename.
    MissingFilePart,
    /// A `file` part was sent with an empty filename.
    EmptyFilename,
    DecodeError(String),
    ParseError(String),
    TypeError(String),
    SerializeError(String),
    ConfigError(String),
    IoError(String),
}

impl AppError {
    /// Request-shape errors are detected before any parsing and reported as 400s.
    pub fn is_request_error(&self) -> bool {
        matches!(self, AppError::MissingFilePart | AppError::EmptyFilename)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingFilePart => write!(f, "No file part in the request"),
            AppError::EmptyFilename => write!(f, "No selected file"),
            AppError::DecodeError(msg) => write!(f, "{}", msg),
            AppError::ParseError(msg) => write!(f, "{}", msg),
            AppError::TypeError(msg) => write!(f, "{}", msg),
            AppError::SerializeError(msg) => write!(f, "{}", msg),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
