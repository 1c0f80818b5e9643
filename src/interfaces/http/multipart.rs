use actix_multipart::{Multipart, MultipartError};
use actix_web::{web, HttpMessage, HttpRequest};
use futures_util::TryStreamExt;
use tracing::warn;

use crate::domain::csv::UploadedFile;
use crate::domain::error::{AppError, Result};

/// Multipart field carrying the CSV upload
pub const FILE_FIELD: &str = "file";

/// Pull the first `file` part that carries a filename out of a multipart body.
///
/// A part without a `filename` parameter is a plain form field, not a file.
/// Non-multipart requests and unreadable multipart bodies have no file part at all.
pub async fn read_upload(
    req: &HttpRequest,
    payload: web::Payload,
) -> Result<Option<UploadedFile>> {
    if !is_multipart_form(req) {
        return Ok(None);
    }

    let mut multipart = Multipart::new(req.headers(), payload);
    while let Some(mut field) = multipart.try_next().await.map_err(malformed)? {
        let filename = field
            .content_disposition()
            .filter(|disposition| disposition.get_name() == Some(FILE_FIELD))
            .and_then(|disposition| disposition.get_filename())
            .map(str::to_owned);

        // Unrelated parts are drained so the stream can advance.
        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(malformed)? {
            if filename.is_some() {
                bytes.extend_from_slice(&chunk);
            }
        }

        if let Some(filename) = filename {
            return Ok(Some(UploadedFile::new(filename, bytes)));
        }
    }

    Ok(None)
}

fn is_multipart_form(req: &HttpRequest) -> bool {
    matches!(
        req.mime_type(),
        Ok(Some(mime)) if mime.essence_str() == "multipart/form-data"
    )
}

fn malformed(err: MultipartError) -> AppError {
    warn!(error = %err, "Unreadable multipart body");
    AppError::MissingFilePart
}
