//! Multipart helpers shared by the upload endpoints.

use actix_multipart::Multipart;
use actix_web::web;
use futures_util::StreamExt;

use crate::error::{AppError, AppResult};
use crate::models::FileUpload;

/// Upload size limit, shared as app data.
#[derive(Debug, Clone, Copy)]
pub struct MaxUploadSize(pub usize);

/// Read the first file field of a multipart body.
///
/// Reading stops one byte past `max_size` so an oversized upload is rejected by validation
/// without buffering the whole body.
pub async fn read_file(
    mut payload: Multipart,
    max_size: web::Data<MaxUploadSize>,
) -> AppResult<FileUpload> {
    let limit = max_size.0.saturating_add(1);

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::invalid_format(format!("Multipart error: {}", e)))?;

        let Some(filename) = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string)
        else {
            // Skip plain form fields
            continue;
        };

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk =
                chunk.map_err(|e| AppError::invalid_format(format!("Read error: {}", e)))?;
            let remaining = limit - data.len();
            data.extend_from_slice(&chunk[..chunk.len().min(remaining)]);
            if data.len() >= limit {
                break;
            }
        }

        return Ok(FileUpload { filename, data });
    }

    Err(AppError::invalid_format("Missing file in multipart body"))
}
