use bytes::Bytes;
use tracing::warn;

use crate::errors::AppError;

const PDF_MIME: &str = "application/pdf";

/// True when the upload declares itself a PDF by content type or file name.
pub fn is_pdf(content_type: Option<&str>, file_name: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.eq_ignore_ascii_case(PDF_MIME))
        || file_name.is_some_and(|name| name.to_ascii_lowercase().ends_with(".pdf"))
}

/// Extracts plain text from PDF bytes on the blocking pool.
pub async fn extract_text(data: Bytes) -> Result<String, AppError> {
    let unreadable =
        || AppError::UnprocessableEntity("Could not read text from the uploaded PDF".to_string());

    let result = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data)).await;

    match result {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => {
            warn!("PDF extraction failed: {e}");
            Err(unreadable())
        }
        // pdf-extract panics on some malformed inputs.
        Err(e) if e.is_panic() => {
            warn!("PDF extraction panicked");
            Err(unreadable())
        }
        Err(e) => Err(AppError::Internal(e.into())),
    }
}
