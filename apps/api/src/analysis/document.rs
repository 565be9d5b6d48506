use bytes::Bytes;
use tracing::{debug, warn};

use crate::errors::AppError;

/// Shown when neither an upload nor pasted text carries any content.
pub const EMPTY_RESUME_MESSAGE: &str = "Please upload or paste your resume content first.";

/// A file part from the analysis form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Pdf,
    PlainText,
}

impl UploadedFile {
    fn kind(&self) -> Option<DocumentKind> {
        let content_type = self.content_type.as_deref().unwrap_or("").to_ascii_lowercase();
        let extension = self
            .file_name
            .as_deref()
            .and_then(|n| n.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());

        if content_type == "application/pdf" || extension.as_deref() == Some("pdf") {
            Some(DocumentKind::Pdf)
        } else if content_type.starts_with("text/plain") || extension.as_deref() == Some("txt") {
            Some(DocumentKind::PlainText)
        } else {
            None
        }
    }
}

/// Extracts text from an uploaded resume. PDF parsing runs on a blocking thread.
pub async fn extract_upload_text(upload: &UploadedFile) -> Result<String, AppError> {
    let name = upload.file_name.as_deref().unwrap_or("upload");
    match upload.kind() {
        Some(DocumentKind::Pdf) => {
            let data = upload.data.clone();
            // pdf-extract can panic on malformed input; a panicked task counts as unreadable.
            let extracted = tokio::task::spawn_blocking(move || {
                pdf_extract::extract_text_from_mem(&data).map_err(|e| e.to_string())
            })
            .await
            .map_err(|e| e.to_string())
            .and_then(|inner| inner);
            let text = extracted.map_err(|e| {
                warn!("Failed to extract text from '{name}': {e}");
                AppError::UnprocessableEntity(format!(
                    "Could not read text from '{name}'. Please upload a valid PDF."
                ))
            })?;
            debug!("Extracted {} characters from PDF '{name}'", text.len());
            Ok(text)
        }
        Some(DocumentKind::PlainText) => Ok(String::from_utf8_lossy(&upload.data).into_owned()),
        None => Err(AppError::UnprocessableEntity(format!(
            "Unsupported file type for '{name}'. Upload a PDF or a plain-text file."
        ))),
    }
}

/// Upload text followed by pasted text, newline-separated when both are present.
/// Rejects the submission when both are blank.
pub async fn combine_resume_text(
    upload: Option<&UploadedFile>,
    pasted: Option<&str>,
) -> Result<String, AppError> {
    let mut text = String::new();
    if let Some(upload) = upload.filter(|u| !u.data.is_empty()) {
        text.push_str(&extract_upload_text(upload).await?);
    }
    if let Some(pasted) = pasted.filter(|p| !p.is_empty()) {
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(pasted);
    }

    if text.trim().is_empty() {
        return Err(AppError::Validation(EMPTY_RESUME_MESSAGE.to_string()));
    }
    Ok(text)
}
