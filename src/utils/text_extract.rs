use std::path::Path;

use tracing::{info, warn};

use crate::error::ToolError;
use crate::results::ExtractionResult;
use crate::utils::pdf::{extract_pages, PdfEngine};

/// Case-insensitive `.pdf` suffix check on the raw path string.
pub fn has_pdf_suffix(file_path: &str) -> bool {
    file_path.to_lowercase().ends_with(".pdf")
}

/// Extracts the text of every readable page of the PDF at `file_path`.
///
/// Never fails: every problem is reported through the returned record.
pub fn extract_pdf_text(file_path: &str, engine: &dyn PdfEngine) -> ExtractionResult {
    match try_extract(file_path, engine) {
        Ok(result) => result,
        Err(err) => {
            match &err {
                ToolError::Parse(_) | ToolError::Io(_) => {
                    warn!(path = %file_path, engine = engine.name(), error = %err, "PDF extraction failed")
                }
                _ => info!(path = %file_path, reason = %err, "PDF extraction refused"),
            }
            err.into()
        }
    }
}

fn try_extract(file_path: &str, engine: &dyn PdfEngine) -> Result<ExtractionResult, ToolError> {
    if !Path::new(file_path).exists() {
        return Err(ToolError::NotFound);
    }
    if !has_pdf_suffix(file_path) {
        return Err(ToolError::InvalidType);
    }

    let bytes = std::fs::read(file_path)?;
    let pages = extract_pages(engine, &bytes)?;
    let text = pages.joined();
    if text.is_empty() {
        return Err(ToolError::EmptyResult);
    }

    info!(
        path = %file_path,
        pages = pages.page_count,
        chars = text.len(),
        "PDF extraction succeeded"
    );
    Ok(ExtractionResult::success(pages.page_count, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::ExtractionStatus;
    use crate::utils::pdf::fixtures::pdf_with_pages;
    use crate::utils::pdf::LopdfEngine;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(bytes: &[u8], suffix: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    fn path_of(file: &NamedTempFile) -> String {
        file.path().to_string_lossy().to_string()
    }

    #[test]
    fn missing_file() {
        let result = extract_pdf_text("/definitely/not/here.pdf", &LopdfEngine);
        assert_eq!(result, ExtractionResult::error("File not found"));
        assert!(result.text().is_none());
    }

    #[test]
    fn wrong_extension() {
        let file = write_temp(b"plain text", ".txt");
        let result = extract_pdf_text(&path_of(&file), &LopdfEngine);
        assert_eq!(result, ExtractionResult::error("Not a PDF file"));
    }

    #[test]
    fn suffix_check_ignores_case() {
        assert!(has_pdf_suffix("report.PDF"));
        assert!(has_pdf_suffix("/tmp/a.Pdf"));
        assert!(!has_pdf_suffix("report.pdf.bak"));
        assert!(!has_pdf_suffix("pdf"));
    }

    #[test]
    fn multi_page_document() {
        let bytes = pdf_with_pages(&[Some("Alpha one"), Some("Beta two"), Some("Gamma three")]);
        let file = write_temp(&bytes, ".PDF");
        let result = extract_pdf_text(&path_of(&file), &LopdfEngine);

        assert_eq!(result.status(), ExtractionStatus::Success);
        assert_eq!(result.message(), "Extracted text from 3 pages");
        assert_eq!(result.text(), Some("Alpha one Beta two Gamma three"));
    }

    #[test]
    fn page_count_includes_pages_without_text() {
        let bytes = pdf_with_pages(&[Some("Only page with words"), None]);
        let file = write_temp(&bytes, ".pdf");
        let result = extract_pdf_text(&path_of(&file), &LopdfEngine);

        assert_eq!(result.message(), "Extracted text from 2 pages");
        assert_eq!(result.text(), Some("Only page with words"));
    }

    #[test]
    fn image_only_document_warns() {
        let bytes = pdf_with_pages(&[None, None]);
        let file = write_temp(&bytes, ".pdf");
        let result = extract_pdf_text(&path_of(&file), &LopdfEngine);

        assert_eq!(result.status(), ExtractionStatus::Warning);
        assert_eq!(result.message(), "No text found in PDF");
        assert!(result.text().is_none());
    }

    #[test]
    fn corrupt_document_is_an_error() {
        let file = write_temp(b"%PDF-1.4\n1 0 obj << /Type /Catalog", ".pdf");
        let result = extract_pdf_text(&path_of(&file), &LopdfEngine);

        assert!(result.is_error());
        assert!(!result.message().is_empty());
        assert!(result.text().is_none());
    }

    #[test]
    fn truncated_document_is_an_error() {
        let bytes = pdf_with_pages(&[Some("Will be cut")]);
        let file = write_temp(&bytes[..bytes.len() / 3], ".pdf");
        let result = extract_pdf_text(&path_of(&file), &LopdfEngine);

        assert!(result.is_error());
        assert!(!result.message().is_empty());
    }

    #[test]
    fn repeated_calls_agree() {
        let bytes = pdf_with_pages(&[Some("Stable"), Some("output")]);
        let file = write_temp(&bytes, ".pdf");
        let path = path_of(&file);

        let first = extract_pdf_text(&path, &LopdfEngine);
        let second = extract_pdf_text(&path, &LopdfEngine);
        assert_eq!(first, second);
    }
}
