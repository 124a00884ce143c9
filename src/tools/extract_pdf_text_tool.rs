use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::{error, info};

use super::{file_path_schema, parse_file_path, record_result};
use crate::mcp::types::{CallToolResult, ToolAnnotations, ToolDefinition};
use crate::results::ExtractionResult;
use crate::utils::pdf::PdfEngine;
use crate::utils::text_extract::extract_pdf_text;

pub const EXTRACT_PDF_TEXT_TOOL_NAME: &str = "extract_pdf_text";

pub static EXTRACT_PDF_TEXT_TOOL_DEFINITION: Lazy<ToolDefinition> = Lazy::new(|| ToolDefinition {
    name: EXTRACT_PDF_TEXT_TOOL_NAME.to_string(),
    description: "Extract raw text from a PDF file. Returns {status, message, text}; status is \
        success, warning (no text found) or error."
        .to_string(),
    input_schema: file_path_schema("Path to the PDF file"),
    annotations: Some(ToolAnnotations {
        title: Some("Extract PDF Text".to_string()),
        read_only_hint: Some(true),
        idempotent_hint: Some(true),
        open_world_hint: Some(false),
    }),
});

pub struct ExtractPdfTextTool {
    engine: Arc<dyn PdfEngine>,
}

impl ExtractPdfTextTool {
    pub fn new(engine: Arc<dyn PdfEngine>) -> Self {
        Self { engine }
    }

    pub async fn execute(&self, arguments: Option<serde_json::Value>) -> CallToolResult {
        let params = match parse_file_path(arguments) {
            Ok(params) => params,
            Err(result) => {
                error!("Invalid extract_pdf_text parameters");
                return result;
            }
        };

        info!(
            "Extracting text from {} (engine: {})",
            params.file_path,
            self.engine.name()
        );

        let engine = Arc::clone(&self.engine);
        let file_path = params.file_path;
        let result =
            match tokio::task::spawn_blocking(move || extract_pdf_text(&file_path, engine.as_ref()))
                .await
            {
                Ok(result) => result,
                Err(e) => {
                    error!("PDF extraction task failed: {}", e);
                    ExtractionResult::error(e.to_string())
                }
            };

        record_result(&result, result.is_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::pdf::fixtures::pdf_with_pages;
    use crate::utils::pdf::LopdfEngine;
    use serde_json::json;
    use std::io::Write;

    fn tool() -> ExtractPdfTextTool {
        ExtractPdfTextTool::new(Arc::new(LopdfEngine))
    }

    #[tokio::test]
    async fn returns_record_as_structured_content() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(&pdf_with_pages(&[Some("Page one"), Some("Page two")]))
            .unwrap();
        file.flush().unwrap();

        let result = tool()
            .execute(Some(json!({"file_path": file.path().to_string_lossy()})))
            .await;

        assert!(result.is_error.is_none());
        assert_eq!(
            result.structured_content,
            Some(json!({
                "status": "success",
                "message": "Extracted text from 2 pages",
                "text": "Page one Page two"
            }))
        );
    }

    #[tokio::test]
    async fn missing_file_is_flagged_as_error() {
        let result = tool()
            .execute(Some(json!({"file_path": "/no/such/file.pdf"})))
            .await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            result.structured_content,
            Some(json!({"status": "error", "message": "File not found", "text": ""}))
        );
    }

    #[tokio::test]
    async fn warning_is_not_an_error() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(&pdf_with_pages(&[None])).unwrap();
        file.flush().unwrap();

        let result = tool()
            .execute(Some(json!({"file_path": file.path().to_string_lossy()})))
            .await;

        assert!(result.is_error.is_none());
        assert_eq!(
            result.structured_content.unwrap()["status"],
            json!("warning")
        );
    }

    #[test]
    fn definition_requires_file_path() {
        let def = &*EXTRACT_PDF_TEXT_TOOL_DEFINITION;
        assert_eq!(def.name, "extract_pdf_text");
        assert_eq!(def.input_schema["required"], json!(["file_path"]));
    }
}
