use thiserror::Error;

/// Failures a tool call can run into. Every variant is recovered inside the
/// tool and turned into a status/message pair; the `Display` text is the
/// message the agent runtime sees.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("File not found")]
    NotFound,

    #[error("Not a PDF file")]
    InvalidType,

    #[error("{0}")]
    Parse(String),

    #[error("No text found in PDF")]
    EmptyResult,

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl From<crate::utils::pdf::PdfError> for ToolError {
    fn from(err: crate::utils::pdf::PdfError) -> Self {
        ToolError::Parse(err.to_string())
    }
}
