use serde::{Serialize, Serializer};

use crate::error::ToolError;

/// Outcome of `extract_pdf_text`.
///
/// Only a successful extraction carries text. On the wire every variant is
/// a flat `{status, message, text}` object, with `text` empty for anything
/// but success.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionResult {
    Success { page_count: usize, text: String },
    Warning { message: String },
    Error { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStatus {
    Success,
    Warning,
    Error,
}

#[derive(Serialize)]
struct ExtractionWire<'a> {
    status: ExtractionStatus,
    message: String,
    text: &'a str,
}

impl ExtractionResult {
    pub fn success(page_count: usize, text: String) -> Self {
        ExtractionResult::Success { page_count, text }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ExtractionResult::Error {
            message: message.into(),
        }
    }

    pub fn status(&self) -> ExtractionStatus {
        match self {
            ExtractionResult::Success { .. } => ExtractionStatus::Success,
            ExtractionResult::Warning { .. } => ExtractionStatus::Warning,
            ExtractionResult::Error { .. } => ExtractionStatus::Error,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ExtractionResult::Success { page_count, .. } => {
                format!("Extracted text from {} pages", page_count)
            }
            ExtractionResult::Warning { message } | ExtractionResult::Error { message } => {
                message.clone()
            }
        }
    }

    /// Extracted text, present only on success.
    pub fn text(&self) -> Option<&str> {
        match self {
            ExtractionResult::Success { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ExtractionResult::Error { .. })
    }
}

impl From<ToolError> for ExtractionResult {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::EmptyResult => ExtractionResult::Warning {
                message: err.to_string(),
            },
            other => ExtractionResult::error(other.to_string()),
        }
    }
}

impl Serialize for ExtractionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ExtractionWire {
            status: self.status(),
            message: self.message(),
            text: self.text().unwrap_or(""),
        }
        .serialize(serializer)
    }
}

/// Outcome of `get_simple_info`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum InfoResult {
    Success {
        filename: String,
        size_bytes: u64,
        size_mb: f64,
    },
    Error {
        message: String,
    },
}

impl InfoResult {
    pub fn is_error(&self) -> bool {
        matches!(self, InfoResult::Error { .. })
    }
}

impl From<ToolError> for InfoResult {
    fn from(err: ToolError) -> Self {
        InfoResult::Error {
            message: err.to_string(),
        }
    }
}
