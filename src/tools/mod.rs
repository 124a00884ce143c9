pub mod extract_pdf_text_tool;
pub mod simple_info_tool;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use crate::mcp::types::CallToolResult;

/// Arguments shared by both tools.
#[derive(Debug, Deserialize)]
pub(crate) struct FilePathParams {
    #[serde(deserialize_with = "coerce_to_string")]
    pub file_path: String,
}

// Agents sometimes send numbers or other scalars where a path is expected;
// anything that is not already a string is rendered as its JSON text.
fn coerce_to_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        other => other.to_string(),
    })
}

pub(crate) fn parse_file_path(arguments: Option<Value>) -> Result<FilePathParams, CallToolResult> {
    match arguments {
        Some(args) => serde_json::from_value::<FilePathParams>(args)
            .map_err(|e| CallToolResult::error(format!("Invalid parameters: {}", e))),
        None => Err(CallToolResult::error("Missing required parameters")),
    }
}

pub(crate) fn file_path_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "file_path": {
                "type": "string",
                "description": description
            }
        },
        "required": ["file_path"]
    })
}

pub(crate) fn record_result<T: Serialize>(record: &T, is_error: bool) -> CallToolResult {
    match serde_json::to_value(record) {
        Ok(value) => CallToolResult::structured(value, is_error),
        Err(e) => CallToolResult::error(format!("Failed to serialize tool result: {}", e)),
    }
}
