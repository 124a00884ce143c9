use once_cell::sync::Lazy;
use tracing::{error, info};

use super::{file_path_schema, parse_file_path, record_result};
use crate::mcp::types::{CallToolResult, ToolAnnotations, ToolDefinition};
use crate::results::InfoResult;
use crate::utils::file_info::get_simple_info;

pub const SIMPLE_INFO_TOOL_NAME: &str = "get_simple_info";

pub static SIMPLE_INFO_TOOL_DEFINITION: Lazy<ToolDefinition> = Lazy::new(|| ToolDefinition {
    name: SIMPLE_INFO_TOOL_NAME.to_string(),
    description: "Get basic file information (filename, size in bytes and MB)".to_string(),
    input_schema: file_path_schema("Path to the file"),
    annotations: Some(ToolAnnotations {
        title: Some("File Info".to_string()),
        read_only_hint: Some(true),
        idempotent_hint: Some(true),
        open_world_hint: Some(false),
    }),
});

pub struct SimpleInfoTool;

impl SimpleInfoTool {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(&self, arguments: Option<serde_json::Value>) -> CallToolResult {
        let params = match parse_file_path(arguments) {
            Ok(params) => params,
            Err(result) => {
                error!("Invalid get_simple_info parameters");
                return result;
            }
        };

        info!("Reading file info for {}", params.file_path);

        let file_path = params.file_path;
        let result = match tokio::task::spawn_blocking(move || get_simple_info(&file_path)).await {
            Ok(result) => result,
            Err(e) => {
                error!("File info task failed: {}", e);
                InfoResult::Error {
                    message: e.to_string(),
                }
            }
        };

        record_result(&result, result.is_error())
    }
}
