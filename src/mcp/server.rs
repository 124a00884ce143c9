use anyhow::Result;
use serde_json::json;
use tracing::{debug, info, warn};

use super::transport::StdioTransport;
use super::types::*;
use crate::agent::AgentDescriptor;

pub struct McpServer {
    agent: AgentDescriptor,
    initialized: bool,
}

impl McpServer {
    pub fn new(agent: AgentDescriptor) -> Self {
        Self {
            agent,
            initialized: false,
        }
    }

    pub async fn start(&mut self) -> Result<()> {
        let mut transport = StdioTransport::new();
        info!(
            agent = self.agent.name(),
            model = self.agent.model(),
            "MCP server started and listening on stdio"
        );

        loop {
            match transport.read_message().await? {
                Some(McpMessage::Request(request)) => {
                    let response = self.handle_request(request).await;
                    transport.write_response(response).await?;
                }
                Some(McpMessage::Notification(notification)) => {
                    self.handle_notification(notification);
                }
                None => {
                    info!("Client disconnected");
                    break;
                }
            }
        }

        Ok(())
    }

    async fn handle_request(&mut self, request: McpRequest) -> McpResponse {
        let id = Self::ensure_valid_id(request.id.clone());

        match request.method.as_str() {
            "initialize" => self.handle_initialize(id, request.params),
            "tools/list" => self.handle_list_tools(id),
            "tools/call" => self.handle_call_tool(id, request.params).await,
            "ping" => McpResponse::ok(id, json!({})),
            _ => McpResponse::failure(id, METHOD_NOT_FOUND, "Method not found"),
        }
    }

    fn handle_notification(&mut self, notification: McpNotification) {
        debug!("Received notification: {}", notification.method);

        match notification.method.as_str() {
            "notifications/initialized" => {
                info!("Client initialization completed");
                self.initialized = true;
            }
            "notifications/cancelled" => {
                debug!("Request cancelled notification received");
            }
            _ => {
                warn!("Unknown notification method: {}", notification.method);
            }
        }
    }

    fn ensure_valid_id(id: Option<serde_json::Value>) -> serde_json::Value {
        match id {
            Some(serde_json::Value::Null) | None => serde_json::Value::String("0".to_string()),
            Some(value) => value,
        }
    }

    fn handle_initialize(
        &mut self,
        id: serde_json::Value,
        params: Option<serde_json::Value>,
    ) -> McpResponse {
        let Some(params) = params else {
            return McpResponse::failure(id, INVALID_PARAMS, "Missing params");
        };
        let init_params = match serde_json::from_value::<InitializeParams>(params) {
            Ok(init_params) => init_params,
            Err(e) => {
                return McpResponse::failure(id, INVALID_PARAMS, format!("Invalid params: {}", e))
            }
        };

        info!(
            client = %init_params.client_info.name,
            client_version = %init_params.client_info.version,
            protocol = %init_params.protocol_version,
            "Initializing session"
        );

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            server_info: ServerInfo {
                name: self.agent.name().to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: Some(self.agent.description().to_string()),
            },
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                logging: Some(json!({})),
            },
            instructions: Some(self.agent.instruction().to_string()),
            meta: Some(json!({ "model": self.agent.model() })),
        };

        Self::result_response(id, &result)
    }

    fn handle_list_tools(&self, id: serde_json::Value) -> McpResponse {
        let result = ListToolsResult {
            tools: self.agent.tool_definitions(),
        };
        Self::result_response(id, &result)
    }

    async fn handle_call_tool(
        &self,
        id: serde_json::Value,
        params: Option<serde_json::Value>,
    ) -> McpResponse {
        let Some(params) = params else {
            return McpResponse::failure(id, INVALID_PARAMS, "Missing params");
        };
        let call_params = match serde_json::from_value::<CallToolParams>(params) {
            Ok(call_params) => call_params,
            Err(e) => {
                return McpResponse::failure(id, INVALID_PARAMS, format!("Invalid params: {}", e))
            }
        };

        if !self.initialized {
            debug!("Tool call before initialized notification: {}", call_params.name);
        }

        let result = match self.agent.tool(&call_params.name) {
            Some(tool) => tool.call(call_params.arguments).await,
            None => {
                warn!("Unknown tool requested: {}", call_params.name);
                CallToolResult::error(format!("Tool not found: {}", call_params.name))
            }
        };

        Self::result_response(id, &result)
    }

    fn result_response<T: serde::Serialize>(id: serde_json::Value, result: &T) -> McpResponse {
        match serde_json::to_value(result) {
            Ok(value) => McpResponse::ok(id, value),
            Err(e) => McpResponse::failure(id, INTERNAL_ERROR, format!("Serialization failed: {}", e)),
        }
    }
}
