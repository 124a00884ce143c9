use anyhow::{anyhow, Result};
use futures::{SinkExt, StreamExt};
use tokio::io::BufReader;
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};
use tracing::{debug, error, warn};

use super::types::{
    McpMessage, McpNotification, McpRequest, McpResponse, INVALID_REQUEST, PARSE_ERROR,
};

/// Newline-delimited JSON-RPC over stdin/stdout. Logs never go to stdout.
pub struct StdioTransport {
    reader: FramedRead<BufReader<tokio::io::Stdin>, LinesCodec>,
    writer: FramedWrite<tokio::io::Stdout, LinesCodec>,
}

impl StdioTransport {
    pub fn new() -> Self {
        let reader = FramedRead::new(BufReader::new(tokio::io::stdin()), LinesCodec::new());
        let writer = FramedWrite::new(tokio::io::stdout(), LinesCodec::new());

        Self { reader, writer }
    }

    /// Next message from the client, or `None` once stdin is closed.
    ///
    /// Lines that are not valid JSON-RPC are answered with an error response
    /// and skipped.
    pub async fn read_message(&mut self) -> Result<Option<McpMessage>> {
        loop {
            match self.reader.next().await {
                Some(Ok(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    debug!("Received: {}", line);
                    match parse_message(&line) {
                        Ok(message) => return Ok(Some(message)),
                        Err(response) => self.write_response(response).await?,
                    }
                }
                Some(Err(e)) => {
                    error!("Error reading from stdin: {}", e);
                    return Err(anyhow!("Transport error: {}", e));
                }
                None => {
                    debug!("EOF reached");
                    return Ok(None);
                }
            }
        }
    }

    pub async fn write_response(&mut self, response: McpResponse) -> Result<()> {
        let json = serde_json::to_string(&response)?;
        debug!("Sending: {}", json);

        self.writer.send(json).await?;

        Ok(())
    }
}

/// A line with an `id` is a request; without one it is a notification.
/// Anything else yields the error response to send back.
pub fn parse_message(line: &str) -> Result<McpMessage, McpResponse> {
    let value = serde_json::from_str::<serde_json::Value>(line).map_err(|e| {
        warn!("Failed to parse JSON: {}", e);
        McpResponse::failure(serde_json::Value::Null, PARSE_ERROR, format!("Parse error: {}", e))
    })?;

    let Some(obj) = value.as_object() else {
        warn!("Invalid JSON-RPC message structure");
        return Err(McpResponse::failure(
            serde_json::Value::Null,
            INVALID_REQUEST,
            "Invalid Request",
        ));
    };
    let id = obj.get("id").cloned();

    match id {
        Some(id) => serde_json::from_value::<McpRequest>(value)
            .map(McpMessage::Request)
            .map_err(|e| {
                warn!("Failed to parse request: {}", e);
                McpResponse::failure(id, INVALID_REQUEST, format!("Invalid Request: {}", e))
            }),
        None => serde_json::from_value::<McpNotification>(value)
            .map(McpMessage::Notification)
            .map_err(|e| {
                warn!("Failed to parse notification: {}", e);
                McpResponse::failure(
                    serde_json::Value::Null,
                    INVALID_REQUEST,
                    format!("Invalid Request: {}", e),
                )
            }),
    }
}
