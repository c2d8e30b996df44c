//! MCP server - request routing over a newline-delimited JSON stream
//!
//! Provides:
//! - `McpServer`: answers `initialize`, `ping`, `tools/list` and `tools/call`
//! - `run`: reads frames one at a time and writes responses in order
//! - Environment validation at startup

mod environment;

pub use environment::{EnvironmentReport, validate_environment};

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use log::{debug, info, warn};
use serde_json::{Value, json};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{FramedRead, FramedWrite};

use crate::error::{MembankError, Result};
use crate::protocol::{
    CallToolParams, CallToolResult, DEFAULT_MAX_FRAME_BYTES, Decoded, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    Methods, NdJsonCodec,
};
use crate::tools::{DEFAULT_MAX_RESPONSE_CHARS, DEFAULT_TOOL_TIMEOUT, ToolContext, ToolExecutor};

/// Protocol version announced when the client does not send one
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

/// Name and version reported in `initialize`
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Worst-case JSON size of one response character (`\u001f` escapes)
const MAX_ESCAPED_CHAR_BYTES: usize = 6;

/// Room for the JSON-RPC envelope and truncation note around a response
const ENVELOPE_BYTES: usize = 1024;

/// Smallest frame that still fits the tool listing
pub const MIN_FRAME_BYTES: usize = 64 * 1024;

/// Limits applied by the server
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Per tool call
    pub timeout: Duration,
    /// Cap on tool response text, in characters
    pub max_response_chars: usize,
    /// Cap on a single protocol frame, in bytes
    pub max_frame_bytes: usize,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TOOL_TIMEOUT,
            max_response_chars: DEFAULT_MAX_RESPONSE_CHARS,
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
        }
    }
}

impl ServerOptions {
    /// Reject options the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(MembankError::Config("tool timeout must be greater than zero".into()));
        }
        if self.max_response_chars == 0 {
            return Err(MembankError::Config("max_response_chars must be greater than zero".into()));
        }

        let needed = self
            .max_response_chars
            .saturating_mul(MAX_ESCAPED_CHAR_BYTES)
            .saturating_add(ENVELOPE_BYTES)
            .max(MIN_FRAME_BYTES);
        if self.max_frame_bytes < needed {
            return Err(MembankError::Config(format!(
                "max_frame_bytes ({}) must be at least {} for max_response_chars {}",
                self.max_frame_bytes, needed, self.max_response_chars
            )));
        }
        Ok(())
    }
}

/// MCP server owning the tool registry and the session
pub struct McpServer {
    executor: ToolExecutor,
    context: ToolContext,
    info: ServerInfo,
    max_frame_bytes: usize,
}

impl McpServer {
    /// Server with the standard tools, configured from `options`
    pub fn new(context: ToolContext, options: &ServerOptions) -> Self {
        let executor = ToolExecutor::standard()
            .with_timeout(options.timeout)
            .with_max_response_chars(options.max_response_chars);

        Self {
            executor,
            context,
            info: ServerInfo::default(),
            max_frame_bytes: options.max_frame_bytes,
        }
    }

    pub fn with_info(mut self, info: ServerInfo) -> Self {
        self.info = info;
        self
    }

    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    pub fn context(&self) -> &ToolContext {
        &self.context
    }

    pub fn executor(&self) -> &ToolExecutor {
        &self.executor
    }

    /// Handle one request. Notifications yield `None`.
    pub async fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id.clone() else {
            debug!("Notification received: {}", request.method);
            return None;
        };

        let response = match request.method.as_str() {
            Methods::INITIALIZE => JsonRpcResponse::success(id, self.initialize_result(request.params.as_ref())),
            Methods::PING => JsonRpcResponse::success(id, json!({})),
            Methods::TOOLS_LIST => {
                if !self.context.session.session_started {
                    info!("Session not yet started - tools ready for initialization");
                }
                JsonRpcResponse::success(id, json!({ "tools": self.executor.definitions() }))
            }
            Methods::TOOLS_CALL => self.call_tool(id, request.params).await,
            other => {
                warn!("Unknown method: {}", other);
                JsonRpcResponse::error(id, JsonRpcError::method_not_found(other))
            }
        };

        Some(response)
    }

    fn initialize_result(&self, params: Option<&Value>) -> Value {
        let protocol_version = params
            .and_then(|p| p.get("protocolVersion"))
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_PROTOCOL_VERSION);

        info!("Initializing session with protocol version {}", protocol_version);

        json!({
            "protocolVersion": protocol_version,
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "serverInfo": {
                "name": self.info.name,
                "version": self.info.version
            }
        })
    }

    async fn call_tool(&mut self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = match params.map(serde_json::from_value).transpose() {
            Ok(Some(params)) => params,
            Ok(None) => return JsonRpcResponse::error(id, JsonRpcError::invalid_params("Missing params for tools/call")),
            Err(e) => {
                return JsonRpcResponse::error(id, JsonRpcError::invalid_params(format!("Invalid tools/call params: {}", e)));
            }
        };

        let input = params.arguments.unwrap_or(Value::Null);
        let result = self.executor.execute(&params.name, input, &mut self.context).await;

        match serde_json::to_value(CallToolResult::text(result.content, result.is_error)) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string())),
        }
    }

    /// Serve requests from `reader` until EOF, writing responses to `writer`.
    ///
    /// Requests are processed strictly one at a time.
    pub async fn run<R, W>(&mut self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut frames = FramedRead::new(reader, NdJsonCodec::<JsonRpcRequest>::with_max_length(self.max_frame_bytes));
        let mut sink = FramedWrite::new(writer, NdJsonCodec::<JsonRpcResponse>::with_max_length(self.max_frame_bytes));

        info!("Starting {} MCP server v{}", self.info.name, self.info.version);

        while let Some(frame) = frames.next().await {
            let frame = frame.map_err(|e| match e.kind() {
                std::io::ErrorKind::InvalidData => MembankError::Protocol(e.to_string()),
                _ => MembankError::Io(e),
            })?;

            let response = match frame {
                Decoded::Message(request) => self.handle_request(request).await,
                Decoded::Malformed(e) => {
                    warn!("Malformed message: {}", e);
                    Some(malformed_response(&e))
                }
            };

            if let Some(response) = response {
                if !response.is_success() {
                    debug!("Replying with error to id {}", response.id);
                }
                sink.send(response).await?;
            }
        }

        info!("Input closed, shutting down");
        Ok(())
    }
}

/// Error response for a line that could not be read as a request
fn malformed_response(err: &serde_json::Error) -> JsonRpcResponse {
    let error = if err.is_data() {
        JsonRpcError::invalid_request(format!("Invalid request: {}", err))
    } else {
        JsonRpcError::parse_error(format!("Parse error: {}", err))
    };
    JsonRpcResponse::error(Value::Null, error)
}
