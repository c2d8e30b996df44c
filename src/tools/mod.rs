//! Tool system exposed over MCP
//!
//! Each tool is a leaf handler: parse arguments, read or mutate the session
//! carried in `ToolContext`, and return text. `ToolExecutor` owns the registry
//! and applies the timeout and response-size cap around every call.

mod context;
mod database_status;
mod executor;
mod help;
mod off_the_record;
mod replay;
mod save_this;
mod search_content;
mod session_status;
mod start_session;

pub use context::ToolContext;
pub use executor::{DEFAULT_MAX_RESPONSE_CHARS, DEFAULT_TOOL_TIMEOUT, ToolExecutor, truncate_response};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{MembankError, Result};

/// A tool that can be called by the client
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (matches `tools/call` name)
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value;

    /// Execute the tool against the session in `ctx`
    async fn execute(&self, input: Value, ctx: &mut ToolContext) -> Result<ToolResult>;
}

/// Result from tool execution
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub content: String,
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: true,
        }
    }
}

/// Tool descriptor returned by `tools/list`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Arguments of tools that take none
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NoArgs {}

/// Deserialize tool arguments; absent arguments are treated as `{}`.
fn parse_args<T: DeserializeOwned>(input: Value) -> Result<T> {
    let input = if input.is_null() { Value::Object(Default::default()) } else { input };
    serde_json::from_value(input).map_err(|e| MembankError::InvalidArguments(e.to_string()))
}

pub use database_status::DatabaseStatusTool;
pub use help::HelpTool;
pub use off_the_record::OffTheRecordTool;
pub use replay::ReplayTool;
pub use save_this::SaveThisTool;
pub use search_content::SearchContentTool;
pub use session_status::SessionStatusTool;
pub use start_session::StartSessionTool;
