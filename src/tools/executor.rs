//! Tool executor - manages tool registration and execution

use std::time::Duration;

use log::{error, info};
use serde_json::Value;

use super::{
    DatabaseStatusTool, HelpTool, OffTheRecordTool, ReplayTool, SaveThisTool, SearchContentTool, SessionStatusTool,
    StartSessionTool, Tool, ToolContext, ToolDefinition, ToolResult,
};
use crate::error::MembankError;

/// Default limit for a single tool call
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Default cap on response text, in characters
pub const DEFAULT_MAX_RESPONSE_CHARS: usize = 10_000;

/// Manages tool execution for the server
pub struct ToolExecutor {
    /// Registration order is listing order
    tools: Vec<Box<dyn Tool>>,
    timeout: Duration,
    max_response_chars: usize,
}

impl ToolExecutor {
    /// Create executor with standard tools
    pub fn standard() -> Self {
        let mut executor = Self::new();

        // Session recording
        executor.add_tool(Box::new(StartSessionTool));
        executor.add_tool(Box::new(SaveThisTool));
        executor.add_tool(Box::new(ReplayTool));
        executor.add_tool(Box::new(OffTheRecordTool));
        executor.add_tool(Box::new(SessionStatusTool));

        // Help and database
        executor.add_tool(Box::new(HelpTool));
        executor.add_tool(Box::new(DatabaseStatusTool));
        executor.add_tool(Box::new(SearchContentTool));

        executor
    }

    /// Create an empty executor (for custom tool sets)
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            timeout: DEFAULT_TOOL_TIMEOUT,
            max_response_chars: DEFAULT_MAX_RESPONSE_CHARS,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_response_chars(mut self, max_chars: usize) -> Self {
        self.max_response_chars = max_chars;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Add a tool, replacing any tool with the same name
    pub fn add_tool(&mut self, tool: Box<dyn Tool>) {
        match self.tools.iter().position(|t| t.name() == tool.name()) {
            Some(idx) => self.tools[idx] = tool,
            None => self.tools.push(tool),
        }
    }

    fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.iter().find(|t| t.name() == name).map(|t| t.as_ref())
    }

    /// Get tool definitions for `tools/list`
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                input_schema: t.input_schema(),
            })
            .collect()
    }

    /// Execute a tool call.
    ///
    /// Never fails: unknown tools, handler errors and timeouts all come back as
    /// error results with user-facing text.
    pub async fn execute(&self, name: &str, input: Value, ctx: &mut ToolContext) -> ToolResult {
        if name.is_empty() {
            return ToolResult::error("❌ Tool name must be a non-empty string");
        }

        info!("Processing tool call: {}", name);

        let Some(tool) = self.get(name) else {
            let err = MembankError::UnknownTool(name.to_string());
            error!("{}", err);
            return ToolResult::error(format!("❌ Tool {} failed: {}", name, err));
        };

        let result = match tokio::time::timeout(self.timeout, tool.execute(input, ctx)).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                error!("Tool {} failed: {}", name, e);
                ToolResult::error(format!("❌ Tool {} failed: {}", name, e))
            }
            Err(_) => {
                let err = MembankError::ToolTimeout {
                    name: name.to_string(),
                    timeout_ms: self.timeout.as_millis() as u64,
                };
                error!("{}", err);
                ToolResult::error(format!("🕐 {}", err))
            }
        };

        ToolResult {
            content: truncate_response(result.content, self.max_response_chars),
            is_error: result.is_error,
        }
    }

    /// Check if a tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Get the list of tool names, in listing order
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }
}

impl Default for ToolExecutor {
    fn default() -> Self {
        Self::standard()
    }
}

/// Cap `content` at `max_chars` characters, noting the original length
pub fn truncate_response(content: String, max_chars: usize) -> String {
    let total = content.chars().count();
    if total <= max_chars {
        return content;
    }
    let kept: String = content.chars().take(max_chars).collect();
    format!("{}...\n[truncated, {} chars total]", kept, total)
}
