//! help tool - static usage text

use async_trait::async_trait;
use serde_json::Value;

use super::{NoArgs, Tool, ToolContext, ToolResult, parse_args};
use crate::error::Result;

const HELP_TEXT: &str = "📚 **Memory Bank Help**

**Session recording:**
• `start_session` - Start a session for a project (`project_name`, optional `opt_out`)
• `save_this` - Save the current exchange (optional `note`)
• `replay` - Show the last recorded exchange
• `off_the_record` - Pause recording (`enable=false` resumes)
• `session_status` - Show recording state and project

**Database:**
• `database_status` - Show database location, size and tables
• `search_content` - Search saved content (`query`, optional `limit` 1-100)

Only the most recent exchange is kept, and only while the server runs.";

pub struct HelpTool;

#[async_trait]
impl Tool for HelpTool {
    fn name(&self) -> &'static str {
        "help"
    }

    fn description(&self) -> &'static str {
        "Show available memory bank commands"
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {},
            "additionalProperties": false
        })
    }

    async fn execute(&self, input: Value, _ctx: &mut ToolContext) -> Result<ToolResult> {
        let _: NoArgs = parse_args(input)?;
        Ok(ToolResult::success(HELP_TEXT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::MockCapture;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_help_lists_every_tool() {
        let mut ctx = ToolContext::new(Arc::new(MockCapture::new("captured")), "context.db");
        let result = HelpTool.execute(serde_json::json!({}), &mut ctx).await.unwrap();

        for name in [
            "start_session",
            "save_this",
            "replay",
            "off_the_record",
            "session_status",
            "database_status",
            "search_content",
        ] {
            assert!(result.content.contains(name), "help is missing {}", name);
        }
    }
}
