//! session_status tool - report recording state

use async_trait::async_trait;
use serde_json::Value;

use super::{NoArgs, Tool, ToolContext, ToolResult, parse_args};
use crate::error::Result;
use crate::id::short_id;

pub struct SessionStatusTool;

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

#[async_trait]
impl Tool for SessionStatusTool {
    fn name(&self) -> &'static str {
        "session_status"
    }

    fn description(&self) -> &'static str {
        "Check current recording status and session info"
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {},
            "additionalProperties": false
        })
    }

    async fn execute(&self, input: Value, ctx: &mut ToolContext) -> Result<ToolResult> {
        let _: NoArgs = parse_args(input)?;
        let session = &ctx.session;

        let emoji = if session.recording_enabled { "🟢" } else { "🔴" };
        let recording = if session.recording_enabled { "Enabled" } else { "Disabled" };
        let mode = if session.off_the_record { "OFF THE RECORD" } else { "RECORDING" };
        let last = session
            .last_exchange
            .as_ref()
            .map(|e| short_id(&e.id).to_string())
            .unwrap_or_else(|| "None".to_string());

        let text = format!(
            "{emoji} **Session Status**\n\n\
             **Project:** {}\n\
             **Recording:** {recording}\n\
             **Mode:** {mode}\n\
             **Last Exchange:** {last}\n\n\
             **Database:** {}\n\
             **Session Started:** {}",
            session.project_name.as_deref().unwrap_or("Not set"),
            ctx.database_path.display(),
            yes_no(session.session_started),
        );

        Ok(ToolResult::success(text))
    }
}
