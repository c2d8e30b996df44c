//! replay tool - show the last recorded exchange

use async_trait::async_trait;
use serde_json::Value;

use super::{NoArgs, Tool, ToolContext, ToolResult, parse_args};
use crate::error::Result;
use crate::id::short_id;
use crate::session::Exchange;

/// Characters of response text shown in a replay
const PREVIEW_CHARS: usize = 500;

pub struct ReplayTool;

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() { format!("{}...", head) } else { head }
}

fn format_exchange(exchange: &Exchange) -> String {
    format!(
        "🔄 **Last Recorded Exchange**\n\n\
         **UUID:** {}...\n\
         **Timestamp:** {}\n\
         **Method:** {}\n\n\
         **Response:**\n{}\n\n\
         **Note:** {}",
        short_id(&exchange.id),
        exchange.created_at.to_rfc3339(),
        exchange.capture_method,
        preview(&exchange.response_text),
        exchange.user_note.as_deref().unwrap_or("None"),
    )
}

#[async_trait]
impl Tool for ReplayTool {
    fn name(&self) -> &'static str {
        "replay"
    }

    fn description(&self) -> &'static str {
        "Show the last recorded exchange from memory bank"
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

        Ok(match &ctx.session.last_exchange {
            Some(exchange) => ToolResult::success(format_exchange(exchange)),
            None => ToolResult::success("📭 No exchanges recorded yet."),
        })
    }
}
