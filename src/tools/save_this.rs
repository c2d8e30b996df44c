//! save_this tool - capture the current exchange into the session

use async_trait::async_trait;
use log::{error, info};
use serde::Deserialize;
use serde_json::Value;

use super::{Tool, ToolContext, ToolResult, parse_args};
use crate::error::Result;
use crate::id::short_id;
use crate::session::{CaptureMethod, Exchange};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SaveThisArgs {
    #[serde(default)]
    note: Option<String>,
}

pub struct SaveThisTool;

#[async_trait]
impl Tool for SaveThisTool {
    fn name(&self) -> &'static str {
        "save_this"
    }

    fn description(&self) -> &'static str {
        "Manually save the current exchange to memory bank"
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "note": {
                    "type": "string",
                    "description": "Optional note about why this exchange is important",
                    "default": ""
                }
            },
            "additionalProperties": false
        })
    }

    async fn execute(&self, input: Value, ctx: &mut ToolContext) -> Result<ToolResult> {
        let args: SaveThisArgs = parse_args(input)?;

        if let Err(refusal) = ctx.session.can_record() {
            info!("Save refused: {:?}", refusal);
            return Ok(ToolResult::success(refusal.message()));
        }

        // A failed capture is still saved, with the failure as its text
        let response_text = match ctx.capture.capture().await {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to capture response: {}", e);
                format!("[Capture failed: {}]", e)
            }
        };

        let exchange = Exchange::new(response_text, args.note, CaptureMethod::ManualSaveThis);
        info!(
            "Exchange captured: {} ({} chars)",
            short_id(&exchange.id),
            exchange.response_text.chars().count()
        );
        ctx.session.record(exchange);

        Ok(ToolResult::success("✅ Done."))
    }
}
