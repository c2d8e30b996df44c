//! off_the_record tool - toggle privacy mode

use async_trait::async_trait;
use log::info;
use serde::Deserialize;
use serde_json::Value;

use super::{Tool, ToolContext, ToolResult, parse_args};
use crate::error::Result;

fn default_enable() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OffTheRecordArgs {
    #[serde(default = "default_enable")]
    enable: bool,
}

pub struct OffTheRecordTool;

#[async_trait]
impl Tool for OffTheRecordTool {
    fn name(&self) -> &'static str {
        "off_the_record"
    }

    fn description(&self) -> &'static str {
        "Toggle off-the-record mode (stops recording)"
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "enable": {
                    "type": "boolean",
                    "description": "True to go off-the-record, False to resume recording",
                    "default": true
                }
            },
            "additionalProperties": false
        })
    }

    async fn execute(&self, input: Value, ctx: &mut ToolContext) -> Result<ToolResult> {
        let args: OffTheRecordArgs = parse_args(input)?;
        ctx.session.set_off_the_record(args.enable);
        info!("Off-the-record: {}", args.enable);

        let text = if args.enable {
            "🔴 **Off The Record Mode ENABLED**\n\n\
             Your exchanges will NOT be saved until you resume recording.\n\
             Call `off_the_record` with enable=false to resume."
        } else {
            "🟢 **Recording RESUMED**\n\n\
             Your exchanges will now be saved to memory bank.\n\
             Use `save_this` to manually capture important exchanges."
        };

        Ok(ToolResult::success(text))
    }
}
