//! start_session tool - name the project and choose whether to record

use async_trait::async_trait;
use log::info;
use serde::Deserialize;
use serde_json::Value;

use super::{Tool, ToolContext, ToolResult, parse_args};
use crate::error::{MembankError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StartSessionArgs {
    project_name: String,
    #[serde(default)]
    opt_out: bool,
}

pub struct StartSessionTool;

#[async_trait]
impl Tool for StartSessionTool {
    fn name(&self) -> &'static str {
        "start_session"
    }

    fn description(&self) -> &'static str {
        "Initialize session recording for a project"
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "project_name": {
                    "type": "string",
                    "description": "Name of the project for this session"
                },
                "opt_out": {
                    "type": "boolean",
                    "description": "Set to true to opt out of recording",
                    "default": false
                }
            },
            "required": ["project_name"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, input: Value, ctx: &mut ToolContext) -> Result<ToolResult> {
        let args: StartSessionArgs = parse_args(input)?;
        let project_name = args.project_name.trim();
        if project_name.is_empty() {
            return Err(MembankError::InvalidArguments("Project name is required".into()));
        }

        ctx.session.start(project_name, args.opt_out);
        info!("Session started for {} (recording: {})", project_name, !args.opt_out);

        let text = if args.opt_out {
            format!(
                "🔴 **Session Started: {project_name}**\n\n\
                 Recording is **DISABLED** (opted out).\n\
                 Your conversations will not be saved to memory bank.\n\n\
                 Call `start_session` again without `opt_out` to enable recording."
            )
        } else {
            format!(
                "🎯 **Session Started: {project_name}**\n\n\
                 📹 **Conversations are being recorded for posterity.**\n\n\
                 **Available commands:**\n\
                 • `save_this` - Manually save current exchange\n\
                 • `replay` - Show last recorded exchange\n\
                 • `off_the_record` - Toggle privacy mode\n\
                 • `session_status` - Check recording status\n\n\
                 To pause recording, call `off_the_record`."
            )
        };

        Ok(ToolResult::success(text))
    }
}
