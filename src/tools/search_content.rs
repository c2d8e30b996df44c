//! search_content tool - placeholder for full-text search

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{Tool, ToolContext, ToolResult, parse_args};
use crate::error::{MembankError, Result};

const MIN_LIMIT: u32 = 1;
const MAX_LIMIT: u32 = 100;
const DEFAULT_LIMIT: u32 = 20;

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SearchArgs {
    query: String,
    #[serde(default = "default_limit")]
    limit: u32,
}

pub struct SearchContentTool;

#[async_trait]
impl Tool for SearchContentTool {
    fn name(&self) -> &'static str {
        "search_content"
    }

    fn description(&self) -> &'static str {
        "Search saved memory bank content"
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Text to search for"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of results",
                    "minimum": MIN_LIMIT,
                    "maximum": MAX_LIMIT,
                    "default": DEFAULT_LIMIT
                }
            },
            "required": ["query"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, input: Value, _ctx: &mut ToolContext) -> Result<ToolResult> {
        let args: SearchArgs = parse_args(input)?;
        let query = args.query.trim();
        if query.is_empty() {
            return Err(MembankError::InvalidArguments("Query is required".into()));
        }
        if !(MIN_LIMIT..=MAX_LIMIT).contains(&args.limit) {
            return Err(MembankError::InvalidArguments(format!(
                "limit must be between {} and {}, got {}",
                MIN_LIMIT, MAX_LIMIT, args.limit
            )));
        }

        // TODO: query the exchanges table once exchanges are written to the database
        Ok(ToolResult::success(format!(
            "🔍 **Search: \"{query}\"** (limit {})\n\n\
             Search is not implemented yet.\n\
             Planned: full-text search over saved exchanges, returning up to {} matches \
             with exchange ID, timestamp and a snippet of the response.",
            args.limit, args.limit
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::MockCapture;
    use std::sync::Arc;

    fn ctx() -> ToolContext {
        ToolContext::new(Arc::new(MockCapture::new("captured")), "context.db")
    }

    #[tokio::test]
    async fn test_search_placeholder_defaults() {
        let mut ctx = ctx();
        let result = SearchContentTool
            .execute(serde_json::json!({"query": "rust traits"}), &mut ctx)
            .await
            .unwrap();

        assert!(!result.is_error);
        assert!(result.content.contains("\"rust traits\""));
        assert!(result.content.contains("(limit 20)"));
        assert!(result.content.contains("not implemented"));
    }

    #[tokio::test]
    async fn test_search_custom_limit() {
        let mut ctx = ctx();
        let result = SearchContentTool
            .execute(serde_json::json!({"query": "x", "limit": 100}), &mut ctx)
            .await
            .unwrap();
        assert!(result.content.contains("(limit 100)"));
    }

    #[tokio::test]
    async fn test_search_limit_out_of_range() {
        let mut ctx = ctx();
        for limit in [0, 101] {
            let err = SearchContentTool
                .execute(serde_json::json!({"query": "x", "limit": limit}), &mut ctx)
                .await
                .unwrap_err();
            assert!(err.to_string().contains("between 1 and 100"));
        }
    }

    #[tokio::test]
    async fn test_search_requires_query() {
        let mut ctx = ctx();
        assert!(SearchContentTool.execute(serde_json::json!({}), &mut ctx).await.is_err());
        assert!(
            SearchContentTool
                .execute(serde_json::json!({"query": "  "}), &mut ctx)
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_search_negative_limit_rejected() {
        let mut ctx = ctx();
        let result = SearchContentTool
            .execute(serde_json::json!({"query": "x", "limit": -5}), &mut ctx)
            .await;
        assert!(matches!(result, Err(MembankError::InvalidArguments(_))));
    }
}
