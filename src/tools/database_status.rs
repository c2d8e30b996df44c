//! database_status tool - report on the context database

use async_trait::async_trait;
use serde_json::Value;

use super::{NoArgs, Tool, ToolContext, ToolResult, parse_args};
use crate::error::Result;
use crate::store::{DatabaseStatus, database_status, format_size};

pub struct DatabaseStatusTool;

fn format_status(status: &DatabaseStatus) -> String {
    let tables = if status.tables.is_empty() {
        "none".to_string()
    } else {
        status.tables.join(", ")
    };

    format!(
        "🗄️ **Database Status**\n\n\
         **Path:** {}\n\
         **Size:** {}\n\
         **Tables ({}):** {}",
        status.path.display(),
        format_size(status.size_bytes),
        status.tables.len(),
        tables,
    )
}

#[async_trait]
impl Tool for DatabaseStatusTool {
    fn name(&self) -> &'static str {
        "database_status"
    }

    fn description(&self) -> &'static str {
        "Check memory bank database location, size and tables"
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

        Ok(match database_status(ctx.database_path())? {
            Some(status) => ToolResult::success(format_status(&status)),
            None => ToolResult::success(format!(
                "📭 Database not found at {}",
                ctx.database_path().display()
            )),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::MockCapture;
    use rusqlite::Connection;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn ctx(path: &std::path::Path) -> ToolContext {
        ToolContext::new(Arc::new(MockCapture::new("captured")), path)
    }

    #[tokio::test]
    async fn test_database_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("context.db");
        let mut ctx = ctx(&path);

        let result = DatabaseStatusTool.execute(serde_json::json!({}), &mut ctx).await.unwrap();
        assert!(result.content.starts_with("📭 Database not found at"));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_database_lists_tables() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("context.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE exchanges (id TEXT); CREATE TABLE projects (id TEXT);")
            .unwrap();
        let mut ctx = ctx(&path);

        let result = DatabaseStatusTool.execute(serde_json::json!({}), &mut ctx).await.unwrap();
        assert!(result.content.contains("**Tables (2):** exchanges, projects"));
        assert!(result.content.contains("**Size:**"));
    }

    #[tokio::test]
    async fn test_empty_database() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("context.db");
        Connection::open(&path).unwrap().execute_batch("PRAGMA user_version = 1;").unwrap();
        let mut ctx = ctx(&path);

        let result = DatabaseStatusTool.execute(serde_json::json!({}), &mut ctx).await.unwrap();
        assert!(result.content.contains("**Tables (0):** none"));
    }
}
