//! Read-only inspection of the SQLite context database.

use rusqlite::{Connection, OpenFlags};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Snapshot of the backing store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseStatus {
    pub path: PathBuf,
    pub size_bytes: u64,
    /// Table names, sorted
    pub tables: Vec<String>,
}

/// Inspect the database at `path`.
///
/// Returns `Ok(None)` when the file does not exist. The file is opened
/// read-only and never created or modified.
pub fn database_status(path: &Path) -> Result<Option<DatabaseStatus>> {
    if !path.exists() {
        return Ok(None);
    }

    let size_bytes = fs::metadata(path)?.len();
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX)?;

    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
    let tables = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(Some(DatabaseStatus {
        path: path.to_path_buf(),
        size_bytes,
        tables,
    }))
}

/// Human-readable byte count
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_db(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("context.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE sessions (id TEXT PRIMARY KEY, project TEXT);
            CREATE TABLE exchanges (id TEXT PRIMARY KEY, body TEXT NOT NULL);
            CREATE INDEX idx_exchanges_body ON exchanges(body);
            "#,
        )
        .unwrap();
        path
    }

    #[test]
    fn test_missing_database() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.db");
        assert!(database_status(&path).unwrap().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_lists_tables_sorted() {
        let dir = TempDir::new().unwrap();
        let path = create_db(&dir);

        let status = database_status(&path).unwrap().unwrap();
        assert_eq!(status.tables, vec!["exchanges".to_string(), "sessions".to_string()]);
        assert_eq!(status.path, path);
        assert!(status.size_bytes > 0);
    }

    #[test]
    fn test_empty_database_has_no_tables() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.db");
        Connection::open(&path).unwrap().execute_batch("PRAGMA user_version = 1;").unwrap();

        let status = database_status(&path).unwrap().unwrap();
        assert!(status.tables.is_empty());
    }

    #[test]
    fn test_not_a_database() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.db");
        fs::write(&path, "plain text, not sqlite\n".repeat(200)).unwrap();

        assert!(database_status(&path).is_err());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024 + 512 * 1024), "3.5 MB");
    }
}
