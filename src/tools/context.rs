//! Tool execution context - the session and its collaborators

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::capture::ResponseCapture;
use crate::session::SessionState;

/// Everything a tool handler may read or mutate
pub struct ToolContext {
    /// Session flags and the last captured exchange
    pub session: SessionState,

    /// Port used by `save_this` to obtain response text
    pub capture: Arc<dyn ResponseCapture>,

    /// Location of the context database
    pub database_path: PathBuf,
}

impl ToolContext {
    /// Context with a fresh session
    pub fn new(capture: Arc<dyn ResponseCapture>, database_path: impl Into<PathBuf>) -> Self {
        Self::with_session(SessionState::new(), capture, database_path)
    }

    /// Context around an existing session
    pub fn with_session(
        session: SessionState,
        capture: Arc<dyn ResponseCapture>,
        database_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            session,
            capture,
            database_path: database_path.into(),
        }
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }
}
