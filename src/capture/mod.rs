//! Response capture
//!
//! The `save_this` tool needs the text of the chat client's last response.
//! That text is obtained through a `ResponseCapture` implementation:
//! - `OsascriptCapture`: drives the desktop app and reads the clipboard
//! - `MockCapture`: canned responses for tests

mod mock;
mod osascript;
mod script;

pub use mock::MockCapture;
pub use osascript::{
    CLIPBOARD_SCRIPT, DEFAULT_APP_NAME, OsascriptCapture, app_running, app_running_script, clipboard_roundtrip,
    copy_response_script, probe_interpreter,
};
pub use script::{DEFAULT_INTERPRETER, DEFAULT_SCRIPT_FLAG, DEFAULT_SCRIPT_TIMEOUT, ScriptRunner};

use async_trait::async_trait;

use crate::error::Result;

/// Source of the most recent response text
#[async_trait]
pub trait ResponseCapture: Send + Sync {
    /// Capture the response, returning its trimmed text
    async fn capture(&self) -> Result<String>;
}
