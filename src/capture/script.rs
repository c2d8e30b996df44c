//! Script runner - invoke an OS scripting interpreter with a literal script

use std::process::Stdio;
use std::time::Duration;

use log::{debug, error};
use tokio::process::Command;

use crate::error::{MembankError, Result};

/// Default interpreter for automation scripts
pub const DEFAULT_INTERPRETER: &str = "osascript";

/// Flag that introduces an inline script for the interpreter
pub const DEFAULT_SCRIPT_FLAG: &str = "-e";

/// Default script timeout
pub const DEFAULT_SCRIPT_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs inline scripts through an external interpreter
#[derive(Debug, Clone)]
pub struct ScriptRunner {
    interpreter: String,
    script_flag: String,
    timeout: Duration,
}

impl ScriptRunner {
    pub fn new(interpreter: impl Into<String>, script_flag: impl Into<String>, timeout: Duration) -> Self {
        Self {
            interpreter: interpreter.into(),
            script_flag: script_flag.into(),
            timeout,
        }
    }

    /// Set the timeout for a single script run
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run a script and return its trimmed stdout.
    ///
    /// A nonzero exit status becomes `ScriptFailed` carrying the trimmed stderr.
    /// The child is killed if the timeout elapses.
    pub async fn run(&self, script: &str) -> Result<String> {
        let timeout_ms = self.timeout.as_millis() as u64;
        debug!("Running {} script ({} chars)", self.interpreter, script.len());

        let output = tokio::time::timeout(
            self.timeout,
            Command::new(&self.interpreter)
                .arg(&self.script_flag)
                .arg(script)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| {
            error!("{} execution timed out after {}ms", self.interpreter, timeout_ms);
            MembankError::ScriptTimeout { timeout_ms }
        })??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let code = output.status.code().unwrap_or(-1);
            error!("{} failed with exit code {}: {}", self.interpreter, code, stderr);
            return Err(MembankError::ScriptFailed { code, stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Default for ScriptRunner {
    fn default() -> Self {
        Self::new(DEFAULT_INTERPRETER, DEFAULT_SCRIPT_FLAG, DEFAULT_SCRIPT_TIMEOUT)
    }
}
