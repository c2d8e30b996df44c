//! Clipboard capture through AppleScript automation

use async_trait::async_trait;
use log::{info, warn};
use std::time::Duration;

use super::ResponseCapture;
use super::script::ScriptRunner;
use crate::error::Result;

/// Default application whose last response is copied
pub const DEFAULT_APP_NAME: &str = "Claude";

/// Script that reads the clipboard without touching any application
pub const CLIPBOARD_SCRIPT: &str = "return the clipboard as string";

/// Script used to probe that the interpreter works at all
const PROBE_SCRIPT: &str = "return \"test\"";

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Build the script that focuses the app, sends the copy-response shortcut
/// (cmd+shift+C) and returns the clipboard.
pub fn copy_response_script(app_name: &str) -> String {
    format!(
        r#"tell application "{app_name}"
    activate
    delay 0.5
    key code 8 using {{command down, shift down}}
    delay 0.2
end tell

delay 0.5
return the clipboard as string"#
    )
}

/// Build the script that asks System Events whether `app_name` is running
pub fn app_running_script(app_name: &str) -> String {
    format!(
        r#"tell application "System Events"
    return (count of processes whose name is "{app_name}") > 0
end tell"#
    )
}

/// Whether the chat app process is running. Errors mean the query itself failed.
pub async fn app_running(runner: &ScriptRunner, app_name: &str) -> Result<bool> {
    let probe = runner.clone().with_timeout(PROBE_TIMEOUT);
    let output = probe.run(&app_running_script(app_name)).await?;
    Ok(parse_running(&output))
}

fn parse_running(output: &str) -> bool {
    output.eq_ignore_ascii_case("true")
}

/// Captures the chat app's last response via the clipboard
pub struct OsascriptCapture {
    runner: ScriptRunner,
    primary_script: String,
    fallback_script: String,
}

impl OsascriptCapture {
    pub fn new(runner: ScriptRunner, app_name: &str) -> Self {
        Self {
            runner,
            primary_script: copy_response_script(app_name),
            fallback_script: CLIPBOARD_SCRIPT.to_string(),
        }
    }

    /// Replace both scripts (used with non-AppleScript interpreters)
    pub fn with_scripts(mut self, primary: impl Into<String>, fallback: impl Into<String>) -> Self {
        self.primary_script = primary.into();
        self.fallback_script = fallback.into();
        self
    }

    pub fn runner(&self) -> &ScriptRunner {
        &self.runner
    }
}

#[async_trait]
impl ResponseCapture for OsascriptCapture {
    async fn capture(&self) -> Result<String> {
        let primary = self.runner.run(&self.primary_script).await?;
        if !primary.is_empty() {
            return Ok(primary);
        }

        warn!("Copy-response script returned nothing, reading clipboard directly");
        self.runner.run(&self.fallback_script).await
    }
}

/// Check whether the interpreter can run a trivial script
pub async fn probe_interpreter(runner: &ScriptRunner) -> bool {
    let probe = runner.clone().with_timeout(PROBE_TIMEOUT);
    match probe.run(PROBE_SCRIPT).await {
        Ok(_) => {
            info!("{} available", runner.interpreter());
            true
        }
        Err(e) => {
            warn!("{} not available - capture disabled: {}", runner.interpreter(), e);
            false
        }
    }
}

/// Set the clipboard to `marker` and read it back, returning whether it matched
pub async fn clipboard_roundtrip(runner: &ScriptRunner, marker: &str) -> Result<bool> {
    let escaped = marker.replace('\\', "\\\\").replace('"', "\\\"");
    runner.run(&format!("set the clipboard to \"{}\"", escaped)).await?;
    let readback = runner.run(CLIPBOARD_SCRIPT).await?;
    Ok(readback.contains(marker))
}
