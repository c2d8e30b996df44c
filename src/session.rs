//! Session record and captured exchanges
//!
//! A `SessionState` lives for the lifetime of one server process. It is passed
//! explicitly to every tool handler and is never written to storage.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::id::generate_exchange_id;

/// How an exchange was captured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMethod {
    /// Captured through the `save_this` tool
    ManualSaveThis,
}

impl CaptureMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureMethod::ManualSaveThis => "manual_save_this",
        }
    }
}

impl std::fmt::Display for CaptureMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One captured unit of conversation text plus metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    /// `exch-` prefixed identifier
    pub id: String,
    /// Captured response text
    pub response_text: String,
    /// Optional note supplied by the user
    pub user_note: Option<String>,
    pub capture_method: CaptureMethod,
    pub created_at: DateTime<Local>,
}

impl Exchange {
    /// Create a new exchange stamped with a fresh ID and the current time.
    ///
    /// Blank notes are normalized to `None`.
    pub fn new(response_text: impl Into<String>, user_note: Option<String>, capture_method: CaptureMethod) -> Self {
        Self {
            id: generate_exchange_id(),
            response_text: response_text.into(),
            user_note: user_note.filter(|n| !n.trim().is_empty()),
            capture_method,
            created_at: Local::now(),
        }
    }
}

/// Why a save was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    /// The user opted out when the session started
    RecordingDisabled,
    /// Off-the-record mode is active
    OffTheRecord,
}

impl Refusal {
    /// User-facing refusal text
    pub fn message(&self) -> &'static str {
        match self {
            Refusal::RecordingDisabled => "🔴 Recording disabled. Enable recording first.",
            Refusal::OffTheRecord => "🔴 Off the record mode. Use normal mode to save.",
        }
    }
}

/// Mutable per-process session flags
#[derive(Debug, Clone)]
pub struct SessionState {
    pub recording_enabled: bool,
    pub off_the_record: bool,
    pub session_started: bool,
    pub last_exchange: Option<Exchange>,
    pub project_name: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            recording_enabled: true,
            off_the_record: false,
            session_started: false,
            last_exchange: None,
            project_name: None,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the session started for a project
    pub fn start(&mut self, project_name: impl Into<String>, opt_out: bool) {
        self.project_name = Some(project_name.into());
        self.session_started = true;
        self.recording_enabled = !opt_out;
    }

    pub fn set_off_the_record(&mut self, enable: bool) {
        self.off_the_record = enable;
    }

    /// Check whether a save may proceed. Recording-disabled wins over off-the-record.
    pub fn can_record(&self) -> std::result::Result<(), Refusal> {
        if !self.recording_enabled {
            return Err(Refusal::RecordingDisabled);
        }
        if self.off_the_record {
            return Err(Refusal::OffTheRecord);
        }
        Ok(())
    }

    /// Retain an exchange, replacing any previous one
    pub fn record(&mut self, exchange: Exchange) {
        self.last_exchange = Some(exchange);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = SessionState::new();
        assert!(state.recording_enabled);
        assert!(!state.off_the_record);
        assert!(!state.session_started);
        assert!(state.last_exchange.is_none());
        assert!(state.project_name.is_none());
    }

    #[test]
    fn test_start_records_by_default() {
        let mut state = SessionState::new();
        state.start("atlas", false);
        assert_eq!(state.project_name.as_deref(), Some("atlas"));
        assert!(state.session_started);
        assert!(state.recording_enabled);
    }

    #[test]
    fn test_start_with_opt_out_disables_recording() {
        let mut state = SessionState::new();
        state.start("atlas", true);
        assert!(state.session_started);
        assert!(!state.recording_enabled);
        assert_eq!(state.can_record(), Err(Refusal::RecordingDisabled));
    }

    #[test]
    fn test_off_the_record_refuses() {
        let mut state = SessionState::new();
        state.set_off_the_record(true);
        assert_eq!(state.can_record(), Err(Refusal::OffTheRecord));

        state.set_off_the_record(false);
        assert_eq!(state.can_record(), Ok(()));
    }

    #[test]
    fn test_recording_disabled_checked_first() {
        let mut state = SessionState::new();
        state.start("atlas", true);
        state.set_off_the_record(true);
        assert_eq!(state.can_record(), Err(Refusal::RecordingDisabled));
    }

    #[test]
    fn test_record_keeps_only_latest() {
        let mut state = SessionState::new();
        let first = Exchange::new("first", None, CaptureMethod::ManualSaveThis);
        let second = Exchange::new("second", None, CaptureMethod::ManualSaveThis);
        let second_id = second.id.clone();

        state.record(first);
        state.record(second);

        let last = state.last_exchange.unwrap();
        assert_eq!(last.id, second_id);
        assert_eq!(last.response_text, "second");
    }

    #[test]
    fn test_exchange_blank_note_is_none() {
        let exchange = Exchange::new("text", Some("   ".to_string()), CaptureMethod::ManualSaveThis);
        assert!(exchange.user_note.is_none());

        let exchange = Exchange::new("text", Some("keep".to_string()), CaptureMethod::ManualSaveThis);
        assert_eq!(exchange.user_note.as_deref(), Some("keep"));
    }

    #[test]
    fn test_capture_method_serialization() {
        let json = serde_json::to_string(&CaptureMethod::ManualSaveThis).unwrap();
        assert_eq!(json, "\"manual_save_this\"");
        assert_eq!(CaptureMethod::ManualSaveThis.to_string(), "manual_save_this");
    }
}
