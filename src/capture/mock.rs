//! In-process capture double for tests and dry runs

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::ResponseCapture;
use crate::error::{MembankError, Result};

/// Capture that returns canned text (or a canned failure) without touching the OS
pub struct MockCapture {
    outcome: std::result::Result<String, String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockCapture {
    /// Capture that always returns `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            outcome: Ok(text.into()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Capture that always fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Sleep before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of times `capture` was called
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResponseCapture for MockCapture {
    async fn capture(&self) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.clone().map_err(MembankError::Capture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_text_and_counts() {
        let mock = MockCapture::new("captured");
        assert_eq!(mock.capture().await.unwrap(), "captured");
        assert_eq!(mock.capture().await.unwrap(), "captured");
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let mock = MockCapture::failing("no clipboard");
        let err = mock.capture().await.unwrap_err();
        assert_eq!(err.to_string(), "Capture error: no clipboard");
    }
}
