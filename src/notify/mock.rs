//! Mock notification sink for testing.

use crate::core::NotifyError;
use crate::notify::events::ScanEvent;
use crate::notify::traits::NotificationSink;

use async_trait::async_trait;
use std::sync::RwLock;

/// A mock sink that records every delivered event.
///
/// # Examples
///
/// ```rust
/// use scanrelay::notify::MockSink;
///
/// let sink = MockSink::new();
/// // ... run a scan with the sink attached ...
/// assert_eq!(sink.sent_count(), 0);
/// ```
#[derive(Debug)]
pub struct MockSink {
    /// Name of this sink instance.
    name: String,
    /// Events delivered so far.
    events: RwLock<Vec<ScanEvent>>,
    /// If set, every send fails with this message.
    failure: RwLock<Option<String>>,
}

impl MockSink {
    /// Creates a new mock sink that accepts every event.
    pub fn new() -> Self {
        Self {
            name: "mock-sink".to_string(),
            events: RwLock::new(Vec::new()),
            failure: RwLock::new(None),
        }
    }

    /// Sets the name of this sink.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Makes every send fail with the given message.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        *self
            .failure
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(message.into());
        self
    }

    /// Returns the events delivered so far.
    pub fn events(&self) -> Vec<ScanEvent> {
        self.events
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Returns the number of events delivered so far.
    pub fn sent_count(&self) -> usize {
        self.events
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl Default for MockSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationSink for MockSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, event: &ScanEvent) -> Result<(), NotifyError> {
        if let Some(message) = self
            .failure
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
        {
            return Err(NotifyError::delivery_failed(&self.name, message));
        }

        self.events
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScanError;

    #[tokio::test]
    async fn test_mock_sink_records_events() {
        let sink = MockSink::new();
        let event = ScanEvent::failed("http://example.com", &ScanError::invalid_input("empty"));

        sink.send(&event).await.unwrap();

        assert_eq!(sink.sent_count(), 1);
        assert_eq!(sink.events()[0].resource(), "http://example.com");
    }

    #[tokio::test]
    async fn test_mock_sink_failure() {
        let sink = MockSink::new().with_failure("channel down");
        let event = ScanEvent::failed("http://example.com", &ScanError::invalid_input("empty"));

        let err = sink.send(&event).await.unwrap_err();
        assert!(matches!(err, NotifyError::DeliveryFailed { .. }));
        assert_eq!(sink.sent_count(), 0);
    }
}
