//! The notification sink capability trait.

use crate::core::NotifyError;
use crate::notify::events::ScanEvent;

use async_trait::async_trait;
use std::fmt::Debug;

/// A one-shot delivery channel for scan events.
///
/// Sinks are injected into the relay rather than held as process-wide
/// singletons; each owns its own client and credentials with explicit
/// construction and teardown. A sink performs a single send per event
/// with no retry or state; delivery failures are returned as
/// `NotifyError` and reported by the caller, never silently swallowed.
#[async_trait]
pub trait NotificationSink: Send + Sync + Debug {
    /// Returns the name of this sink.
    ///
    /// A stable, human-readable identifier like "chat" or "email", used
    /// in errors and structured logs.
    fn name(&self) -> &str;

    /// Delivers one event through this channel.
    async fn send(&self, event: &ScanEvent) -> Result<(), NotifyError>;
}

/// An arc-wrapped sink for shared ownership.
pub type ArcNotificationSink = std::sync::Arc<dyn NotificationSink>;
