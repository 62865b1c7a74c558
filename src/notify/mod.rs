//! Notification sinks for scan outcomes.
//!
//! Each sink is an independent one-shot delivery channel (chat message,
//! transactional email) behind the [`NotificationSink`] capability trait,
//! so nothing else in the system depends on a specific vendor SDK.
//!
//! ## Available Sinks
//!
//! - [`chat`] - JSON message to a chat incoming-webhook
//! - [`email`] - JSON request to a transactional-email HTTP API
//! - [`mock`] - Records events for testing

pub mod chat;
pub mod email;
pub mod events;
pub mod mock;
pub mod traits;

// Re-exports
pub use chat::{ChatWebhookConfig, ChatWebhookSink};
pub use email::{EmailApiConfig, EmailApiSink};
pub use events::ScanEvent;
pub use mock::MockSink;
pub use traits::{ArcNotificationSink, NotificationSink};
