//! Chat webhook notification sink.
//!
//! Delivers scan events as one-shot JSON messages to a chat platform's
//! incoming-webhook endpoint. The webhook URL embeds its credential, so
//! it is kept secret.

use crate::core::NotifyError;
use crate::notify::events::ScanEvent;
use crate::notify::traits::NotificationSink;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

const SINK_NAME: &str = "chat";

/// Chat webhook sink configuration.
#[derive(Debug, Clone)]
pub struct ChatWebhookConfig {
    /// The incoming-webhook URL (kept secret, it embeds a token).
    pub webhook_url: SecretString,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl ChatWebhookConfig {
    /// Creates a new configuration with the given webhook URL.
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: SecretString::new(webhook_url.into().into()),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Notification sink posting scan events to a chat webhook.
#[derive(Debug)]
pub struct ChatWebhookSink {
    config: ChatWebhookConfig,
    client: reqwest::Client,
}

impl ChatWebhookSink {
    /// Creates a new chat sink with the given configuration.
    pub fn new(config: ChatWebhookConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                NotifyError::configuration(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl NotificationSink for ChatWebhookSink {
    fn name(&self) -> &str {
        SINK_NAME
    }

    async fn send(&self, event: &ScanEvent) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(self.config.webhook_url.expose_secret())
            .json(&serde_json::json!({ "text": event.summary() }))
            .send()
            .await
            .map_err(|e| NotifyError::delivery_failed(SINK_NAME, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::delivery_failed(
                SINK_NAME,
                format!("webhook returned {status}"),
            ));
        }

        Ok(())
    }
}
