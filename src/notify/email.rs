//! Transactional email notification sink.
//!
//! Delivers scan events as one-shot JSON requests to an HTTP
//! transactional-email API (one message per event, no queueing).

use crate::core::NotifyError;
use crate::notify::events::ScanEvent;
use crate::notify::traits::NotificationSink;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

const SINK_NAME: &str = "email";

/// Email API sink configuration.
#[derive(Debug, Clone)]
pub struct EmailApiConfig {
    /// API key for the email provider (kept secret).
    pub api_key: SecretString,

    /// The provider's send endpoint.
    pub endpoint: String,

    /// Sender address.
    pub from: String,

    /// Recipient addresses.
    pub to: Vec<String>,

    /// Subject line prefix for scan notifications.
    pub subject_prefix: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl EmailApiConfig {
    /// Creates a new configuration with the required fields.
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        from: impl Into<String>,
    ) -> Self {
        Self {
            api_key: SecretString::new(api_key.into().into()),
            endpoint: endpoint.into(),
            from: from.into(),
            to: Vec::new(),
            subject_prefix: "[scanrelay]".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Adds a recipient address.
    pub fn with_recipient(mut self, to: impl Into<String>) -> Self {
        self.to.push(to.into());
        self
    }

    /// Sets the subject line prefix.
    pub fn with_subject_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.subject_prefix = prefix.into();
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Notification sink sending scan events through an email API.
#[derive(Debug)]
pub struct EmailApiSink {
    config: EmailApiConfig,
    client: reqwest::Client,
}

impl EmailApiSink {
    /// Creates a new email sink with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::Configuration` if no recipient is configured
    /// or the HTTP client cannot be built.
    pub fn new(config: EmailApiConfig) -> Result<Self, NotifyError> {
        if config.to.is_empty() {
            return Err(NotifyError::configuration(
                "at least one recipient is required",
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                NotifyError::configuration(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self { config, client })
    }

    fn subject(&self, event: &ScanEvent) -> String {
        format!(
            "{} {} for {}",
            self.config.subject_prefix,
            event.event_type().replace('_', " "),
            event.resource()
        )
    }
}

#[async_trait]
impl NotificationSink for EmailApiSink {
    fn name(&self) -> &str {
        SINK_NAME
    }

    async fn send(&self, event: &ScanEvent) -> Result<(), NotifyError> {
        let body = serde_json::json!({
            "from": self.config.from,
            "to": self.config.to,
            "subject": self.subject(event),
            "text": event.summary(),
        });

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| NotifyError::delivery_failed(SINK_NAME, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::delivery_failed(
                SINK_NAME,
                format!("email API returned {status}"),
            ));
        }

        Ok(())
    }
}
