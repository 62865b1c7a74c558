//! The scan relay implementation.

use crate::audit;
use crate::core::{ArcAnalysisService, ScanError, ScanResult};
use crate::notify::{ArcNotificationSink, NotificationSink, ScanEvent};
use crate::poller::{PollerConfig, ScanPoller};

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Builder for creating a `ScanRelay`.
pub struct ScanRelayBuilder {
    service: Option<ArcAnalysisService>,
    sinks: Vec<ArcNotificationSink>,
    config: PollerConfig,
}

impl ScanRelayBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            service: None,
            sinks: Vec::new(),
            config: PollerConfig::default(),
        }
    }

    /// Sets the analysis service.
    pub fn with_service<S: crate::core::AnalysisService + 'static>(mut self, service: S) -> Self {
        self.service = Some(Arc::new(service));
        self
    }

    /// Sets the analysis service from an existing Arc.
    pub fn with_arc_service(mut self, service: ArcAnalysisService) -> Self {
        self.service = Some(service);
        self
    }

    /// Adds a notification sink.
    pub fn add_sink<S: NotificationSink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Arc::new(sink));
        self
    }

    /// Adds a notification sink from an existing Arc.
    pub fn add_arc_sink(mut self, sink: ArcNotificationSink) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Sets the poller configuration.
    pub fn with_config(mut self, config: PollerConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the relay.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::Configuration` if no analysis service was set.
    pub fn build(self) -> Result<ScanRelay, ScanError> {
        let service = self
            .service
            .ok_or_else(|| ScanError::configuration("an analysis service is required"))?;

        Ok(ScanRelay {
            poller: ScanPoller::with_config(service, self.config),
            sinks: self.sinks,
        })
    }
}

impl Default for ScanRelayBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Orchestrates scans and fans out their outcomes to notification sinks.
///
/// The relay owns one injected [`AnalysisService`](crate::core::AnalysisService)
/// and any number of [`NotificationSink`]s. Every scan outcome, success or
/// failure, is delivered to every sink; a sink failure is logged and
/// reported through the audit target but never affects the returned
/// `Result`.
///
/// # Example
///
/// ```rust,ignore
/// use scanrelay::relay::ScanRelay;
/// use scanrelay::remote::{VirusTotalConfig, VirusTotalUrlService};
///
/// let relay = ScanRelay::builder()
///     .with_service(VirusTotalUrlService::new(VirusTotalConfig::new(api_key))?)
///     .add_sink(chat_sink)
///     .build()?;
///
/// let result = relay.scan("http://example.com").await?;
/// ```
#[derive(Debug)]
pub struct ScanRelay {
    poller: ScanPoller,
    sinks: Vec<ArcNotificationSink>,
}

impl ScanRelay {
    /// Creates a new builder.
    pub fn builder() -> ScanRelayBuilder {
        ScanRelayBuilder::new()
    }

    /// Returns the number of configured sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Returns a reference to the poller configuration.
    pub fn config(&self) -> &PollerConfig {
        self.poller.config()
    }

    /// Scans a resource and notifies every sink of the outcome.
    pub async fn scan(&self, resource: &str) -> Result<ScanResult, ScanError> {
        self.scan_with_cancellation(resource, &CancellationToken::new())
            .await
    }

    /// Scans a resource with cancellation support.
    ///
    /// On cancellation no notification is sent: the scan has no outcome
    /// to report.
    pub async fn scan_with_cancellation(
        &self,
        resource: &str,
        cancel: &CancellationToken,
    ) -> Result<ScanResult, ScanError> {
        match self.poller.scan_with_cancellation(resource, cancel).await {
            Ok(result) => {
                self.dispatch(&ScanEvent::completed(&result)).await;
                Ok(result)
            }
            Err(ScanError::Cancelled) => Err(ScanError::Cancelled),
            Err(error) => {
                audit::emit_scan_failed(resource, &error);
                self.dispatch(&ScanEvent::failed(resource, &error)).await;
                Err(error)
            }
        }
    }

    /// Delivers one event to every sink concurrently.
    ///
    /// Sink failures are logged and audited, never propagated.
    async fn dispatch(&self, event: &ScanEvent) {
        use futures::future::join_all;

        let deliveries = self.sinks.iter().map(|sink| async move {
            let outcome = sink.send(event).await;
            if let Err(error) = &outcome {
                tracing::warn!(
                    sink = sink.name(),
                    error = %error,
                    "Notification sink failed"
                );
            }
            audit::emit_notification_result(
                sink.name(),
                event.event_type(),
                outcome.as_ref().map(|_| ()),
            );
        });

        join_all(deliveries).await;
    }
}
