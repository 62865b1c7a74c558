//! The scan poller implementation.

use crate::audit;
use crate::core::{AnalysisReport, ArcAnalysisService, ScanError, ScanResult};
use crate::poller::config::PollerConfig;

use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Drives a remote analysis to completion over the submit/poll protocol.
///
/// One `scan` call owns one analysis handle: the resource is submitted
/// exactly once, then the status endpoint is polled at a fixed interval
/// until the service reports anything other than `queued`. The poller
/// holds no state across invocations, so concurrent scans are fully
/// independent.
///
/// # Example
///
/// ```rust,ignore
/// use scanrelay::poller::{PollerConfig, ScanPoller};
/// use scanrelay::remote::VirusTotalUrlService;
/// use std::sync::Arc;
///
/// let service = Arc::new(VirusTotalUrlService::new(config)?);
/// let poller = ScanPoller::new(service);
/// let result = poller.scan("http://example.com").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ScanPoller {
    service: ArcAnalysisService,
    config: PollerConfig,
}

impl ScanPoller {
    /// Creates a poller with the default configuration.
    pub fn new(service: ArcAnalysisService) -> Self {
        Self::with_config(service, PollerConfig::default())
    }

    /// Creates a poller with the given configuration.
    pub fn with_config(service: ArcAnalysisService, config: PollerConfig) -> Self {
        Self { service, config }
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Scans a resource and returns the terminal result.
    ///
    /// Equivalent to [`scan_with_cancellation`](Self::scan_with_cancellation)
    /// with a token that is never cancelled.
    pub async fn scan(&self, resource: &str) -> Result<ScanResult, ScanError> {
        self.scan_with_cancellation(resource, &CancellationToken::new())
            .await
    }

    /// Scans a resource, aborting early if `cancel` fires.
    ///
    /// Cancellation mid-wait or mid-poll abandons the pending sleep or
    /// request and issues no further polls. The remote service offers no
    /// way to withdraw a submission, so none is attempted.
    ///
    /// # Errors
    ///
    /// - `ScanError::InvalidInput` - empty resource, checked before any
    ///   network call.
    /// - `ScanError::Submission` - the submission call failed; no poll is
    ///   ever issued.
    /// - `ScanError::Poll` - a poll call failed; the scan aborts.
    /// - `ScanError::DeadlineExceeded` - a configured ceiling was reached
    ///   while the analysis was still queued.
    /// - `ScanError::Cancelled` - the token fired before a terminal status.
    pub async fn scan_with_cancellation(
        &self,
        resource: &str,
        cancel: &CancellationToken,
    ) -> Result<ScanResult, ScanError> {
        if resource.is_empty() {
            return Err(ScanError::invalid_input("resource identifier is empty"));
        }

        let service = self.service.name().to_string();
        let started = Instant::now();

        let handle = tokio::select! {
            _ = cancel.cancelled() => return Err(ScanError::Cancelled),
            submitted = self.service.submit(resource) => submitted?,
        };

        audit::emit_scan_submitted(resource, &service, &handle);

        let mut attempts: u32 = 0;
        let report: AnalysisReport = loop {
            if self.config.ceiling_reached(attempts, started.elapsed()) {
                return Err(ScanError::DeadlineExceeded {
                    attempts,
                    elapsed: started.elapsed(),
                });
            }

            tokio::select! {
                _ = cancel.cancelled() => return Err(ScanError::Cancelled),
                _ = tokio::time::sleep(self.config.poll_interval) => {}
            }

            let report = tokio::select! {
                _ = cancel.cancelled() => return Err(ScanError::Cancelled),
                polled = self.service.fetch_status(&handle) => polled?,
            };
            attempts += 1;

            if report.is_terminal() {
                break report;
            }

            tracing::debug!(
                resource = %resource,
                service = %service,
                handle = %handle,
                attempts = attempts,
                "Analysis still queued"
            );
        };

        let result = ScanResult::new(resource, service, report, attempts, started.elapsed());
        audit::emit_scan_completed(&result);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AnalysisStatus, ScanStats};
    use crate::remote::MockAnalysisService;

    use std::sync::Arc;
    use std::time::Duration;

    fn fast_config() -> PollerConfig {
        PollerConfig::new().with_poll_interval(Duration::from_millis(1))
    }

    fn queued() -> AnalysisReport {
        AnalysisReport::new(AnalysisStatus::Queued)
    }

    fn completed(stats: ScanStats) -> AnalysisReport {
        AnalysisReport::new(AnalysisStatus::Completed).with_stats(stats)
    }

    #[tokio::test]
    async fn test_scan_happy_path() {
        let stats = ScanStats {
            malicious: 0,
            harmless: 70,
            ..ScanStats::default()
        };
        let service = Arc::new(
            MockAnalysisService::new()
                .with_report_sequence("http://example.com", vec![queued(), completed(stats)]),
        );
        let poller = ScanPoller::with_config(service.clone(), fast_config());

        let result = poller.scan("http://example.com").await.unwrap();

        assert!(result.is_completed());
        assert_eq!(result.stats().unwrap().harmless, 70);
        assert_eq!(result.stats().unwrap().malicious, 0);
        assert_eq!(result.attempts, 2);
        assert_eq!(service.submit_count(), 1);
        assert_eq!(service.poll_count(), 2);
    }

    #[tokio::test]
    async fn test_empty_resource_makes_no_network_calls() {
        let service = Arc::new(MockAnalysisService::new());
        let poller = ScanPoller::with_config(service.clone(), fast_config());

        let err = poller.scan("").await.unwrap_err();
        assert!(matches!(err, ScanError::InvalidInput { .. }));
        assert!(err.is_client_error());
        assert_eq!(service.submit_count(), 0);
        assert_eq!(service.poll_count(), 0);
    }

    #[tokio::test]
    async fn test_whitespace_resource_is_submitted() {
        // Only the empty string is a client error; anything else is the
        // remote service's to judge.
        let service = Arc::new(MockAnalysisService::new());
        let poller = ScanPoller::with_config(service.clone(), fast_config());

        let result = poller.scan("   ").await.unwrap();
        assert!(result.is_completed());
        assert_eq!(service.submit_count(), 1);
    }

    #[tokio::test]
    async fn test_submission_failure_issues_no_polls() {
        let service =
            Arc::new(MockAnalysisService::new().with_submit_failure("503 Service Unavailable"));
        let poller = ScanPoller::with_config(service.clone(), fast_config());

        let err = poller.scan("http://example.com").await.unwrap_err();
        assert!(matches!(err, ScanError::Submission { .. }));
        assert_eq!(service.submit_count(), 1);
        assert_eq!(service.poll_count(), 0);
    }

    #[tokio::test]
    async fn test_exactly_n_plus_one_polls() {
        // Three queued responses, then completed: the loop must terminate
        // on the fourth poll.
        let service = Arc::new(MockAnalysisService::new().with_report_sequence(
            "http://example.com",
            vec![
                queued(),
                queued(),
                queued(),
                completed(ScanStats::default()),
            ],
        ));
        let poller = ScanPoller::with_config(service.clone(), fast_config());

        let result = poller.scan("http://example.com").await.unwrap();
        assert_eq!(result.attempts, 4);
        assert_eq!(service.poll_count(), 4);
    }

    #[tokio::test]
    async fn test_poll_error_aborts_without_further_polls() {
        let service = Arc::new(
            MockAnalysisService::new()
                .with_report_sequence("http://example.com", vec![queued(), queued(), queued()])
                .with_poll_failure_at(2, "connection reset"),
        );
        let poller = ScanPoller::with_config(service.clone(), fast_config());

        let err = poller.scan("http://example.com").await.unwrap_err();
        assert!(matches!(err, ScanError::Poll { .. }));
        assert_eq!(service.poll_count(), 2);
    }

    #[tokio::test]
    async fn test_unrecognized_status_is_returned_as_result() {
        // Permissive terminal detection: an unknown status ends the loop
        // and its payload is the result.
        let service = Arc::new(MockAnalysisService::new().with_report_sequence(
            "http://example.com",
            vec![
                queued(),
                AnalysisReport::new(AnalysisStatus::parse("failure"))
                    .with_attributes(serde_json::json!({"status": "failure"})),
            ],
        ));
        let poller = ScanPoller::with_config(service, fast_config());

        let result = poller.scan("http://example.com").await.unwrap();
        assert!(!result.is_completed());
        assert_eq!(result.status().as_str(), "failure");
        assert_eq!(result.report.attributes["status"], "failure");
    }

    #[tokio::test]
    async fn test_concurrent_scans_are_independent() {
        let service = Arc::new(
            MockAnalysisService::new()
                .with_report_sequence(
                    "http://a.example",
                    vec![
                        queued(),
                        completed(ScanStats {
                            harmless: 10,
                            ..ScanStats::default()
                        }),
                    ],
                )
                .with_report_sequence(
                    "http://b.example",
                    vec![completed(ScanStats {
                        malicious: 3,
                        ..ScanStats::default()
                    })],
                ),
        );
        let poller = ScanPoller::with_config(service.clone(), fast_config());

        let (a, b) = tokio::join!(poller.scan("http://a.example"), poller.scan("http://b.example"));
        let a = a.unwrap();
        let b = b.unwrap();

        assert_eq!(a.stats().unwrap().harmless, 10);
        assert_eq!(a.attempts, 2);
        assert_eq!(b.stats().unwrap().malicious, 3);
        assert_eq!(b.attempts, 1);
        assert_eq!(service.submit_count(), 2);
    }

    #[tokio::test]
    async fn test_max_attempts_ceiling() {
        // Service never leaves queued; the configured ceiling must stop
        // the loop.
        let service = Arc::new(
            MockAnalysisService::new().with_report_sequence("http://example.com", vec![queued()]),
        );
        let config = fast_config().with_max_attempts(3);
        let poller = ScanPoller::with_config(service.clone(), config);

        let err = poller.scan("http://example.com").await.unwrap_err();
        match err {
            ScanError::DeadlineExceeded { attempts, .. } => assert_eq!(attempts, 3),
            other => panic!("expected DeadlineExceeded, got {other:?}"),
        }
        assert_eq!(service.poll_count(), 3);
    }

    #[tokio::test]
    async fn test_max_poll_time_ceiling() {
        // Service never leaves queued; the elapsed-time ceiling must stop
        // the loop after at least one poll.
        let service = Arc::new(
            MockAnalysisService::new().with_report_sequence("http://example.com", vec![queued()]),
        );
        let config = PollerConfig::new()
            .with_poll_interval(Duration::from_millis(1))
            .with_max_poll_time(Duration::from_millis(50));
        let poller = ScanPoller::with_config(service.clone(), config);

        let err = poller.scan("http://example.com").await.unwrap_err();
        match err {
            ScanError::DeadlineExceeded { attempts, elapsed } => {
                assert!(attempts >= 1);
                assert!(elapsed >= Duration::from_millis(50));
            }
            other => panic!("expected DeadlineExceeded, got {other:?}"),
        }
        assert!(service.poll_count() >= 1);
    }

    #[tokio::test]
    async fn test_unrecognized_terminal_status_logs_audit_warn() {
        use std::io::Write;
        use std::sync::Mutex;
        use tracing_subscriber::fmt::MakeWriter;

        #[derive(Clone)]
        struct SharedBuf(Arc<Mutex<Vec<u8>>>);

        impl Write for SharedBuf {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        impl<'a> MakeWriter<'a> for SharedBuf {
            type Writer = SharedBuf;

            fn make_writer(&'a self) -> Self::Writer {
                self.clone()
            }
        }

        let buf = SharedBuf(Arc::new(Mutex::new(Vec::new())));
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("scanrelay::audit=warn"))
            .with_writer(buf.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let service = Arc::new(MockAnalysisService::new().with_report_sequence(
            "http://example.com",
            vec![AnalysisReport::new(AnalysisStatus::parse("failure"))],
        ));
        let poller = ScanPoller::with_config(service, fast_config());

        let result = poller.scan("http://example.com").await.unwrap();
        assert!(!result.is_completed());

        let output = String::from_utf8(
            buf.0
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clone(),
        )
        .unwrap();
        assert!(output.contains("scanrelay::audit"));
        assert!(output.contains("WARN"));
        assert!(output.contains("unrecognized terminal status"));
        assert!(output.contains("failure"));
    }

    #[tokio::test]
    async fn test_cancellation_stops_polling() {
        let service = Arc::new(
            MockAnalysisService::new().with_report_sequence("http://example.com", vec![queued()]),
        );
        let config = PollerConfig::new().with_poll_interval(Duration::from_secs(3600));
        let poller = ScanPoller::with_config(service.clone(), config);

        let cancel = CancellationToken::new();
        let task = {
            let poller = poller.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move {
                poller
                    .scan_with_cancellation("http://example.com", &cancel)
                    .await
            })
        };

        // Give the scan time to submit and park in the interval sleep.
        tokio::time::sleep(Duration::from_millis(20)).await;
        cancel.cancel();

        let err = task.await.unwrap().unwrap_err();
        assert!(matches!(err, ScanError::Cancelled));
        assert_eq!(service.submit_count(), 1);
        assert_eq!(service.poll_count(), 0);
    }
}
