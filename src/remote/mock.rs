//! Mock analysis service for testing.
//!
//! This module provides a configurable mock service that can be used in
//! tests to script submit/poll sequences without requiring a real remote
//! API.

use crate::core::{AnalysisHandle, AnalysisReport, AnalysisService, AnalysisStatus, ScanError};

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// A mock analysis service for testing purposes.
///
/// Each resource can be given a scripted sequence of poll reports; polls
/// consume the sequence front-to-back and the last report repeats once
/// the script is exhausted. Submit and poll failures can be injected, and
/// atomic call counters allow asserting exactly how many network calls a
/// scan would have made.
///
/// # Examples
///
/// ```rust
/// use scanrelay::core::{AnalysisReport, AnalysisStatus};
/// use scanrelay::remote::MockAnalysisService;
///
/// let service = MockAnalysisService::new()
///     .with_report_sequence("http://example.com", vec![
///         AnalysisReport::new(AnalysisStatus::Queued),
///         AnalysisReport::new(AnalysisStatus::Completed),
///     ]);
/// ```
#[derive(Debug)]
pub struct MockAnalysisService {
    /// Name of this service instance.
    name: String,
    /// Scripted reports keyed by resource identifier.
    scripts: RwLock<HashMap<String, VecDeque<AnalysisReport>>>,
    /// Maps issued handles back to their resource.
    handles: RwLock<HashMap<AnalysisHandle, String>>,
    /// Report returned for resources with no script.
    default_report: AnalysisReport,
    /// If set, every submit fails with this message.
    submit_failure: RwLock<Option<String>>,
    /// If set, the poll with this 1-based index fails with the message.
    poll_failure_at: RwLock<Option<(u64, String)>>,
    /// Counter for submit operations.
    submit_count: AtomicU64,
    /// Counter for poll operations.
    poll_count: AtomicU64,
}

impl MockAnalysisService {
    /// Creates a new mock service that reports every analysis as
    /// immediately completed.
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            scripts: RwLock::new(HashMap::new()),
            handles: RwLock::new(HashMap::new()),
            default_report: AnalysisReport::new(AnalysisStatus::Completed),
            submit_failure: RwLock::new(None),
            poll_failure_at: RwLock::new(None),
            submit_count: AtomicU64::new(0),
            poll_count: AtomicU64::new(0),
        }
    }

    /// Sets the name of this service.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Scripts the poll reports for a resource.
    ///
    /// Polls consume the sequence in order; once only one report remains
    /// it is returned for every further poll.
    pub fn with_report_sequence(
        self,
        resource: impl Into<String>,
        reports: Vec<AnalysisReport>,
    ) -> Self {
        self.scripts
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(resource.into(), reports.into());
        self
    }

    /// Sets the report returned for resources with no script.
    pub fn with_default_report(mut self, report: AnalysisReport) -> Self {
        self.default_report = report;
        self
    }

    /// Makes every submission fail with the given message.
    pub fn with_submit_failure(self, message: impl Into<String>) -> Self {
        *self
            .submit_failure
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(message.into());
        self
    }

    /// Makes the `n`-th poll (1-based, counted across all resources) fail
    /// with the given message.
    pub fn with_poll_failure_at(self, n: u64, message: impl Into<String>) -> Self {
        *self
            .poll_failure_at
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some((n, message.into()));
        self
    }

    /// Returns the number of submissions performed.
    pub fn submit_count(&self) -> u64 {
        self.submit_count.load(Ordering::Relaxed)
    }

    /// Returns the number of polls performed.
    pub fn poll_count(&self) -> u64 {
        self.poll_count.load(Ordering::Relaxed)
    }
}

impl Default for MockAnalysisService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisService for MockAnalysisService {
    fn name(&self) -> &str {
        &self.name
    }

    async fn submit(&self, resource: &str) -> Result<AnalysisHandle, ScanError> {
        self.submit_count.fetch_add(1, Ordering::Relaxed);

        if let Some(message) = self
            .submit_failure
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
        {
            return Err(ScanError::submission(&self.name, message));
        }

        let handle = AnalysisHandle::new(format!("mock-{}", uuid::Uuid::new_v4()));
        self.handles
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(handle.clone(), resource.to_string());
        Ok(handle)
    }

    async fn fetch_status(&self, handle: &AnalysisHandle) -> Result<AnalysisReport, ScanError> {
        let count = self.poll_count.fetch_add(1, Ordering::Relaxed) + 1;

        if let Some((n, message)) = self
            .poll_failure_at
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
        {
            if count == n {
                return Err(ScanError::poll(&self.name, message));
            }
        }

        let resource = self
            .handles
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(handle)
            .cloned()
            .ok_or_else(|| ScanError::poll(&self.name, format!("unknown handle: {handle}")))?;

        let mut scripts = self
            .scripts
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let report = match scripts.get_mut(&resource) {
            Some(sequence) if sequence.len() > 1 => sequence
                .pop_front()
                .unwrap_or_else(|| self.default_report.clone()),
            Some(sequence) => sequence
                .front()
                .cloned()
                .unwrap_or_else(|| self.default_report.clone()),
            None => self.default_report.clone(),
        };

        Ok(report)
    }
}
