//! Scan result structure.
//!
//! This module defines `ScanResult`, the terminal outcome of one driven
//! scan: the last poll's report plus bookkeeping about how the scan ran.

use crate::core::types::{AnalysisReport, AnalysisStatus, ScanStats};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The complete result of a scan operation.
///
/// Produced by the poller once a terminal status is observed. The embedded
/// [`AnalysisReport`] is exactly the payload of the last successful poll;
/// the surrounding fields record which service ran the analysis and how
/// long the submit/poll protocol took.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Unique identifier for this scan operation (not the remote handle).
    pub id: String,

    /// The resource identifier that was analyzed.
    pub resource: String,

    /// Name of the analysis service that performed the scan.
    pub service: String,

    /// The terminal report from the last poll.
    pub report: AnalysisReport,

    /// Number of polls issued, including the terminal one.
    pub attempts: u32,

    /// When the scan completed.
    pub completed_at: DateTime<Utc>,

    /// Total time from submission to terminal report.
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

impl ScanResult {
    /// Creates a new `ScanResult` for a finished scan.
    pub fn new(
        resource: impl Into<String>,
        service: impl Into<String>,
        report: AnalysisReport,
        attempts: u32,
        duration: Duration,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            resource: resource.into(),
            service: service.into(),
            report,
            attempts,
            completed_at: Utc::now(),
            duration,
        }
    }

    /// Returns the terminal status.
    pub fn status(&self) -> &AnalysisStatus {
        &self.report.status
    }

    /// Returns the verdict counters, if the service provided them.
    pub fn stats(&self) -> Option<&ScanStats> {
        self.report.stats.as_ref()
    }

    /// Returns `true` if the analysis finished with the `completed` status.
    ///
    /// The poller treats every non-queued status as terminal, so a result
    /// can exist whose status is neither `queued` nor `completed`; this
    /// predicate lets callers tell those apart.
    pub fn is_completed(&self) -> bool {
        self.report.status.is_completed()
    }

    /// Returns `true` if any engine flagged the resource.
    pub fn is_flagged(&self) -> bool {
        self.stats().is_some_and(|s| s.is_flagged())
    }
}

/// Serde helper for Duration serialization.
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_result_accessors() {
        let report = AnalysisReport::new(AnalysisStatus::Completed).with_stats(ScanStats {
            malicious: 0,
            harmless: 70,
            ..ScanStats::default()
        });

        let result = ScanResult::new(
            "http://example.com",
            "virustotal",
            report,
            2,
            Duration::from_secs(20),
        );

        assert!(result.is_completed());
        assert!(!result.is_flagged());
        assert_eq!(result.attempts, 2);
        assert_eq!(result.stats().unwrap().harmless, 70);
    }

    #[test]
    fn test_scan_result_unrecognized_terminal_status() {
        let report = AnalysisReport::new(AnalysisStatus::parse("failure"));
        let result = ScanResult::new("http://example.com", "mock", report, 1, Duration::ZERO);

        assert!(!result.is_completed());
        assert!(result.status().is_terminal());
    }

    #[test]
    fn test_scan_result_serializes_duration_as_millis() {
        let report = AnalysisReport::new(AnalysisStatus::Completed);
        let result = ScanResult::new(
            "http://example.com",
            "mock",
            report,
            1,
            Duration::from_millis(1500),
        );

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["duration"], 1500);
    }
}
