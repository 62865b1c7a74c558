//! Core types used throughout the scanrelay library.
//!
//! This module defines the fundamental data structures for the submit/poll
//! protocol: analysis handles, statuses, per-poll reports, and the
//! aggregate statistics returned by URL-reputation services.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque correlation token returned by an analysis service's submission
/// step.
///
/// A handle is owned by the poller for the lifetime of one scan operation:
/// exactly one handle is live per in-flight request, and it is discarded
/// once a terminal report is obtained. The contents mean nothing to this
/// library; they are echoed back to the service on every poll.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisHandle(String);

impl AnalysisHandle {
    /// Creates a handle from the service-provided identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnalysisHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for AnalysisHandle {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for AnalysisHandle {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// The analysis state reported by a remote service.
///
/// `Queued` is the only non-terminal value. Everything else, including
/// statuses this library has never seen, ends the poll loop: looping only
/// on the known sentinel guarantees the poller cannot spin forever on an
/// unrecognized status string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnalysisStatus {
    /// The analysis has not started or is still running.
    Queued,

    /// The analysis finished normally.
    Completed,

    /// Any other status reported by the service, carried verbatim.
    Other(String),
}

impl AnalysisStatus {
    /// Parses a status string as reported by the remote service.
    pub fn parse(status: &str) -> Self {
        match status {
            "queued" => Self::Queued,
            "completed" => Self::Completed,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns `true` if polling should stop on this status.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Queued)
    }

    /// Returns `true` if the analysis finished normally.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns the status string as reported by the service.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Queued => "queued",
            Self::Completed => "completed",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for AnalysisStatus {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<AnalysisStatus> for String {
    fn from(status: AnalysisStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Per-engine verdict counters for one analysis.
///
/// This mirrors the `stats` object that URL-reputation services attach to
/// a finished analysis. Parsing is permissive: counters the service omits
/// default to zero, and counters it adds stay available through
/// [`AnalysisReport::attributes`](crate::core::AnalysisReport).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Engines that flagged the resource as malicious.
    #[serde(default)]
    pub malicious: u32,

    /// Engines that flagged the resource as suspicious.
    #[serde(default)]
    pub suspicious: u32,

    /// Engines that considered the resource harmless.
    #[serde(default)]
    pub harmless: u32,

    /// Engines with no verdict.
    #[serde(default)]
    pub undetected: u32,

    /// Engines that timed out.
    #[serde(default)]
    pub timeout: u32,
}

impl ScanStats {
    /// Returns `true` if any engine reported the resource as malicious
    /// or suspicious.
    pub fn is_flagged(&self) -> bool {
        self.malicious > 0 || self.suspicious > 0
    }

    /// Total number of engine verdicts in these stats.
    pub fn total(&self) -> u32 {
        self.malicious + self.suspicious + self.harmless + self.undetected + self.timeout
    }
}

/// The payload returned by one poll of the analysis-status endpoint.
///
/// The report from the last (terminal) poll becomes the scan result. The
/// raw `attributes` object is kept alongside the typed fields so callers
/// can reach service-specific detail this library does not model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// The analysis status at the time of the poll.
    pub status: AnalysisStatus,

    /// Verdict counters, if the service included them.
    pub stats: Option<ScanStats>,

    /// The full attributes object from the service response.
    #[serde(default)]
    pub attributes: serde_json::Value,
}

impl AnalysisReport {
    /// Creates a report with a status and no further detail.
    pub fn new(status: AnalysisStatus) -> Self {
        Self {
            status,
            stats: None,
            attributes: serde_json::Value::Null,
        }
    }

    /// Sets the verdict counters.
    pub fn with_stats(mut self, stats: ScanStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Sets the raw attributes object.
    pub fn with_attributes(mut self, attributes: serde_json::Value) -> Self {
        self.attributes = attributes;
        self
    }

    /// Returns `true` if this report ends the poll loop.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(AnalysisStatus::parse("queued"), AnalysisStatus::Queued);
        assert_eq!(AnalysisStatus::parse("completed"), AnalysisStatus::Completed);
        assert_eq!(
            AnalysisStatus::parse("in-progress"),
            AnalysisStatus::Other("in-progress".to_string())
        );
    }

    #[test]
    fn test_unrecognized_status_is_terminal() {
        assert!(!AnalysisStatus::Queued.is_terminal());
        assert!(AnalysisStatus::Completed.is_terminal());
        assert!(AnalysisStatus::parse("definitely-not-a-status").is_terminal());
    }

    #[test]
    fn test_stats_flagged() {
        let clean = ScanStats {
            harmless: 70,
            ..ScanStats::default()
        };
        assert!(!clean.is_flagged());
        assert_eq!(clean.total(), 70);

        let flagged = ScanStats {
            malicious: 2,
            harmless: 68,
            ..ScanStats::default()
        };
        assert!(flagged.is_flagged());
    }

    #[test]
    fn test_stats_permissive_deserialization() {
        // Missing counters default to zero.
        let stats: ScanStats = serde_json::from_value(serde_json::json!({
            "malicious": 1,
        }))
        .unwrap();
        assert_eq!(stats.malicious, 1);
        assert_eq!(stats.harmless, 0);
    }

    #[test]
    fn test_report_builder() {
        let report = AnalysisReport::new(AnalysisStatus::Completed)
            .with_stats(ScanStats {
                harmless: 70,
                ..ScanStats::default()
            })
            .with_attributes(serde_json::json!({"status": "completed"}));

        assert!(report.is_terminal());
        assert_eq!(report.stats.unwrap().harmless, 70);
    }

    #[test]
    fn test_handle_roundtrip() {
        let handle = AnalysisHandle::new("u-abc123-1700000000");
        assert_eq!(handle.as_str(), "u-abc123-1700000000");
        assert_eq!(handle.to_string(), "u-abc123-1700000000");
    }
}
