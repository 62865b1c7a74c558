//! Notification event types.

use crate::core::{ScanError, ScanResult, ScanStats};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An event describing the outcome of one scan, delivered to every
/// configured [`NotificationSink`](crate::notify::NotificationSink).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScanEvent {
    /// A scan reached a terminal status.
    ScanCompleted {
        /// The resource that was analyzed.
        resource: String,
        /// Name of the analysis service.
        service: String,
        /// The terminal status string.
        status: String,
        /// Verdict counters, if the service provided them.
        stats: Option<ScanStats>,
        /// When the scan completed.
        completed_at: DateTime<Utc>,
    },

    /// A scan failed before reaching a terminal status.
    ScanFailed {
        /// The resource that was being analyzed.
        resource: String,
        /// Name of the analysis service, if the failure is tied to one.
        service: Option<String>,
        /// Human-readable failure description.
        reason: String,
        /// When the failure was observed.
        failed_at: DateTime<Utc>,
    },
}

impl ScanEvent {
    /// Builds a completion event from a scan result.
    pub fn completed(result: &ScanResult) -> Self {
        Self::ScanCompleted {
            resource: result.resource.clone(),
            service: result.service.clone(),
            status: result.status().as_str().to_string(),
            stats: result.report.stats,
            completed_at: result.completed_at,
        }
    }

    /// Builds a failure event from a scan error.
    pub fn failed(resource: impl Into<String>, error: &ScanError) -> Self {
        Self::ScanFailed {
            resource: resource.into(),
            service: error.service().map(str::to_string),
            reason: error.to_string(),
            failed_at: Utc::now(),
        }
    }

    /// Returns the resource this event is about.
    pub fn resource(&self) -> &str {
        match self {
            Self::ScanCompleted { resource, .. } | Self::ScanFailed { resource, .. } => resource,
        }
    }

    /// Returns the event type name for logging.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ScanCompleted { .. } => "scan_completed",
            Self::ScanFailed { .. } => "scan_failed",
        }
    }

    /// Renders a one-line human-readable summary of the event.
    pub fn summary(&self) -> String {
        match self {
            Self::ScanCompleted {
                resource,
                status,
                stats,
                ..
            } => match stats {
                Some(s) => format!(
                    "Scan of {resource} {status}: {} malicious, {} suspicious, {} harmless",
                    s.malicious, s.suspicious, s.harmless
                ),
                None => format!("Scan of {resource} finished with status '{status}'"),
            },
            Self::ScanFailed {
                resource, reason, ..
            } => format!("Scan of {resource} failed: {reason}"),
        }
    }
}
