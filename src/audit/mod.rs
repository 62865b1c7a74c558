//! Structured audit logging for scan lifecycle events.
//!
//! This module emits structured events under the `scanrelay::audit`
//! target using the `tracing` crate, so any subscriber (JSON file,
//! OpenTelemetry, etc.) can capture a durable record of every scan and
//! notification outcome.

use crate::core::{AnalysisHandle, NotifyError, ScanError, ScanResult};

/// Emits an audit event for a successful submission.
pub fn emit_scan_submitted(resource: &str, service: &str, handle: &AnalysisHandle) {
    tracing::info!(
        target: "scanrelay::audit",
        event_type = "scan_submitted",
        resource = %resource,
        service = %service,
        handle = %handle,
        "Resource submitted for analysis"
    );
}

/// Emits an audit event for a scan that reached a terminal status.
///
/// Terminal statuses other than `completed` are logged at `warn`: the
/// poller intentionally returns them as results, but they may be error
/// statuses the remote service never documented.
pub fn emit_scan_completed(result: &ScanResult) {
    if result.is_completed() {
        tracing::info!(
            target: "scanrelay::audit",
            event_type = "scan_completed",
            scan_id = %result.id,
            resource = %result.resource,
            service = %result.service,
            status = %result.status(),
            attempts = result.attempts,
            duration_ms = result.duration.as_millis() as u64,
            flagged = result.is_flagged(),
            "Scan completed"
        );
    } else {
        tracing::warn!(
            target: "scanrelay::audit",
            event_type = "scan_completed",
            scan_id = %result.id,
            resource = %result.resource,
            service = %result.service,
            status = %result.status(),
            attempts = result.attempts,
            duration_ms = result.duration.as_millis() as u64,
            "Scan ended on an unrecognized terminal status"
        );
    }
}

/// Emits an audit event for a failed scan.
pub fn emit_scan_failed(resource: &str, error: &ScanError) {
    tracing::warn!(
        target: "scanrelay::audit",
        event_type = "scan_failed",
        resource = %resource,
        service = ?error.service(),
        error = %error,
        client_error = error.is_client_error(),
        "Scan failed"
    );
}

/// Emits an audit event for one notification delivery attempt.
pub fn emit_notification_result(sink: &str, event_type: &str, outcome: Result<(), &NotifyError>) {
    match outcome {
        Ok(()) => tracing::info!(
            target: "scanrelay::audit",
            event_type = "notification_sent",
            sink = %sink,
            scan_event = %event_type,
            "Notification delivered"
        ),
        Err(error) => tracing::warn!(
            target: "scanrelay::audit",
            event_type = "notification_failed",
            sink = %sink,
            scan_event = %event_type,
            error = %error,
            "Notification delivery failed"
        ),
    }
}
