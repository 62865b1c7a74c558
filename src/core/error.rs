//! Error types for the scanrelay library.
//!
//! This module provides structured, typed errors for all failure scenarios.
//! The library never panics; all errors are returned as `Result` values.

use std::time::Duration;
use thiserror::Error;

/// The main error type for scan operations.
///
/// Each variant corresponds to one failure point in the submit/poll
/// protocol, so callers can distinguish client mistakes from remote
/// failures without string matching.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The resource identifier was missing or empty.
    ///
    /// Surfaced before any network call is made; callers should treat
    /// this as a client error and not retry.
    #[error("invalid scan input: {reason}")]
    InvalidInput {
        /// What was wrong with the input.
        reason: String,
    },

    /// Submitting the resource to the analysis service failed.
    ///
    /// Covers transport failures, non-success responses, and responses
    /// missing the analysis handle. Submission is not guaranteed to be
    /// idempotent by remote services, so this layer never retries it.
    #[error("submission to '{service}' failed: {message}")]
    Submission {
        /// Name of the analysis service.
        service: String,
        /// Description of the failure.
        message: String,
    },

    /// A status poll against the analysis service failed.
    ///
    /// A failed poll aborts the whole scan; it is not swallowed and
    /// retried.
    #[error("poll against '{service}' failed: {message}")]
    Poll {
        /// Name of the analysis service.
        service: String,
        /// Description of the failure.
        message: String,
    },

    /// The configured polling ceiling was reached before the analysis
    /// left the queued state.
    #[error("analysis still queued after {attempts} poll(s) over {elapsed:?}")]
    DeadlineExceeded {
        /// How many polls were issued.
        attempts: u32,
        /// How long the operation ran.
        elapsed: Duration,
    },

    /// The scan was cancelled before a terminal status was observed.
    #[error("scan was cancelled")]
    Cancelled,

    /// Configuration error.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },
}

impl ScanError {
    /// Returns `true` if this error was caused by the caller's input
    /// rather than a remote or configuration failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// Returns `true` if the whole scan may reasonably be retried by the
    /// caller. Invalid input and misconfiguration will fail the same way
    /// every time.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Submission { .. } | Self::Poll { .. } | Self::DeadlineExceeded { .. }
        )
    }

    /// Returns the analysis service name if this error is associated with one.
    pub fn service(&self) -> Option<&str> {
        match self {
            Self::Submission { service, .. } | Self::Poll { service, .. } => Some(service),
            _ => None,
        }
    }

    /// Creates an `InvalidInput` error.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates a `Submission` error.
    pub fn submission(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Submission {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Creates a `Poll` error.
    pub fn poll(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Poll {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Creates a `Configuration` error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// Error type for notification delivery.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The notification channel rejected or failed to accept the message.
    #[error("delivery via '{sink}' failed: {message}")]
    DeliveryFailed {
        /// Name of the sink.
        sink: String,
        /// Description of the failure.
        message: String,
    },

    /// Sink configuration error.
    #[error("sink configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },
}

impl NotifyError {
    /// Creates a `DeliveryFailed` error.
    pub fn delivery_failed(sink: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DeliveryFailed {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Creates a `Configuration` error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns the sink name if this error is associated with one.
    pub fn sink(&self) -> Option<&str> {
        match self {
            Self::DeliveryFailed { sink, .. } => Some(sink),
            Self::Configuration { .. } => None,
        }
    }
}
