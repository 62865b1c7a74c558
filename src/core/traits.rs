//! Core traits for the scanrelay library.
//!
//! This module defines the `AnalysisService` trait that all remote
//! scanning services must implement. The poller drives the two-step
//! submit/poll protocol entirely through this seam, so it never depends
//! on a specific vendor API.

use crate::core::error::ScanError;
use crate::core::types::{AnalysisHandle, AnalysisReport};

use async_trait::async_trait;
use std::fmt::Debug;

/// A remote analysis service speaking the submit/poll protocol.
///
/// Implementations wrap one vendor's API behind two calls:
///
/// 1. [`submit`](AnalysisService::submit) sends a resource identifier and
///    returns an opaque [`AnalysisHandle`].
/// 2. [`fetch_status`](AnalysisService::fetch_status) queries the analysis
///    state for a handle and returns an [`AnalysisReport`].
///
/// # Implementation Notes
///
/// - Implementations must be `Send + Sync` for use in async contexts.
/// - `submit` must not be assumed idempotent; the poller calls it exactly
///   once per scan and never retries it.
/// - Implementations should never panic; all failures are returned as
///   `ScanError::Submission` or `ScanError::Poll`.
/// - Credentials belong inside the implementation (see
///   [`VirusTotalUrlService`](crate::remote::VirusTotalUrlService)); they
///   never cross this trait.
#[async_trait]
pub trait AnalysisService: Send + Sync + Debug {
    /// Returns the name of this service.
    ///
    /// A stable, human-readable identifier like "virustotal", used in
    /// errors and structured logs.
    fn name(&self) -> &str;

    /// Submits a resource for analysis and returns its handle.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::Submission` if the remote call fails or the
    /// response lacks the expected handle field.
    async fn submit(&self, resource: &str) -> Result<AnalysisHandle, ScanError>;

    /// Fetches the current analysis state for a handle.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::Poll` if the remote call fails or the response
    /// cannot be interpreted.
    async fn fetch_status(&self, handle: &AnalysisHandle) -> Result<AnalysisReport, ScanError>;
}

/// A boxed analysis service for type-erased storage.
pub type BoxedAnalysisService = Box<dyn AnalysisService>;

/// An arc-wrapped analysis service for shared ownership.
pub type ArcAnalysisService = std::sync::Arc<dyn AnalysisService>;
