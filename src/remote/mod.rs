//! Remote analysis service implementations.
//!
//! This module contains implementations of the `AnalysisService` trait.
//!
//! ## Available Services
//!
//! - [`mock`] - A scriptable service for testing
//! - [`virustotal`] - The VirusTotal v3 URL-scan API
//!
//! ## Implementing a Custom Service
//!
//! To target a different analysis API, implement the `AnalysisService`
//! trait:
//!
//! ```rust,ignore
//! use scanrelay::core::{AnalysisHandle, AnalysisReport, AnalysisService, ScanError};
//! use async_trait::async_trait;
//!
//! #[derive(Debug)]
//! pub struct MyService {
//!     // Your service's configuration
//! }
//!
//! #[async_trait]
//! impl AnalysisService for MyService {
//!     fn name(&self) -> &str {
//!         "my-service"
//!     }
//!
//!     async fn submit(&self, resource: &str) -> Result<AnalysisHandle, ScanError> {
//!         // Submit the resource, return the analysis identifier
//!         todo!()
//!     }
//!
//!     async fn fetch_status(&self, handle: &AnalysisHandle) -> Result<AnalysisReport, ScanError> {
//!         // Query the status endpoint
//!         todo!()
//!     }
//! }
//! ```

pub mod mock;
pub mod virustotal;

// Re-exports
pub use mock::MockAnalysisService;
pub use virustotal::{VirusTotalConfig, VirusTotalUrlService};
