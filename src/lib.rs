//! # Scanrelay
//!
//! A URL-reputation scanning library built around the submit/poll
//! protocol used by hosted analysis services, with pluggable backends
//! and notification relays.
//!
//! ## Overview
//!
//! Scanrelay drives a remote URL analysis to completion and relays the
//! outcome, allowing you to:
//!
//! - Submit a URL to an analysis service and receive an opaque handle
//! - Poll the analysis status at a fixed interval until it leaves `queued`
//! - Bound polling with an optional attempt or time ceiling
//! - Cancel an in-flight scan cleanly
//! - Fan out scan outcomes to chat and email notification sinks
//! - Emit structured audit logs for every scan and delivery
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use scanrelay::relay::ScanRelay;
//! use scanrelay::remote::{VirusTotalConfig, VirusTotalUrlService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = VirusTotalUrlService::new(VirusTotalConfig::new("api-key"))?;
//!
//!     let relay = ScanRelay::builder()
//!         .with_service(service)
//!         .build()?;
//!
//!     let result = relay.scan("http://example.com").await?;
//!
//!     if result.is_flagged() {
//!         println!("URL was flagged by {} engine(s)",
//!             result.stats().map(|s| s.malicious + s.suspicious).unwrap_or(0));
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several layers:
//!
//! - **Core**: Fundamental types, traits, and error handling
//! - **Poller**: The submit/poll protocol driver
//! - **Remote**: Analysis service implementations
//! - **Notify**: Notification sink implementations
//! - **Relay**: Orchestration of scans and notification fan-out
//! - **Audit**: Structured logging for scan lifecycle events

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod audit;
pub mod core;
pub mod notify;
pub mod poller;
pub mod relay;
pub mod remote;

// Re-export commonly used types at the crate root
pub use crate::core::{
    AnalysisHandle, AnalysisReport, AnalysisService, AnalysisStatus, NotifyError, ScanError,
    ScanResult, ScanStats,
};

pub use crate::notify::{NotificationSink, ScanEvent};
pub use crate::poller::{PollerConfig, ScanPoller};
pub use crate::relay::{ScanRelay, ScanRelayBuilder};

/// Prelude module for convenient imports.
///
/// ```rust
/// use scanrelay::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::{
        AnalysisHandle, AnalysisReport, AnalysisService, AnalysisStatus, NotifyError, ScanError,
        ScanResult, ScanStats,
    };
    pub use crate::notify::{NotificationSink, ScanEvent};
    pub use crate::poller::{PollerConfig, ScanPoller};
    pub use crate::relay::{ScanRelay, ScanRelayBuilder};
}
