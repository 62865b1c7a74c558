//! Core types and traits for the scanrelay library.
//!
//! This module provides the fundamental building blocks used throughout
//! the library:
//!
//! - [`types`] - Common types like `AnalysisHandle`, `AnalysisStatus`, `ScanStats`
//! - [`traits`] - The `AnalysisService` trait
//! - [`error`] - Structured error types
//! - [`result`] - The terminal scan result

pub mod error;
pub mod result;
pub mod traits;
pub mod types;

// Re-export commonly used types at the core level
pub use error::{NotifyError, ScanError};
pub use result::ScanResult;
pub use traits::{AnalysisService, ArcAnalysisService, BoxedAnalysisService};
pub use types::{AnalysisHandle, AnalysisReport, AnalysisStatus, ScanStats};
