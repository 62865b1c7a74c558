//! The async scan poller.
//!
//! `ScanPoller` hides the submit/poll protocol from callers: submit the
//! resource once, then poll the status endpoint at a fixed interval until
//! the reported status leaves `queued`.

mod config;
mod scan_poller;

pub use config::PollerConfig;
pub use scan_poller::ScanPoller;
