//! Scan relay for orchestrating scans and notifications.
//!
//! The `ScanRelay` drives a scan to completion through the poller and
//! fans the outcome out to every configured notification sink.

mod scan_relay;

pub use scan_relay::{ScanRelay, ScanRelayBuilder};
