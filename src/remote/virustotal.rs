//! VirusTotal URL analysis service.
//!
//! This module implements [`AnalysisService`] against the VirusTotal v3
//! URL-scan API.
//!
//! # Requirements
//!
//! - VirusTotal API key
//! - Network access to www.virustotal.com
//!
//! # API Usage
//!
//! 1. `POST /urls` with a form-encoded `url` field submits the resource
//!    and returns the analysis identifier.
//! 2. `GET /analyses/{id}` reports the analysis status and, once
//!    finished, the per-engine verdict counters.

use crate::core::{
    AnalysisHandle, AnalysisReport, AnalysisService, AnalysisStatus, ScanError, ScanStats,
};

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

const SERVICE_NAME: &str = "virustotal";

/// VirusTotal service configuration.
#[derive(Debug, Clone)]
pub struct VirusTotalConfig {
    /// API key (kept secret).
    pub api_key: SecretString,

    /// Base URL for the API.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl VirusTotalConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into().into()),
            base_url: "https://www.virustotal.com/api/v3".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// VirusTotal implementation of the submit/poll protocol for URLs.
///
/// # Example
///
/// ```rust,ignore
/// use scanrelay::remote::{VirusTotalConfig, VirusTotalUrlService};
///
/// let config = VirusTotalConfig::new("your-api-key");
/// let service = VirusTotalUrlService::new(config)?;
/// ```
#[derive(Debug)]
pub struct VirusTotalUrlService {
    config: VirusTotalConfig,
    client: reqwest::Client,
}

impl VirusTotalUrlService {
    /// Creates a new VirusTotal service with the given configuration.
    pub fn new(config: VirusTotalConfig) -> Result<Self, ScanError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ScanError::configuration(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self { config, client })
    }

    /// Extracts the analysis identifier from a submission response.
    fn parse_handle(&self, json: &serde_json::Value) -> Result<AnalysisHandle, ScanError> {
        json.get("data")
            .and_then(|d| d.get("id"))
            .and_then(|id| id.as_str())
            .map(AnalysisHandle::new)
            .ok_or_else(|| {
                ScanError::submission(SERVICE_NAME, "response is missing the analysis id")
            })
    }

    /// Extracts status and stats from an analysis response.
    fn parse_report(&self, json: &serde_json::Value) -> Result<AnalysisReport, ScanError> {
        let attributes = json
            .get("data")
            .and_then(|d| d.get("attributes"))
            .cloned()
            .ok_or_else(|| {
                ScanError::poll(SERVICE_NAME, "response is missing analysis attributes")
            })?;

        let status = attributes
            .get("status")
            .and_then(|s| s.as_str())
            .map(AnalysisStatus::parse)
            .ok_or_else(|| {
                ScanError::poll(SERVICE_NAME, "response is missing the analysis status")
            })?;

        let stats = attributes
            .get("stats")
            .and_then(|s| serde_json::from_value::<ScanStats>(s.clone()).ok());

        Ok(AnalysisReport {
            status,
            stats,
            attributes,
        })
    }
}

#[async_trait]
impl AnalysisService for VirusTotalUrlService {
    fn name(&self) -> &str {
        SERVICE_NAME
    }

    async fn submit(&self, resource: &str) -> Result<AnalysisHandle, ScanError> {
        let url = format!("{}/urls", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .header("x-apikey", self.config.api_key.expose_secret())
            .form(&[("url", resource)])
            .send()
            .await
            .map_err(|e| ScanError::submission(SERVICE_NAME, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScanError::submission(
                SERVICE_NAME,
                format!("API error: {status}"),
            ));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ScanError::submission(SERVICE_NAME, e.to_string()))?;

        self.parse_handle(&body)
    }

    async fn fetch_status(&self, handle: &AnalysisHandle) -> Result<AnalysisReport, ScanError> {
        let url = format!("{}/analyses/{}", self.config.base_url, handle);

        let response = self
            .client
            .get(&url)
            .header("x-apikey", self.config.api_key.expose_secret())
            .send()
            .await
            .map_err(|e| ScanError::poll(SERVICE_NAME, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScanError::poll(
                SERVICE_NAME,
                format!("API error: {status}"),
            ));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ScanError::poll(SERVICE_NAME, e.to_string()))?;

        self.parse_report(&body)
    }
}
