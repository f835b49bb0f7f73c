//! HTTP client for the analysis service.
//!
//! One call to [`AnalysisClient::analyze`] sends exactly one
//! `POST /api/analyze` request. There is no retry and no queuing.

use crate::config::ServerConfig;
use crate::error::{AnalysisError, GENERIC_SERVER_ERROR};
use crate::models::{AnalysisRequest, AnalysisResult, ErrorBody};
use anyhow::{Context, Result};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Connection settings for the client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the service, e.g. `http://127.0.0.1:5000`.
    pub server_url: String,
    /// Path of the analysis endpoint.
    pub endpoint: String,
    /// Client-side timeout. `None` waits as long as the transport allows.
    pub timeout_seconds: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".to_string(),
            endpoint: "/api/analyze".to_string(),
            timeout_seconds: None,
        }
    }
}

impl From<&ServerConfig> for ClientConfig {
    fn from(config: &ServerConfig) -> Self {
        Self {
            server_url: config.url.clone(),
            endpoint: config.endpoint.clone(),
            timeout_seconds: config.timeout_seconds,
        }
    }
}

impl ClientConfig {
    /// Full URL of the analysis endpoint.
    pub fn analyze_url(&self) -> String {
        let base = self.server_url.trim_end_matches('/');
        if self.endpoint.starts_with('/') {
            format!("{}{}", base, self.endpoint)
        } else {
            format!("{}/{}", base, self.endpoint)
        }
    }
}

/// Client for the analysis endpoint.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl AnalysisClient {
    /// Create a client for the given service.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build().context("Failed to create HTTP client")?;

        info!("Analysis endpoint: {}", config.analyze_url());

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Send one analysis request and decode the response.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> std::result::Result<AnalysisResult, AnalysisError> {
        let url = self.config.analyze_url();
        debug!("POST {} ({} chars)", url, request.text.chars().count());

        let response = self
            .http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            // An unreadable or non-object error body counts as an empty one.
            let body = response
                .json::<Value>()
                .await
                .map(ErrorBody::from_value)
                .unwrap_or_default();
            if let Some(ref details) = body.details {
                debug!("Service error details: {}", details);
            }
            let message = body
                .error
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string());
            warn!("Analysis service returned {}: {}", status, message);
            return Err(AnalysisError::Server { status, message });
        }

        let value: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.transport_error(e)
            } else {
                debug!("Failed to decode analysis body: {}", e);
                AnalysisError::MalformedResponse
            }
        })?;

        AnalysisResult::from_value(value).ok_or(AnalysisError::MalformedResponse)
    }

    fn transport_error(&self, e: reqwest::Error) -> AnalysisError {
        match self.config.timeout_seconds {
            Some(secs) if e.is_timeout() => AnalysisError::Timeout(secs),
            _ => AnalysisError::Transport(e),
        }
    }
}
