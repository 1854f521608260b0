// ABOUTME: HTTP client for the external diet-recommendation prediction service
// ABOUTME: One bounded-timeout POST per call with upstream error translation, no retries
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Prediction Service Client
//!
//! This module provides the client for the external ML prediction service,
//! which returns a diet/nutrition recommendation for a normalized health
//! payload. The service is opaque: its response body is relayed verbatim to
//! the caller.
//!
//! # Behavior
//! - One POST to `<base_url>/predict/recommendation` per call
//! - Bounded timeout (default 30 s), configured at construction
//! - Non-2xx and transport failures translate to [`AppError`], carrying the
//!   upstream error body when one is present
//! - Never retries; retry policy belongs to the caller

use crate::constants::{defaults, service};
use crate::errors::AppError;
use crate::prediction::request::PredictionRequest;
use std::time::Duration;

/// Prediction service client configuration.
///
/// An explicit object handed to [`PredictionClient::new`]; nothing in the
/// client reads the environment.
#[derive(Debug, Clone)]
pub struct PredictionServiceConfig {
    /// Base URL of the prediction service
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for PredictionServiceConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::PREDICTION_BASE_URL.to_owned(),
            timeout: Duration::from_secs(defaults::PREDICTION_TIMEOUT_SECS),
        }
    }
}

/// Client for the external prediction service
#[derive(Debug, Clone)]
pub struct PredictionClient {
    config: PredictionServiceConfig,
    http_client: reqwest::Client,
}

impl PredictionClient {
    /// Create a new prediction client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: PredictionServiceConfig) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// The full endpoint URL this client posts to.
    ///
    /// Trailing slashes on the base URL are stripped; a base URL that
    /// already ends in the endpoint path is used as-is.
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        if base.ends_with("/predict/recommendation") {
            return base.to_owned();
        }
        format!("{base}/predict/recommendation")
    }

    /// Request a diet recommendation for the given payload.
    ///
    /// On success the upstream response body is returned verbatim as JSON.
    /// Exactly one attempt is made per call.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] with code `EXTERNAL_SERVICE_ERROR` on network
    /// failure, timeout, non-2xx status, or an unparseable response body.
    pub async fn recommend(
        &self,
        request: &PredictionRequest,
    ) -> Result<serde_json::Value, AppError> {
        let url = self.endpoint_url();
        tracing::debug!("sending prediction payload to {url}");

        let response = self
            .http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                let message = if e.is_timeout() {
                    format!("request timed out after {:?}", self.config.timeout)
                } else {
                    e.to_string()
                };
                AppError::external_service(service::PREDICTION_SERVICE, message)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                format!("HTTP {status}")
            } else {
                format!("HTTP {status}: {body}")
            };
            return Err(AppError::external_service(
                service::PREDICTION_SERVICE,
                message,
            ));
        }

        response.json::<serde_json::Value>().await.map_err(|e| {
            AppError::external_service(
                service::PREDICTION_SERVICE,
                format!("invalid JSON response: {e}"),
            )
        })
    }
}
