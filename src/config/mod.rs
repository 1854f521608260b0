// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Loads typed server, auth, and prediction-service configuration from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment-based configuration management for production deployment.
//!
//! All knobs load from environment variables with sensible defaults; the
//! prediction-service settings become an explicit [`PredictionServiceConfig`]
//! handed to the client at construction rather than read ambiently.

use crate::auth::generate_jwt_secret;
use crate::constants::{defaults, limits};
use crate::prediction::client::PredictionServiceConfig;
use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use tracing::warn;

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP port to bind
    pub http_port: u16,
    /// SQLite database URL
    pub database_url: String,
    /// Authentication settings
    pub auth: AuthConfig,
    /// External prediction-service settings
    pub prediction: PredictionServiceConfig,
}

/// JWT signing configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: Vec<u8>,
    /// Token lifetime in hours
    pub token_expiry_hours: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a set variable fails to parse, or if no JWT
    /// secret is configured and the system RNG cannot produce one.
    pub fn from_env() -> Result<Self> {
        let http_port = parse_var("HTTP_PORT", defaults::HTTP_PORT)?;
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| defaults::DATABASE_URL.to_owned());

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret.into_bytes(),
            _ => {
                warn!("JWT_SECRET not set - generating an ephemeral secret; tokens will not survive a restart");
                generate_jwt_secret()?.to_vec()
            }
        };
        let token_expiry_hours = parse_var("TOKEN_EXPIRY_HOURS", limits::DEFAULT_SESSION_HOURS)?;

        let base_url = env::var("PREDICTION_SERVICE_URL")
            .unwrap_or_else(|_| defaults::PREDICTION_BASE_URL.to_owned());
        let timeout_secs =
            parse_var("PREDICTION_TIMEOUT_SECS", defaults::PREDICTION_TIMEOUT_SECS)?;

        Ok(Self {
            http_port,
            database_url,
            auth: AuthConfig {
                jwt_secret,
                token_expiry_hours,
            },
            prediction: PredictionServiceConfig {
                base_url,
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }

    /// One-line configuration summary for startup logging; never includes
    /// secrets
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "port={} database={} prediction={} timeout={}s token_expiry={}h",
            self.http_port,
            self.database_url,
            self.prediction.base_url,
            self.prediction.timeout.as_secs(),
            self.auth.token_expiry_hours,
        )
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("invalid value for {key}: {raw}")),
        Err(_) => Ok(default),
    }
}
