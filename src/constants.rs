// ABOUTME: System-wide constants and configuration defaults for the NutriPlan API
// ABOUTME: Contains service identity, limits, and default values used across modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Application constants and default configuration values.

/// Service identity
pub mod service {
    /// Service name used in logs and error messages
    pub const NAME: &str = "nutriplan-server";

    /// Server version from Cargo.toml
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Name used when reporting upstream prediction-service failures
    pub const PREDICTION_SERVICE: &str = "prediction service";
}

/// Limits and validation thresholds
pub mod limits {
    /// Default JWT expiry in hours
    pub const DEFAULT_SESSION_HOURS: i64 = 24;

    /// Minimum accepted password length at registration
    pub const MIN_PASSWORD_LENGTH: usize = 8;

    /// Inclusive upper bound for `sleep_hours`
    pub const MAX_SLEEP_HOURS: f64 = 24.0;
}

/// Network and external-service defaults
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8000;

    /// Default SQLite database URL
    pub const DATABASE_URL: &str = "sqlite:./data/nutriplan.db";

    /// Default base URL of the external prediction service
    pub const PREDICTION_BASE_URL: &str = "https://diet-recommendation-1-7t28.onrender.com";

    /// Default prediction request timeout in seconds
    pub const PREDICTION_TIMEOUT_SECS: u64 = 30;
}
