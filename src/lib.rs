// ABOUTME: Main library entry point for the NutriPlan diet-recommendation API
// ABOUTME: Exposes auth, storage, normalization, and prediction-proxy modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # NutriPlan Server
//!
//! A REST backend for personalized diet recommendations. Users register and
//! log in, submit a health-profile form, and receive a nutrition
//! recommendation fetched from an external ML prediction service.
//!
//! ## Architecture
//!
//! The server follows a modular architecture:
//! - **Normalizer**: pure conversions from raw form input to canonical
//!   units and categorical tokens
//! - **Database**: sqlx/SQLite storage for users and the one-per-user
//!   health profile
//! - **Prediction**: the upstream payload schema, builder, and HTTP client
//! - **Auth**: HS256 JWT issuance/verification and the bearer extractor
//! - **Routes**: the axum HTTP surface tying the pieces together
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nutriplan_server::config::ServerConfig;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = ServerConfig::from_env()?;
//! println!("NutriPlan server configured for port {}", config.http_port);
//! # Ok(())
//! # }
//! ```

/// Authentication and token management
pub mod auth;

/// Configuration management
pub mod config;

/// Application constants and default configuration values
pub mod constants;

/// User and health-profile storage
pub mod database;

/// Unified error handling
pub mod errors;

/// Logging configuration
pub mod logging;

/// Request middleware
pub mod middleware;

/// Core data models
pub mod models;

/// Unit and category normalization
pub mod normalizer;

/// Prediction request construction and the external service client
pub mod prediction;

/// HTTP route handlers
pub mod routes;

/// Server resources and the serve loop
pub mod server;
