// ABOUTME: Prediction pipeline - request construction and the external service client
// ABOUTME: Maps stored health profiles onto the upstream contract and relays responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Prediction Pipeline
//!
//! Everything between a stored [`crate::models::HealthProfile`] and the
//! external diet-recommendation service: the schema-stable request payload
//! ([`request`]) and the HTTP client that delivers it ([`client`]).

pub mod client;
pub mod request;

pub use client::{PredictionClient, PredictionServiceConfig};
pub use request::PredictionRequest;
