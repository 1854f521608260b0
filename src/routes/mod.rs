// ABOUTME: HTTP route assembly for the NutriPlan API
// ABOUTME: Wires auth, profile, prediction, and monitoring routes with CORS and tracing
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP routes.
//!
//! Route handlers are thin: they validate at the boundary, delegate to the
//! storage and prediction layers, and translate failures through
//! [`crate::errors::AppError`].

pub mod auth;
pub mod health;
pub mod prediction;
pub mod profile;

use crate::server::ServerResources;
use axum::routing::post;
use axum::Router;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::Method;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the complete application router
pub fn router(resources: Arc<ServerResources>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route(
            "/api/health/profile",
            post(profile::upsert).get(profile::fetch),
        )
        .route("/api/predict/recommendation", post(prediction::recommend))
        .merge(health::HealthRoutes::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(resources)
}
