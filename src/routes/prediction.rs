// ABOUTME: Diet recommendation route - proxies the stored profile to the prediction service
// ABOUTME: Loads and normalizes the profile, relays upstream responses and failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prediction route.
//!
//! Loads the caller's stored profile, builds the normalized upstream
//! payload, and relays the prediction service's answer. A failed upstream
//! call surfaces as `{success: false, error}` with status 500; the profile
//! itself is untouched by prediction failures.

use crate::errors::{AppError, AppResult};
use crate::middleware::AuthedUser;
use crate::prediction::PredictionRequest;
use crate::server::ServerResources;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// Request a diet recommendation for the authenticated user.
///
/// # Errors
///
/// Returns 404 when the user has no stored profile; upstream failures are
/// translated to a 500 `{success: false, error}` body.
pub async fn recommend(
    State(resources): State<Arc<ServerResources>>,
    user: AuthedUser,
) -> AppResult<Response> {
    let profile = resources
        .database
        .profile_by_user(user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Health profile"))?;

    let payload = PredictionRequest::from_profile(&profile);

    match resources.prediction.recommend(&payload).await {
        Ok(prediction) => {
            info!("prediction delivered for user {}", user.user_id);
            Ok(Json(json!({
                "success": true,
                "prediction": prediction,
            }))
            .into_response())
        }
        Err(err) => {
            let message = err.message;
            warn!(
                "prediction request failed for user {}: {message}",
                user.user_id
            );
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": message,
                })),
            )
                .into_response())
        }
    }
}
