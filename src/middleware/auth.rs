// ABOUTME: Bearer-token authentication extractor for protected routes
// ABOUTME: Resolves Authorization headers to a user identity, answering 401 uniformly
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication middleware.
//!
//! [`AuthedUser`] is an axum extractor: any handler that takes one is
//! gated behind a valid `Authorization: Bearer <token>` header. Missing,
//! malformed, invalid, and expired credentials all surface as 401; the
//! distinction is logged server-side only.

use crate::auth::JwtValidationError;
use crate::errors::AppError;
use crate::server::ServerResources;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::sync::Arc;
use uuid::Uuid;

/// The authenticated caller, resolved from a bearer token
#[derive(Debug, Clone)]
pub struct AuthedUser {
    /// Authenticated user id
    pub user_id: Uuid,
    /// Email recorded in the token claims
    pub email: String,
}

#[async_trait]
impl FromRequestParts<Arc<ServerResources>> for AuthedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ServerResources>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(AppError::auth_required)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::auth_invalid("Authorization header is not a bearer token"))?;

        let claims = state.auth_manager.validate_token(token).map_err(|e| {
            tracing::warn!("request rejected: {e}");
            match e {
                JwtValidationError::TokenExpired { .. } => AppError::auth_expired(),
                JwtValidationError::TokenInvalid { .. }
                | JwtValidationError::TokenMalformed { .. } => {
                    AppError::auth_invalid("Invalid or expired token")
                }
            }
        })?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::auth_invalid("Invalid or expired token"))?;

        Ok(Self {
            user_id,
            email: claims.email,
        })
    }
}
