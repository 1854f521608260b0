// ABOUTME: User authentication route handlers for registration and login
// ABOUTME: Validates credentials, hashes passwords with bcrypt, and issues JWT tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication routes for user account management.
//!
//! Registration rejects duplicate emails/usernames with 409; login answers
//! 401 for unknown emails and wrong passwords alike so the two cases are
//! indistinguishable to callers.

use crate::constants::limits;
use crate::database::is_unique_violation;
use crate::errors::{AppError, AppResult};
use crate::models::User;
use crate::server::ServerResources;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// User registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Desired unique handle
    pub username: String,
    /// Email address used for login
    pub email: String,
    /// Plaintext password, hashed before storage
    pub password: String,
}

/// User registration response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Always `true`
    pub success: bool,
    /// Id of the created user
    pub user_id: String,
    /// Human-readable confirmation
    pub message: String,
}

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Registered email address
    pub email: String,
    /// Plaintext password
    pub password: String,
}

/// User info for login response
#[derive(Debug, Serialize)]
pub struct UserInfo {
    /// User id
    pub id: String,
    /// Email address
    pub email: String,
    /// Unique handle
    pub username: String,
}

/// User login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Always `true`
    pub success: bool,
    /// Bearer token for subsequent requests
    pub access_token: String,
    /// Token expiry as RFC 3339
    pub expires_at: String,
    /// The authenticated user
    pub user: UserInfo,
}

/// Handle user registration
///
/// # Errors
///
/// Returns an error if:
/// - Email format is invalid or the password is too short
/// - Email or username is already taken
/// - Database operation fails
pub async fn register(
    State(resources): State<Arc<ServerResources>>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    info!("user registration attempt for email: {}", request.email);

    if !is_valid_email(&request.email) {
        return Err(AppError::invalid_input("Invalid email format"));
    }
    if !is_valid_password(&request.password) {
        return Err(AppError::invalid_input(format!(
            "Password must be at least {} characters",
            limits::MIN_PASSWORD_LENGTH
        )));
    }
    let username = request.username.trim();
    if username.is_empty() {
        return Err(AppError::missing_field("username"));
    }

    if resources.database.user_by_email(&request.email).await?.is_some() {
        return Err(AppError::already_exists("Email"));
    }
    if resources
        .database
        .user_by_username(username)
        .await?
        .is_some()
    {
        return Err(AppError::already_exists("Username"));
    }

    let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))?;

    let user = User::new(request.email.clone(), username.to_owned(), password_hash);

    // The pre-checks above race with concurrent registrations; the unique
    // constraints are the source of truth
    let user_id = resources.database.create_user(&user).await.map_err(|e| {
        if is_unique_violation(&e) {
            AppError::already_exists("Email or username")
        } else {
            AppError::from(e)
        }
    })?;

    info!("user registered successfully: {} ({user_id})", request.email);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            user_id: user_id.to_string(),
            message: "Registered successfully".into(),
        }),
    ))
}

/// Handle user login
///
/// # Errors
///
/// Returns an error if:
/// - Email or password is missing
/// - Credentials do not match a registered, active user
/// - Database operation or token generation fails
pub async fn login(
    State(resources): State<Arc<ServerResources>>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    info!("user login attempt for email: {}", request.email);

    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(AppError::missing_field("email and password"));
    }

    let user = resources
        .database
        .user_by_email(&request.email)
        .await?
        .ok_or_else(|| AppError::auth_invalid("Invalid email or password"))?;

    let password_matches = bcrypt::verify(&request.password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("password verification failed: {e}")))?;
    if !password_matches {
        warn!("invalid password for user: {}", request.email);
        return Err(AppError::auth_invalid("Invalid email or password"));
    }

    if !user.is_active {
        warn!("login blocked for deactivated user: {}", request.email);
        return Err(AppError::auth_invalid("Invalid email or password"));
    }

    resources.database.update_last_active(user.id).await?;

    let access_token = resources.auth_manager.generate_token(&user)?;
    let expires_at = Utc::now() + Duration::hours(resources.auth_manager.token_expiry_hours());

    info!("user logged in successfully: {} ({})", request.email, user.id);

    Ok(Json(LoginResponse {
        success: true,
        access_token,
        expires_at: expires_at.to_rfc3339(),
        user: UserInfo {
            id: user.id.to_string(),
            email: user.email,
            username: user.username,
        },
    }))
}

/// Simple email validation
fn is_valid_email(email: &str) -> bool {
    if email.len() <= 5 {
        return false;
    }
    let Some(at_pos) = email.find('@') else {
        return false;
    };
    if at_pos == 0 || at_pos == email.len() - 1 {
        return false;
    }
    let domain_part = &email[at_pos + 1..];
    domain_part.contains('.')
}

const fn is_valid_password(password: &str) -> bool {
    password.len() >= limits::MIN_PASSWORD_LENGTH
}
