// ABOUTME: Health profile route handlers - upsert and fetch of the per-user record
// ABOUTME: Validates loosely-typed form input at the boundary and derives BMI on write
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Health profile routes.
//!
//! The write path accepts loosely-typed form input (numbers may arrive as
//! strings), coerces it totally, validates the required physical fields,
//! recomputes BMI, and upserts the single per-user record. Validation
//! happens here, before persistence - the prediction pipeline downstream
//! assumes a validated record.

use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use crate::middleware::AuthedUser;
use crate::models::ProfileUpdate;
use crate::normalizer::{coerce_number, compute_bmi};
use crate::server::ServerResources;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Deserializer};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Raw profile submission. Numeric fields tolerate string encodings; the
/// coercion is total and never fails deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProfileRequest {
    /// Age in years
    #[serde(deserialize_with = "flexible_number")]
    pub age: Option<f64>,
    /// Gender
    pub gender: Option<String>,
    /// Height in feet
    #[serde(deserialize_with = "flexible_number")]
    pub height: Option<f64>,
    /// Weight in kilograms
    #[serde(deserialize_with = "flexible_number")]
    pub weight: Option<f64>,
    /// Diagnosed chronic disease
    pub chronic_disease: Option<String>,
    /// Systolic blood pressure
    #[serde(deserialize_with = "flexible_number")]
    pub blood_pressure_systolic: Option<f64>,
    /// Diastolic blood pressure
    #[serde(deserialize_with = "flexible_number")]
    pub blood_pressure_diastolic: Option<f64>,
    /// Cholesterol level
    #[serde(deserialize_with = "flexible_number")]
    pub cholesterol_level: Option<f64>,
    /// Blood sugar level
    #[serde(deserialize_with = "flexible_number")]
    pub blood_sugar_level: Option<f64>,
    /// Known hereditary risk factor
    pub genetic_risk_factor: Option<String>,
    /// Food allergies
    pub allergies: Option<String>,
    /// Foods the user refuses to eat
    pub food_aversion: Option<String>,
    /// Average daily step count
    #[serde(deserialize_with = "flexible_number")]
    pub daily_steps: Option<f64>,
    /// Exercise frequency
    pub exercise_frequency: Option<String>,
    /// Average sleep per night
    #[serde(deserialize_with = "flexible_number")]
    pub sleep_hours: Option<f64>,
    /// Alcohol consumption habit
    pub alcohol_consumption: Option<String>,
    /// Smoking habit
    pub smoking_habit: Option<String>,
    /// Dietary pattern
    pub dietary_habits: Option<String>,
    /// Preferred cuisine
    pub preferred_cuisine: Option<String>,
}

/// Create or update the caller's health profile.
///
/// Returns 201 on first submission, 200 on subsequent updates.
///
/// # Errors
///
/// Returns a validation error when required fields are missing or out of
/// range, or a database error if the write fails.
pub async fn upsert(
    State(resources): State<Arc<ServerResources>>,
    user: AuthedUser,
    Json(request): Json<ProfileRequest>,
) -> AppResult<Response> {
    let update = validate(request)?;

    let existing = resources.database.profile_by_user(user.user_id).await?;
    let profile = resources
        .database
        .upsert_profile(user.user_id, &update)
        .await?;

    let (status, message) = if existing.is_some() {
        (StatusCode::OK, "Health profile updated")
    } else {
        (StatusCode::CREATED, "Health profile saved")
    };
    info!("{message} for user {}", user.user_id);

    Ok((
        status,
        Json(json!({
            "success": true,
            "message": message,
            "profile": profile,
        })),
    )
        .into_response())
}

/// Fetch the caller's stored health profile.
///
/// # Errors
///
/// Returns 404 when no profile exists for the authenticated user.
pub async fn fetch(
    State(resources): State<Arc<ServerResources>>,
    user: AuthedUser,
) -> AppResult<Json<serde_json::Value>> {
    let profile = resources
        .database
        .profile_by_user(user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Health profile"))?;

    Ok(Json(json!({
        "success": true,
        "profile": profile,
    })))
}

/// Boundary validation: required physical fields must be present and
/// positive, `sleep_hours` must lie in [0, 24], and BMI is derived here so
/// it can never disagree with the stored height/weight.
fn validate(request: ProfileRequest) -> AppResult<ProfileUpdate> {
    let age = request.age.ok_or_else(|| AppError::missing_field("age"))?;
    if age <= 0.0 || age.fract() != 0.0 {
        return Err(AppError::invalid_input("age must be a positive whole number"));
    }

    let gender = request
        .gender
        .as_deref()
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .ok_or_else(|| AppError::missing_field("gender"))?
        .to_owned();

    let height_ft = request
        .height
        .ok_or_else(|| AppError::missing_field("height"))?;
    if height_ft <= 0.0 {
        return Err(AppError::invalid_input("height must be positive"));
    }

    let weight_kg = request
        .weight
        .ok_or_else(|| AppError::missing_field("weight"))?;
    if weight_kg <= 0.0 {
        return Err(AppError::invalid_input("weight must be positive"));
    }

    if let Some(sleep) = request.sleep_hours {
        if !(0.0..=limits::MAX_SLEEP_HOURS).contains(&sleep) {
            return Err(AppError::value_out_of_range(
                "sleep_hours",
                "must be between 0 and 24 hours",
            ));
        }
    }

    Ok(ProfileUpdate {
        age: age as i64,
        gender,
        height_ft,
        weight_kg,
        bmi: compute_bmi(Some(height_ft), Some(weight_kg)),
        chronic_disease: clean(request.chronic_disease),
        blood_pressure_systolic: request.blood_pressure_systolic,
        blood_pressure_diastolic: request.blood_pressure_diastolic,
        cholesterol_level: request.cholesterol_level,
        blood_sugar_level: request.blood_sugar_level,
        genetic_risk_factor: clean(request.genetic_risk_factor),
        allergies: clean(request.allergies),
        food_aversion: clean(request.food_aversion),
        daily_steps: request.daily_steps.map(|steps| steps as i64),
        exercise_frequency: clean(request.exercise_frequency),
        sleep_hours: request.sleep_hours,
        alcohol_consumption: clean(request.alcohol_consumption),
        smoking_habit: clean(request.smoking_habit),
        dietary_habits: clean(request.dietary_habits),
        preferred_cuisine: clean(request.preferred_cuisine),
    })
}

/// Trim an optional text field; empty strings collapse to `None`
fn clean(value: Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Total numeric deserialization: accepts numbers and numeric strings,
/// maps everything else to `None`
fn flexible_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_number(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_request() -> ProfileRequest {
        ProfileRequest {
            age: Some(30.0),
            gender: Some("Female".into()),
            height: Some(5.5),
            weight: Some(65.0),
            ..ProfileRequest::default()
        }
    }

    #[test]
    fn test_validate_derives_bmi() {
        let update = validate(minimal_request()).unwrap();
        assert_eq!(update.age, 30);
        assert_eq!(update.gender, "Female");
        assert_eq!(update.bmi, Some(23.13));
    }

    #[test]
    fn test_validate_requires_physical_fields() {
        let mut request = minimal_request();
        request.weight = None;
        let err = validate(request).unwrap_err();
        assert!(err.message.contains("weight"));

        let mut request = minimal_request();
        request.height = Some(0.0);
        let err = validate(request).unwrap_err();
        assert!(err.message.contains("height"));

        let mut request = minimal_request();
        request.age = Some(30.5);
        assert!(validate(request).is_err());
    }

    #[test]
    fn test_validate_sleep_hours_bounds() {
        let mut request = minimal_request();
        request.sleep_hours = Some(30.0);
        let err = validate(request).unwrap_err();
        assert!(err.message.contains("sleep_hours"));

        let mut request = minimal_request();
        request.sleep_hours = Some(-1.0);
        assert!(validate(request).is_err());

        let mut request = minimal_request();
        request.sleep_hours = Some(24.0);
        assert!(validate(request).is_ok());
    }

    #[test]
    fn test_flexible_payload_accepts_string_numbers() {
        let request: ProfileRequest = serde_json::from_value(serde_json::json!({
            "age": "30",
            "gender": "Female",
            "height": "5.5",
            "weight": 65,
            "blood_pressure_systolic": "",
            "sleep_hours": "7.5",
        }))
        .unwrap();

        assert_eq!(request.age, Some(30.0));
        assert_eq!(request.height, Some(5.5));
        assert_eq!(request.blood_pressure_systolic, None);
        assert_eq!(request.sleep_hours, Some(7.5));

        let update = validate(request).unwrap();
        assert_eq!(update.sleep_hours, Some(7.5));
    }

    #[test]
    fn test_clean_collapses_empty_strings() {
        assert_eq!(clean(Some("  Keto ".into())), Some("Keto".to_owned()));
        assert_eq!(clean(Some("   ".into())), None);
        assert_eq!(clean(None), None);
    }
}
