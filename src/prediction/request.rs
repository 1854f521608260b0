// ABOUTME: Prediction request payload schema and the profile-to-payload builder
// ABOUTME: Every field passes through the normalizer; output is deterministic per profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Prediction Request Builder
//!
//! The external prediction service accepts one fixed payload shape. That
//! shape lives here as an explicit struct so schema drift is a visible code
//! change, and [`PredictionRequest::from_profile`] is the only place a
//! stored profile is mapped onto it.
//!
//! The builder is a pure function of the stored record: same profile in,
//! byte-identical payload out. It assumes the record passed write-time
//! validation and never re-rejects one.

use crate::models::HealthProfile;
use crate::normalizer::{convert_feet_to_cm, normalize_field, safe_number};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The exact payload contract of the external prediction service.
///
/// Keys are snake_case except `userId`, matching the deployed service
/// schema. Categorical fields carry normalized tokens, never raw user
/// input; height is in whole centimeters via the canonical conversion rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Age in years
    pub age: i64,
    /// Normalized gender token
    pub gender: String,
    /// Height in whole centimeters
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
    /// Body mass index (0 when the stored record has none)
    pub bmi: f64,
    /// Systolic blood pressure, 0 when unknown
    pub blood_pressure_systolic: f64,
    /// Diastolic blood pressure, 0 when unknown
    pub blood_pressure_diastolic: f64,
    /// Cholesterol level, 0 when unknown
    pub cholesterol_level: f64,
    /// Blood sugar level, 0 when unknown
    pub blood_sugar_level: f64,
    /// Chronic disease token, "No Disease" when unknown
    pub chronic_disease: String,
    /// Genetic risk token, yes/no vocabulary
    pub genetic_risk_factor: String,
    /// Allergies token, yes/no vocabulary
    pub allergies: String,
    /// Food aversion token, yes/no vocabulary
    pub food_aversion: String,
    /// Average daily steps, 0 when unknown
    pub daily_steps: i64,
    /// Exercise frequency token ("Never" is a legitimate value)
    pub exercise_frequency: String,
    /// Sleep hours per night, 6 when unknown
    pub sleep_hours: f64,
    /// Alcohol consumption token, yes/no vocabulary
    pub alcohol_consumption: String,
    /// Smoking habit token, yes/no vocabulary
    pub smoking_habit: String,
    /// Dietary pattern token, "Balanced" when unknown
    pub dietary_habits: String,
    /// Preferred cuisine token, "Indian" when unknown
    pub preferred_cuisine: String,
    /// Owning user id
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

impl PredictionRequest {
    /// Build the upstream payload from a stored profile.
    ///
    /// Pure and deterministic: no clock, no randomness, every field routed
    /// through the normalizer's conversion rules and defaulting table.
    #[must_use]
    pub fn from_profile(profile: &HealthProfile) -> Self {
        Self {
            age: profile.age,
            gender: normalize_field("gender", Some(profile.gender.as_str())),
            height: convert_feet_to_cm(profile.height_ft),
            weight: profile.weight_kg,
            bmi: safe_number(profile.bmi, 0.0),
            blood_pressure_systolic: safe_number(profile.blood_pressure_systolic, 0.0),
            blood_pressure_diastolic: safe_number(profile.blood_pressure_diastolic, 0.0),
            cholesterol_level: safe_number(profile.cholesterol_level, 0.0),
            blood_sugar_level: safe_number(profile.blood_sugar_level, 0.0),
            chronic_disease: normalize_field("chronic_disease", profile.chronic_disease.as_deref()),
            genetic_risk_factor: normalize_field(
                "genetic_risk_factor",
                profile.genetic_risk_factor.as_deref(),
            ),
            allergies: normalize_field("allergies", profile.allergies.as_deref()),
            food_aversion: normalize_field("food_aversion", profile.food_aversion.as_deref()),
            daily_steps: profile.daily_steps.unwrap_or(0),
            exercise_frequency: normalize_field(
                "exercise_frequency",
                profile.exercise_frequency.as_deref(),
            ),
            sleep_hours: safe_number(profile.sleep_hours, 6.0),
            alcohol_consumption: normalize_field(
                "alcohol_consumption",
                profile.alcohol_consumption.as_deref(),
            ),
            smoking_habit: normalize_field("smoking_habit", profile.smoking_habit.as_deref()),
            dietary_habits: normalize_field("dietary_habits", profile.dietary_habits.as_deref()),
            preferred_cuisine: normalize_field(
                "preferred_cuisine",
                profile.preferred_cuisine.as_deref(),
            ),
            user_id: profile.user_id,
        }
    }
}
