// ABOUTME: Core data models for the NutriPlan API
// ABOUTME: Defines User, HealthProfile and the validated profile write payload
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Data Models
//!
//! Core data structures used throughout the NutriPlan server: the user
//! account, the per-user health profile, and the validated write payload
//! the profile route produces.
//!
//! ## Design Principles
//!
//! - **Canonical units**: height is stored in feet, weight in kilograms;
//!   BMI is derived and recomputed on every write
//! - **Serializable**: all models support JSON serialization for API
//!   responses
//! - **One profile per user**: the profile is keyed by the owning user id

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// User email address (stored lower-case, used for login)
    pub email: String,
    /// Unique display handle
    pub username: String,
    /// Hashed password for authentication
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the user account was created
    pub created_at: DateTime<Utc>,
    /// Last time the user accessed the system
    pub last_active: DateTime<Utc>,
    /// Whether the user account is active
    pub is_active: bool,
}

impl User {
    /// Create a new user with a fresh id and current timestamps
    #[must_use]
    pub fn new(email: String, username: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.to_lowercase(),
            username,
            password_hash,
            created_at: now,
            last_active: now,
            is_active: true,
        }
    }
}

/// The stored per-user health and lifestyle record.
///
/// Exactly one exists per user; submissions upsert it in place. Height is
/// kept in feet as entered; `bmi` is derived from height and weight at
/// write time and is `None` only when a stored record predates validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthProfile {
    /// Owning user (primary key - at most one profile per user)
    pub user_id: Uuid,
    /// Age in years
    pub age: i64,
    /// Gender as submitted
    pub gender: String,
    /// Height in feet (fractional feet, e.g. 5.5 = five and a half feet)
    pub height_ft: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Body mass index, `round(weight / height_m^2, 2)`
    pub bmi: Option<f64>,
    /// Diagnosed chronic disease, if any
    pub chronic_disease: Option<String>,
    /// Systolic blood pressure (mmHg)
    pub blood_pressure_systolic: Option<f64>,
    /// Diastolic blood pressure (mmHg)
    pub blood_pressure_diastolic: Option<f64>,
    /// Cholesterol level (mg/dL)
    pub cholesterol_level: Option<f64>,
    /// Blood sugar level (mg/dL)
    pub blood_sugar_level: Option<f64>,
    /// Known hereditary risk factor
    pub genetic_risk_factor: Option<String>,
    /// Food allergies
    pub allergies: Option<String>,
    /// Foods the user refuses to eat
    pub food_aversion: Option<String>,
    /// Average daily step count
    pub daily_steps: Option<i64>,
    /// Exercise frequency (e.g. "Never", "Weekly", "Daily")
    pub exercise_frequency: Option<String>,
    /// Average sleep per night, 0-24 hours
    pub sleep_hours: Option<f64>,
    /// Alcohol consumption habit
    pub alcohol_consumption: Option<String>,
    /// Smoking habit
    pub smoking_habit: Option<String>,
    /// Dietary pattern (e.g. "Balanced", "Keto", "Vegan")
    pub dietary_habits: Option<String>,
    /// Preferred cuisine for meal suggestions
    pub preferred_cuisine: Option<String>,
    /// When the profile row was created
    pub created_at: DateTime<Utc>,
    /// When the profile row was last updated
    pub updated_at: DateTime<Utc>,
}

/// A validated profile write, produced by the profile route after boundary
/// validation and BMI derivation. Optional fields left `None` preserve the
/// stored value on update.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// Age in years (validated positive)
    pub age: i64,
    /// Gender (validated non-empty)
    pub gender: String,
    /// Height in feet (validated positive)
    pub height_ft: f64,
    /// Weight in kilograms (validated positive)
    pub weight_kg: f64,
    /// Derived BMI
    pub bmi: Option<f64>,
    /// Diagnosed chronic disease
    pub chronic_disease: Option<String>,
    /// Systolic blood pressure
    pub blood_pressure_systolic: Option<f64>,
    /// Diastolic blood pressure
    pub blood_pressure_diastolic: Option<f64>,
    /// Cholesterol level
    pub cholesterol_level: Option<f64>,
    /// Blood sugar level
    pub blood_sugar_level: Option<f64>,
    /// Known hereditary risk factor
    pub genetic_risk_factor: Option<String>,
    /// Food allergies
    pub allergies: Option<String>,
    /// Foods the user refuses to eat
    pub food_aversion: Option<String>,
    /// Average daily step count
    pub daily_steps: Option<i64>,
    /// Exercise frequency
    pub exercise_frequency: Option<String>,
    /// Average sleep per night
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
