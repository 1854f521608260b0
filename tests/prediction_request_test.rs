// ABOUTME: Tests for the prediction request builder
// ABOUTME: Validates field mapping, declarative defaults, and payload determinism
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::Utc;
use nutriplan_server::models::HealthProfile;
use nutriplan_server::prediction::PredictionRequest;
use uuid::Uuid;

fn full_profile() -> HealthProfile {
    let now = Utc::now();
    HealthProfile {
        user_id: Uuid::new_v4(),
        age: 30,
        gender: "Female".into(),
        height_ft: 5.5,
        weight_kg: 65.0,
        bmi: Some(23.13),
        chronic_disease: Some("Diabetes".into()),
        blood_pressure_systolic: Some(120.0),
        blood_pressure_diastolic: Some(80.0),
        cholesterol_level: Some(190.0),
        blood_sugar_level: Some(95.0),
        genetic_risk_factor: Some("Yes".into()),
        allergies: Some("Peanuts".into()),
        food_aversion: Some("Mushrooms".into()),
        daily_steps: Some(8000),
        exercise_frequency: Some("Weekly".into()),
        sleep_hours: Some(7.5),
        alcohol_consumption: Some("Occasionally".into()),
        smoking_habit: Some("Non-smoker".into()),
        dietary_habits: Some("Keto".into()),
        preferred_cuisine: Some("Italian".into()),
        created_at: now,
        updated_at: now,
    }
}

fn bare_profile() -> HealthProfile {
    let now = Utc::now();
    HealthProfile {
        user_id: Uuid::new_v4(),
        age: 45,
        gender: "Male".into(),
        height_ft: 6.0,
        weight_kg: 80.0,
        bmi: None,
        chronic_disease: None,
        blood_pressure_systolic: None,
        blood_pressure_diastolic: None,
        cholesterol_level: None,
        blood_sugar_level: None,
        genetic_risk_factor: None,
        allergies: None,
        food_aversion: None,
        daily_steps: None,
        exercise_frequency: None,
        sleep_hours: None,
        alcohol_consumption: None,
        smoking_habit: None,
        dietary_habits: None,
        preferred_cuisine: None,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn test_field_mapping_from_full_profile() {
    let profile = full_profile();
    let request = PredictionRequest::from_profile(&profile);

    assert_eq!(request.age, 30);
    assert_eq!(request.gender, "Female");
    // 5.5 ft * 30.48 = 167.64, rounded to whole centimeters
    assert_eq!(request.height, 168.0);
    assert_eq!(request.weight, 65.0);
    assert_eq!(request.bmi, 23.13);
    assert_eq!(request.blood_pressure_systolic, 120.0);
    assert_eq!(request.blood_pressure_diastolic, 80.0);
    assert_eq!(request.cholesterol_level, 190.0);
    assert_eq!(request.blood_sugar_level, 95.0);
    assert_eq!(request.chronic_disease, "Diabetes");
    assert_eq!(request.genetic_risk_factor, "Yes");
    assert_eq!(request.allergies, "Peanuts");
    assert_eq!(request.food_aversion, "Mushrooms");
    assert_eq!(request.daily_steps, 8000);
    assert_eq!(request.exercise_frequency, "Weekly");
    assert_eq!(request.sleep_hours, 7.5);
    assert_eq!(request.alcohol_consumption, "Occasionally");
    // Yes/no vocabulary: the synonym folds
    assert_eq!(request.smoking_habit, "No");
    assert_eq!(request.dietary_habits, "Keto");
    assert_eq!(request.preferred_cuisine, "Italian");
    assert_eq!(request.user_id, profile.user_id);
}

#[test]
fn test_defaults_applied_for_missing_fields() {
    let request = PredictionRequest::from_profile(&bare_profile());

    assert_eq!(request.bmi, 0.0);
    assert_eq!(request.blood_pressure_systolic, 0.0);
    assert_eq!(request.blood_pressure_diastolic, 0.0);
    assert_eq!(request.cholesterol_level, 0.0);
    assert_eq!(request.blood_sugar_level, 0.0);
    assert_eq!(request.chronic_disease, "No Disease");
    assert_eq!(request.genetic_risk_factor, "No");
    assert_eq!(request.allergies, "No");
    assert_eq!(request.food_aversion, "No");
    assert_eq!(request.daily_steps, 0);
    assert_eq!(request.exercise_frequency, "Never");
    assert_eq!(request.sleep_hours, 6.0);
    assert_eq!(request.alcohol_consumption, "No");
    assert_eq!(request.smoking_habit, "No");
    assert_eq!(request.dietary_habits, "Balanced");
    assert_eq!(request.preferred_cuisine, "Indian");
}

#[test]
fn test_exercise_never_survives_normalization() {
    let mut profile = bare_profile();
    profile.exercise_frequency = Some("Never".into());

    let request = PredictionRequest::from_profile(&profile);
    assert_eq!(request.exercise_frequency, "Never");
}

#[test]
fn test_builder_is_deterministic() {
    let profile = full_profile();

    let first = serde_json::to_string(&PredictionRequest::from_profile(&profile)).unwrap();
    let second = serde_json::to_string(&PredictionRequest::from_profile(&profile)).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        PredictionRequest::from_profile(&profile),
        PredictionRequest::from_profile(&profile)
    );
}

#[test]
fn test_serialized_payload_uses_contract_keys() {
    let profile = full_profile();
    let value = serde_json::to_value(PredictionRequest::from_profile(&profile)).unwrap();
    let object = value.as_object().unwrap();

    assert!(object.contains_key("userId"));
    assert!(!object.contains_key("user_id"));
    assert!(object.contains_key("blood_pressure_systolic"));
    assert!(object.contains_key("preferred_cuisine"));
    assert_eq!(object.len(), 21);
}
