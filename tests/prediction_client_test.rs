// ABOUTME: Tests for the prediction service HTTP client
// ABOUTME: Validates relay of upstream bodies, error translation, and timeout behavior
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Utc;
use http::StatusCode;
use nutriplan_server::errors::ErrorCode;
use nutriplan_server::models::HealthProfile;
use nutriplan_server::prediction::{PredictionClient, PredictionRequest, PredictionServiceConfig};
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;

fn sample_payload() -> PredictionRequest {
    let now = Utc::now();
    let profile = HealthProfile {
        user_id: Uuid::new_v4(),
        age: 30,
        gender: "Female".into(),
        height_ft: 5.5,
        weight_kg: 65.0,
        bmi: Some(23.13),
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
        smoking_habit: Some("Non-smoker".into()),
        dietary_habits: None,
        preferred_cuisine: None,
        created_at: now,
        updated_at: now,
    };
    PredictionRequest::from_profile(&profile)
}

fn client_for(base_url: &str, timeout: Duration) -> PredictionClient {
    PredictionClient::new(PredictionServiceConfig {
        base_url: base_url.to_owned(),
        timeout,
    })
    .unwrap()
}

#[tokio::test]
async fn test_success_relays_upstream_body() {
    let base_url = common::spawn_prediction_stub(
        StatusCode::OK,
        json!({
            "recommended_calories": 2100,
            "meal_plan": ["oats", "dal", "salad"]
        }),
    )
    .await;

    let client = client_for(&base_url, Duration::from_secs(2));
    let prediction = client.recommend(&sample_payload()).await.unwrap();

    assert_eq!(prediction["recommended_calories"], 2100);
    assert_eq!(prediction["meal_plan"][1], "dal");
}

#[tokio::test]
async fn test_payload_reaches_upstream_normalized() {
    let base_url = common::spawn_echo_prediction_stub().await;

    let client = client_for(&base_url, Duration::from_secs(2));
    let payload = sample_payload();
    let response = client.recommend(&payload).await.unwrap();

    let echoed = &response["echo"];
    assert_eq!(echoed["height"], 168.0);
    assert_eq!(echoed["smoking_habit"], "No");
    assert_eq!(echoed["chronic_disease"], "No Disease");
    assert_eq!(echoed["sleep_hours"], 6.0);
    assert_eq!(echoed["userId"], payload.user_id.to_string());
}

#[tokio::test]
async fn test_non_2xx_carries_upstream_error_body() {
    let base_url = common::spawn_prediction_stub(
        StatusCode::SERVICE_UNAVAILABLE,
        json!({"error": "model warming up"}),
    )
    .await;

    let client = client_for(&base_url, Duration::from_secs(2));
    let err = client.recommend(&sample_payload()).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert_eq!(err.http_status(), 500);
    assert!(err.message.contains("503"));
    assert!(err.message.contains("model warming up"));
}

#[tokio::test]
async fn test_timeout_is_translated() {
    let base_url = common::spawn_slow_prediction_stub(Duration::from_secs(5)).await;

    let client = client_for(&base_url, Duration::from_millis(200));
    let err = client.recommend(&sample_payload()).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert!(err.message.contains("timed out"));
}

#[tokio::test]
async fn test_unreachable_service_is_translated() {
    // Bind then drop a listener so the port is known to be closed
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{addr}"), Duration::from_secs(1));
    let err = client.recommend(&sample_payload()).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceError);
}
