//! Response contract against a mock prediction service

use crate::mock_server::{refused_url, client_for, sample_request, MockServerFixture};
use crop_yield_client::{
    Field, FormState, InMemoryOutcomeSink, Notification, PredictionOutcome, PredictionScreen,
    SubmissionState, SubmitStatus,
};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_success_from_validated_form() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_predict_expecting_sample(r#"{"predicted_yield_tons_per_hectare": 4.567}"#)
        .await;
    let sink = Arc::new(InMemoryOutcomeSink::new());
    let client = fixture.client(sink.clone());

    let request = FormState::new()
        .with_region("North")
        .with_soil_type("Loam")
        .with_crop("Wheat")
        .with_rainfall_mm("500")
        .with_temperature_celsius("25")
        .with_weather_condition("Sunny")
        .with_days_to_harvest("120")
        .to_request()
        .expect("form should validate");

    let outcome = client
        .submit(request)
        .await
        .into_outcome()
        .expect("submission should complete");

    mock.assert_async().await;
    let estimate = match outcome {
        PredictionOutcome::Success(estimate) => estimate,
        other => panic!("expected success, got {:?}", other),
    };
    assert_eq!(estimate.rounded(), Some(4.57));
    assert_eq!(estimate.display_text(), "4.57 tons/ha");
    assert_eq!(client.state(), SubmissionState::Succeeded);
    assert!(!client.is_submitting());
    assert_eq!(
        sink.events(),
        vec![Notification::Success {
            yield_text: "4.57 tons/ha".into()
        }]
    );
}

#[tokio::test]
async fn test_missing_yield_field_presents_sentinel() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_predict(200, r#"{"confidence_level":"High"}"#)
        .await;
    let sink = Arc::new(InMemoryOutcomeSink::new());
    let client = fixture.client(sink.clone());

    let status = client.submit(sample_request()).await;
    assert!(matches!(
        status.outcome(),
        Some(PredictionOutcome::Success(e)) if e.tons_per_hectare.is_none()
    ));
    assert_eq!(client.state(), SubmissionState::Succeeded);
    assert_eq!(
        sink.events(),
        vec![Notification::Success {
            yield_text: "N/A".into()
        }]
    );
}

#[tokio::test]
async fn test_api_error_carries_status_and_message() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_predict(422, r#"{"error_message":"Invalid crop"}"#)
        .await;
    let sink = Arc::new(InMemoryOutcomeSink::new());
    let client = fixture.client(sink.clone());

    let outcome = client.submit(sample_request()).await.into_outcome().unwrap();
    assert_eq!(outcome, PredictionOutcome::api_error(422, "Invalid crop"));
    assert_eq!(client.state(), SubmissionState::Failed);
    assert!(!client.is_submitting());
    assert_eq!(
        sink.events(),
        vec![Notification::ApiError {
            status_code: 422,
            message: "Invalid crop".into()
        }]
    );
}

#[tokio::test]
async fn test_non_json_error_body_uses_unknown_error() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_predict(502, "Bad Gateway").await;
    let sink = Arc::new(InMemoryOutcomeSink::new());
    let client = fixture.client(sink.clone());

    let outcome = client.submit(sample_request()).await.into_outcome().unwrap();
    assert_eq!(outcome, PredictionOutcome::api_error(502, "Unknown error"));
}

#[tokio::test]
async fn test_non_json_success_body_is_transport_error() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_predict(200, "not json at all").await;
    let sink = Arc::new(InMemoryOutcomeSink::new());
    let client = fixture.client(sink.clone());

    let outcome = client.submit(sample_request()).await.into_outcome().unwrap();
    assert_eq!(outcome, PredictionOutcome::transport_error("Unknown error"));
    assert_eq!(client.state(), SubmissionState::Failed);
    assert_eq!(
        sink.events(),
        vec![Notification::TransportError {
            message: "Unknown error".into()
        }]
    );
}

#[tokio::test]
async fn test_refused_connection_is_transport_error() {
    let sink = Arc::new(InMemoryOutcomeSink::new());
    let client = client_for(&refused_url(), Duration::from_secs(5), sink.clone());

    let outcome = client.submit(sample_request()).await.into_outcome().unwrap();
    let message = match outcome {
        PredictionOutcome::TransportError { message } => message,
        other => panic!("expected transport error, got {:?}", other),
    };
    assert!(!message.is_empty());
    assert_eq!(client.state(), SubmissionState::Failed);
    assert!(!client.is_submitting());
    assert_eq!(sink.len(), 1);
}

#[tokio::test]
async fn test_sequential_submits_are_independent() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_predict_times(200, r#"{"predicted_yield_tons_per_hectare": 3.2}"#, 2)
        .await;
    let sink = Arc::new(InMemoryOutcomeSink::new());
    let client = fixture.client(sink.clone());

    let first = client.submit(sample_request()).await;
    let second = client.submit(sample_request()).await;

    mock.assert_async().await;
    assert!(matches!(first, SubmitStatus::Completed(_)));
    assert_eq!(first, second);
    assert_eq!(sink.len(), 2);
}

#[tokio::test]
async fn test_retry_after_failure_starts_from_idle() {
    let fixture = MockServerFixture::new().await;
    let failing = fixture
        .mock_predict(500, r#"{"error_message":"Prediction processing failed"}"#)
        .await;
    let sink = Arc::new(InMemoryOutcomeSink::new());
    let client = fixture.client(sink.clone());

    let first = client.submit(sample_request()).await.into_outcome().unwrap();
    assert_eq!(first.error_message(), Some("Prediction processing failed"));
    assert_eq!(client.state(), SubmissionState::Failed);
    failing.remove_async().await;

    let _ok = fixture
        .mock_predict(200, r#"{"predicted_yield_tons_per_hectare": 5.0}"#)
        .await;
    let second = client.submit(sample_request()).await.into_outcome().unwrap();
    assert!(second.is_success());
    assert_eq!(client.state(), SubmissionState::Succeeded);
}

#[tokio::test]
async fn test_model_info_roundtrip() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_model_info(
            200,
            r#"{
                "model_status": "Active and Ready",
                "model_name": "RandomForest",
                "model_version": "2.0.1",
                "supported_features": {
                    "regions": ["East", "North"],
                    "soil_types": ["Loam"],
                    "crops": ["Wheat"],
                    "weather_conditions": ["Sunny"]
                }
            }"#,
        )
        .await;
    let client = fixture.client(Arc::new(InMemoryOutcomeSink::new()));

    let info = client.model_info().await.expect("model info");
    assert_eq!(info.model_name.as_deref(), Some("RandomForest"));
    assert_eq!(info.supported_features.regions, vec!["East", "North"]);
    assert_eq!(client.state(), SubmissionState::Idle);
}

#[tokio::test]
async fn test_model_info_error_maps_to_remote() {
    let fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_model_info(500, r#"{"error_message":"Unable to retrieve model information"}"#)
        .await;
    let client = fixture.client(Arc::new(InMemoryOutcomeSink::new()));

    match client.model_info().await {
        Err(crop_yield_client::Error::Remote { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Unable to retrieve model information");
        }
        other => panic!("expected remote error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_drafts_never_reach_the_service() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_predict_times(200, "{}", 0).await;
    let sink = Arc::new(InMemoryOutcomeSink::new());
    let mut screen = PredictionScreen::new(Arc::new(fixture.client(sink.clone())));
    for (field, value) in [
        (Field::Region, ""),
        (Field::SoilType, "  "),
        (Field::Crop, "Wheat"),
        (Field::RainfallMm, "NaN"),
        (Field::TemperatureCelsius, "25"),
        (Field::WeatherCondition, "Sunny"),
        (Field::DaysToHarvest, "120"),
    ] {
        screen.set_text(field, value);
    }

    let validation = match screen.submit().await {
        SubmitStatus::Invalid(validation) => validation,
        other => panic!("expected invalid, got {:?}", other),
    };
    assert_eq!(validation.len(), 3);
    assert!(validation.error_for(Field::RainfallMm).is_some());
    mock.assert_async().await;
    assert!(sink.is_empty());
    assert_eq!(screen.client().state(), SubmissionState::Idle);
}
