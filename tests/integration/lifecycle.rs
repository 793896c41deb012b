//! Timeout, single-flight and cancellation behaviour

use crate::mock_server::{client_for, sample_request, stalling_server, wait_until_submitting};
use crop_yield_client::{
    Field, InMemoryOutcomeSink, PredictionOutcome, PredictionScreen, SubmissionState,
    SubmitStatus,
};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_timeout_is_transport_error_and_clears_indicator() {
    let base_url = stalling_server().await;
    let sink = Arc::new(InMemoryOutcomeSink::new());
    let client = client_for(&base_url, Duration::from_millis(300), sink.clone());

    let outcome = client.submit(sample_request()).await.into_outcome().unwrap();
    let message = match outcome {
        PredictionOutcome::TransportError { message } => message,
        other => panic!("expected transport error, got {:?}", other),
    };
    assert!(message.contains("timed out"), "unexpected message: {}", message);
    assert!(!client.is_submitting());
    assert_eq!(client.state(), SubmissionState::Failed);
    assert_eq!(sink.len(), 1);
}

#[tokio::test]
async fn test_concurrent_submit_is_a_no_op() {
    let base_url = stalling_server().await;
    let sink = Arc::new(InMemoryOutcomeSink::new());
    let client = Arc::new(client_for(&base_url, Duration::from_secs(1), sink.clone()));

    let first = {
        let client = Arc::clone(&client);
        tokio::spawn(async move { client.submit(sample_request()).await })
    };
    wait_until_submitting(&client).await;

    assert_eq!(client.submit(sample_request()).await, SubmitStatus::Busy);
    assert!(client.is_submitting());

    let first = first.await.expect("task panicked");
    assert!(matches!(
        first,
        SubmitStatus::Completed(PredictionOutcome::TransportError { .. })
    ));
    assert!(!client.is_submitting());
    // only the first submission reached the sink
    assert_eq!(sink.len(), 1);
}

#[tokio::test]
async fn test_cancel_discards_in_flight_result() {
    let base_url = stalling_server().await;
    let sink = Arc::new(InMemoryOutcomeSink::new());
    let client = Arc::new(client_for(&base_url, Duration::from_secs(30), sink.clone()));
    let cancel = client.cancel_handle();

    let task = {
        let client = Arc::clone(&client);
        tokio::spawn(async move { client.submit(sample_request()).await })
    };
    wait_until_submitting(&client).await;

    assert!(cancel.cancel());
    let status = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("cancel did not stop the submission")
        .expect("task panicked");

    assert_eq!(status, SubmitStatus::Cancelled);
    assert!(!client.is_submitting());
    assert_eq!(client.state(), SubmissionState::Idle);
    assert!(sink.is_empty());
    assert!(!cancel.cancel());
}

fn filled_screen(client: Arc<crop_yield_client::PredictionClient>) -> PredictionScreen {
    let mut screen = PredictionScreen::new(client);
    for (field, value) in [
        (Field::Region, "North"),
        (Field::SoilType, "Loam"),
        (Field::Crop, "Wheat"),
        (Field::RainfallMm, "500"),
        (Field::TemperatureCelsius, "25"),
        (Field::WeatherCondition, "Sunny"),
        (Field::DaysToHarvest, "120"),
    ] {
        screen.set_text(field, value);
    }
    screen
}

#[tokio::test]
async fn test_dropping_screen_cancels_its_own_submission() {
    let base_url = stalling_server().await;
    let sink = Arc::new(InMemoryOutcomeSink::new());
    let client = Arc::new(client_for(&base_url, Duration::from_secs(30), sink.clone()));
    let mut screen = filled_screen(Arc::clone(&client));

    let task = tokio::spawn(screen.submit());
    wait_until_submitting(&client).await;
    assert!(!screen.can_submit());

    drop(screen);
    let status = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("screen drop did not cancel")
        .expect("task panicked");
    assert_eq!(status, SubmitStatus::Cancelled);
    assert!(!client.is_submitting());
    assert_eq!(client.state(), SubmissionState::Idle);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_dropping_screen_leaves_other_submissions_alone() {
    let base_url = stalling_server().await;
    let sink = Arc::new(InMemoryOutcomeSink::new());
    let client = Arc::new(client_for(&base_url, Duration::from_millis(500), sink.clone()));
    let screen = filled_screen(Arc::clone(&client));

    let task = {
        let client = Arc::clone(&client);
        tokio::spawn(async move { client.submit(sample_request()).await })
    };
    wait_until_submitting(&client).await;
    drop(screen);

    let status = task.await.expect("task panicked");
    assert!(matches!(
        status,
        SubmitStatus::Completed(PredictionOutcome::TransportError { .. })
    ));
    assert_eq!(sink.len(), 1);
}

#[tokio::test]
async fn test_dropped_future_clears_indicator() {
    let base_url = stalling_server().await;
    let sink = Arc::new(InMemoryOutcomeSink::new());
    let client = client_for(&base_url, Duration::from_secs(30), sink.clone());

    let result = tokio::time::timeout(Duration::from_millis(200), client.submit(sample_request())).await;
    assert!(result.is_err());
    assert!(!client.is_submitting());
    assert_eq!(client.state(), SubmissionState::Idle);
    assert!(sink.is_empty());
}
