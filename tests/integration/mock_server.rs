//! Mock HTTP server setup for integration tests

use crop_yield_client::{
    ClientConfig, FormState, InMemoryOutcomeSink, PredictionClient, PredictionRequest,
};
use mockito::{Matcher, Mock, Server, ServerGuard};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

pub const PREDICT_PATH: &str = "/api/v1/predict-yield";
pub const MODEL_INFO_PATH: &str = "/api/v1/model-info";

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: Arc<Mutex<ServerGuard>>,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self {
            server: Arc::new(Mutex::new(server)),
            base_url,
        }
    }

    /// Client pointed at the mock server, recording outcomes into `sink`.
    pub fn client(&self, sink: Arc<InMemoryOutcomeSink>) -> PredictionClient {
        client_for(&self.base_url, Duration::from_secs(5), sink)
    }

    /// Prediction endpoint answering with `status` and `body`.
    pub async fn mock_predict(&self, status: usize, body: &str) -> Mock {
        self.mock_predict_times(status, body, 1).await
    }

    /// Same as [`mock_predict`](Self::mock_predict), expecting `hits` calls.
    pub async fn mock_predict_times(&self, status: usize, body: &str, hits: usize) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("POST", PREDICT_PATH)
            .match_header("content-type", "application/json")
            .expect(hits)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// Prediction endpoint that only answers the exact sample payload.
    pub async fn mock_predict_expecting_sample(&self, body: &str) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("POST", PREDICT_PATH)
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::json!({
                "Region": "North",
                "Soil_Type": "Loam",
                "Crop": "Wheat",
                "Rainfall_mm": 500.0,
                "Temperature_Celsius": 25.0,
                "Fertilizer_Used": "TRUE",
                "Irrigation_Used": "FALSE",
                "Weather_Condition": "Sunny",
                "Days_to_Harvest": 120
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    pub async fn mock_model_info(&self, status: usize, body: &str) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("GET", MODEL_INFO_PATH)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }
}

pub fn client_for(base_url: &str, timeout: Duration, sink: Arc<InMemoryOutcomeSink>) -> PredictionClient {
    PredictionClient::builder()
        .config(ClientConfig::default().with_base_url(base_url))
        .timeout(timeout)
        .outcome_sink(sink)
        .build()
        .expect("Failed to build client")
}

/// Accepts connections and never answers, so every request hangs until the
/// client gives up.
pub async fn stalling_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}", addr)
}

/// Address nothing is listening on.
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}

pub fn sample_request() -> PredictionRequest {
    FormState::new()
        .with_region("North")
        .with_soil_type("Loam")
        .with_crop("Wheat")
        .with_rainfall_mm("500")
        .with_temperature_celsius("25")
        .with_weather_condition("Sunny")
        .with_days_to_harvest("120")
        .to_request()
        .expect("sample form should validate")
}

/// Wait until the client reports an in-flight submission.
pub async fn wait_until_submitting(client: &PredictionClient) {
    let mut rx = client.subscribe_submitting();
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|submitting| *submitting))
        .await
        .expect("submission never started")
        .expect("watch channel closed");
}
