use crate::config::ClientConfig;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Proxy;
use std::env;
use std::time::Duration;

use super::TransportError;

/// Status and body of a completed exchange. Interpreting them is the caller's job.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(
                env::var("YIELD_HTTP_POOL_MAX_IDLE_PER_HOST")
                    .ok()
                    .and_then(|s| s.parse::<usize>().ok())
                    .unwrap_or(4),
            )
            .pool_idle_timeout(Some(Duration::from_secs(90)));

        if let Ok(proxy_url) = env::var("YIELD_PROXY_URL") {
            if let Ok(proxy) = Proxy::all(&proxy_url) {
                builder = builder.proxy(proxy);
            }
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    /// POST a JSON body and read the full response.
    ///
    /// The deadline covers sending the request and reading the body.
    pub async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
        request_id: Option<&str>,
    ) -> Result<RawResponse, TransportError> {
        let mut req = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(body);
        if let Some(id) = request_id {
            req = req.header("x-request-id", id);
        }
        self.exchange(req).await
    }

    pub async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        self.exchange(self.client.get(url)).await
    }

    async fn exchange(&self, req: reqwest::RequestBuilder) -> Result<RawResponse, TransportError> {
        let fut = async {
            let resp = req.send().await?;
            let status = resp.status().as_u16();
            let body = resp.text().await?;
            Ok::<_, reqwest::Error>(RawResponse { status, body })
        };

        match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(raw)) => Ok(raw),
            Ok(Err(e)) if e.is_timeout() => Err(TransportError::Timeout(self.timeout)),
            Ok(Err(e)) => Err(TransportError::Http(e)),
            Err(_) => Err(TransportError::Timeout(self.timeout)),
        }
    }
}
