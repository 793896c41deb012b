use crate::client::core::PredictionClient;
use crate::client::state::StateMachine;
use crate::config::ClientConfig;
use crate::presentation::OutcomeSink;
use crate::transport::HttpTransport;
use crate::Result;
use std::sync::Arc;
use std::time::Duration;

/// Builder for [`PredictionClient`].
///
/// Keep this surface area small and predictable.
pub struct PredictionClientBuilder {
    config: Option<ClientConfig>,
    base_url_override: Option<String>,
    timeout: Option<Duration>,
    sink: Arc<dyn OutcomeSink>,
}

impl PredictionClientBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            base_url_override: None,
            timeout: None,
            sink: crate::presentation::noop_sink(),
        }
    }

    /// Use an explicit configuration instead of [`ClientConfig::from_env`].
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Override the base URL (primarily for testing with mock servers).
    pub fn base_url_override(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    /// Override the whole-call timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Where terminal outcomes are delivered. Default is a no-op sink.
    pub fn outcome_sink(mut self, sink: Arc<dyn OutcomeSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn build(self) -> Result<PredictionClient> {
        let mut config = self.config.unwrap_or_else(ClientConfig::from_env);
        if let Some(url) = self.base_url_override {
            config.base_url = url;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        config.validate()?;

        let transport = HttpTransport::new(&config)?;

        Ok(PredictionClient {
            config,
            transport,
            sink: self.sink,
            machine: StateMachine::new(),
        })
    }
}

impl Default for PredictionClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
