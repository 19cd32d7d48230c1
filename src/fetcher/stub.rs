// Canned data source for tests
use crate::fetcher::traits::DataSource;
use crate::model::FetchError;
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Default)]
pub struct StubSource {
    responses: HashMap<String, Value>,
    delays: HashMap<String, Duration>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, body: Value) -> Self {
        self.responses.insert(url.to_string(), body);
        self
    }

    pub fn with_delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }
}

#[async_trait::async_trait]
impl DataSource for StubSource {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }
        self.responses
            .get(url)
            .cloned()
            .ok_or(FetchError::Status(StatusCode::NOT_FOUND))
    }
}
