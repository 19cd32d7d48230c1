use crate::fetcher::traits::DataSource;
use crate::model::FetchError;

use reqwest::Client;
use serde_json::Value;

pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent("CarMarketReport/0.1")
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl DataSource for HttpSource {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(response.json::<Value>().await?)
    }
}
