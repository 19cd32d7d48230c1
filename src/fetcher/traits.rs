use crate::model::FetchError;
use serde_json::Value;

/// Something that can return the JSON document behind a URL.
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError>;
}

/// A source that could not be constructed; every fetch fails and falls back.
#[async_trait::async_trait]
impl<S: DataSource> DataSource for Option<S> {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        match self {
            Some(source) => source.fetch_json(url).await,
            None => Err(FetchError::ClientUnavailable),
        }
    }
}
