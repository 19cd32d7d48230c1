use crate::config::Endpoints;
use crate::fetcher::traits::DataSource;
use crate::model::{ExchangeRates, FetchError, Listing, MarketStat};
use crate::parser::{JsonRecordParser, Parser};
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{error, info};

/// Everything the three fetches produced, after fallbacks were applied.
#[derive(Debug, Default)]
pub struct FetchedData {
    pub listings: Vec<Listing>,
    pub market_stats: Vec<MarketStat>,
    pub exchange_rates: Option<ExchangeRates>,
}

/// Retrieves the three source datasets. Each fetch swallows its own failure
/// and returns a fallback value instead.
pub struct MarketDataFetcher<S> {
    source: S,
    parser: JsonRecordParser,
    endpoints: Endpoints,
    timeout: Duration,
}

impl<S: DataSource> MarketDataFetcher<S> {
    pub fn new(source: S, endpoints: Endpoints, timeout: Duration) -> Self {
        Self {
            source,
            parser: JsonRecordParser::new(),
            endpoints,
            timeout,
        }
    }

    async fn get(&self, url: &str) -> Result<Value, FetchError> {
        match timeout(self.timeout, self.source.fetch_json(url)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.timeout)),
        }
    }

    pub async fn fetch_listings(&self) -> Vec<Listing> {
        let result = self
            .get(&self.endpoints.listings_url)
            .await
            .and_then(|raw| Ok(self.parser.parse_listings(raw)?));

        match result {
            Ok(listings) => {
                info!("Fetched {} listings", listings.len());
                listings
            }
            Err(e) => {
                error!("Error fetching cars data: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn fetch_market_stats(&self) -> Vec<MarketStat> {
        let result = self
            .get(&self.endpoints.market_prices_url)
            .await
            .and_then(|raw| Ok(self.parser.parse_market_stats(raw)?));

        match result {
            Ok(stats) => {
                info!("Fetched {} market price entries", stats.len());
                stats
            }
            Err(e) => {
                error!("Error fetching market price data: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn fetch_exchange_rates(&self) -> Option<ExchangeRates> {
        let result = self
            .get(&self.endpoints.currency_url)
            .await
            .and_then(|raw| Ok(self.parser.parse_exchange_rates(raw)?));

        match result {
            Ok(rates) => Some(rates),
            Err(e) => {
                error!("Error fetching currency data: {}", e);
                None
            }
        }
    }

    /// Starts all three fetches together and waits until every one has settled.
    pub async fn fetch_all(&self) -> FetchedData {
        let (listings, market_stats, exchange_rates) = futures::join!(
            self.fetch_listings(),
            self.fetch_market_stats(),
            self.fetch_exchange_rates(),
        );

        FetchedData {
            listings,
            market_stats,
            exchange_rates,
        }
    }
}
