pub mod traits;
pub mod http;
pub mod market_data;
#[cfg(test)]
pub mod stub;

pub use http::HttpSource;
pub use market_data::MarketDataFetcher;
pub use traits::DataSource;
