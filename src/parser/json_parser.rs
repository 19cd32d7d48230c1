// Fetch-boundary validation of raw JSON payloads
use crate::model::{ExchangeRates, Listing, MarketStat, ParserError};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

pub trait Parser {
    fn parse_listings(&self, raw: Value) -> Result<Vec<Listing>, ParserError>;
    fn parse_market_stats(&self, raw: Value) -> Result<Vec<MarketStat>, ParserError>;
    fn parse_exchange_rates(&self, raw: Value) -> Result<ExchangeRates, ParserError>;
}

pub struct JsonRecordParser;

impl JsonRecordParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for JsonRecordParser {
    fn parse_listings(&self, raw: Value) -> Result<Vec<Listing>, ParserError> {
        parse_records(raw, "listings")
    }

    fn parse_market_stats(&self, raw: Value) -> Result<Vec<MarketStat>, ParserError> {
        parse_records(raw, "market stats")
    }

    fn parse_exchange_rates(&self, raw: Value) -> Result<ExchangeRates, ParserError> {
        Ok(serde_json::from_value(raw)?)
    }
}

/// Decodes each array element on its own; elements missing required fields are
/// dropped so one bad record does not discard the batch.
fn parse_records<T: DeserializeOwned>(raw: Value, what: &'static str) -> Result<Vec<T>, ParserError> {
    let Value::Array(items) = raw else {
        return Err(ParserError::NotAnArray(what));
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<T>(item) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping {} record #{}: {}", what, index, e),
        }
    }
    Ok(records)
}
