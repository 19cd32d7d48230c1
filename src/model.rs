// Core structs: Listing, MarketStat, ExchangeRates, EnrichedListing
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Listing identifier as delivered by the source: either numeric or textual.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListingId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingId::Number(n) => write!(f, "{}", n),
            ListingId::Text(s) => f.write_str(s),
        }
    }
}

/// Typed view of the fields the pipeline computes with.
#[derive(Deserialize)]
struct ListingFields {
    id: ListingId,
    brand: String,
    model: String,
    year: i32,
    price: f64,
    mileage: f64,
    #[serde(default)]
    color: Option<String>,
}

/// One vehicle for sale. `source` is the record exactly as delivered and is
/// what gets persisted; the typed fields are a read-only view over it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Listing {
    pub id: ListingId,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub mileage: f64,
    pub color: Option<String>,
    pub source: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for Listing {
    type Error = serde_json::Error;

    fn try_from(source: Map<String, Value>) -> Result<Self, Self::Error> {
        let fields: ListingFields = serde_json::from_value(Value::Object(source.clone()))?;
        Ok(Self {
            id: fields.id,
            brand: fields.brand,
            model: fields.model,
            year: fields.year,
            price: fields.price,
            mileage: fields.mileage,
            color: fields.color,
            source,
        })
    }
}

impl Listing {
    pub fn model_key(&self) -> ModelKey {
        ModelKey::new(&self.brand, &self.model)
    }

    pub fn cohort_key(&self) -> CohortKey {
        CohortKey {
            brand: self.brand.clone(),
            model: self.model.clone(),
            year: self.year,
        }
    }

    /// Colour used for grouping; listings without one count as "unknown".
    pub fn color_or_unknown(&self) -> &str {
        self.color.as_deref().unwrap_or("unknown")
    }
}

/// Average price and mileage for one (brand, model, year) cohort.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarketStat {
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub average_price: f64,
    pub average_mileage: f64,
}

impl MarketStat {
    pub fn cohort_key(&self) -> CohortKey {
        CohortKey {
            brand: self.brand.clone(),
            model: self.model.clone(),
            year: self.year,
        }
    }
}

/// Quote for a single currency. `buy` may arrive as a number or a numeric string.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CurrencyQuote {
    #[serde(default)]
    pub buy: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CurrencyQuote {
    pub fn buy_rate(&self) -> Option<f64> {
        match self.buy.as_ref()? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().replace(',', "").parse().ok(),
            _ => None,
        }
    }
}

/// Exchange rates keyed by currency code. Entries are decoded lazily so that
/// unrelated keys of any shape do not invalidate the whole payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ExchangeRates {
    pub entries: Map<String, Value>,
}

impl ExchangeRates {
    pub fn quote(&self, code: &str) -> Option<CurrencyQuote> {
        let entry = self.entries.get(code)?;
        serde_json::from_value(entry.clone()).ok()
    }

    pub fn usd_buy(&self) -> Option<f64> {
        self.quote("USD")?.buy_rate()
    }
}

const DERIVED_FIELDS: [&str; 3] = ["price_diff_from_average", "mileage_diff_from_average", "price_usd"];

/// A listing plus the fields derived from market statistics and the exchange rate.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedListing {
    pub listing: Listing,
    pub price_diff_from_average: f64,
    pub mileage_diff_from_average: f64,
    pub price_usd: f64,
}

/// Serializes as the source record with the derived fields appended. A source
/// key that shares a derived field's name is replaced, never duplicated.
impl Serialize for EnrichedListing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let passthrough = self
            .listing
            .source
            .iter()
            .filter(|(key, _)| !DERIVED_FIELDS.contains(&key.as_str()));

        let mut map = serializer.serialize_map(None)?;
        for (key, value) in passthrough {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry("price_diff_from_average", &self.price_diff_from_average)?;
        map.serialize_entry("mileage_diff_from_average", &self.mileage_diff_from_average)?;
        map.serialize_entry("price_usd", &self.price_usd)?;
        map.end()
    }
}

/// Grouping key for (brand, model). Kept as a struct so "A B"/"C" and "A"/"B C" never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelKey {
    pub brand: String,
    pub model: String,
}

impl ModelKey {
    pub fn new(brand: &str, model: &str) -> Self {
        Self {
            brand: brand.to_string(),
            model: model.to_string(),
        }
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.brand, self.model)
    }
}

/// Join key between listings and market statistics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CohortKey {
    pub brand: String,
    pub model: String,
    pub year: i32,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("HTTP client unavailable")]
    ClientUnavailable,
    #[error("invalid payload: {0}")]
    Decode(#[from] ParserError),
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("expected a JSON array of {0}")]
    NotAnArray(&'static str),
    #[error("expected a JSON object: {0}")]
    NotAnObject(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
