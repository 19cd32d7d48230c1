use crate::model::{CohortKey, EnrichedListing, ExchangeRates, Listing, MarketStat};
use crate::utils::round2;
use std::collections::HashMap;
use tracing::warn;

/// Returns the USD buy rate, or 1 (with a warning) when it is missing, zero or not numeric.
pub fn resolve_usd_rate(rates: Option<&ExchangeRates>) -> f64 {
    match rates.and_then(ExchangeRates::usd_buy) {
        Some(rate) if rate.is_finite() && rate != 0.0 => rate,
        _ => {
            warn!("Currency data missing or invalid, USD conversion will be skipped.");
            1.0
        }
    }
}

/// Joins listings with market statistics and adds the derived comparison fields.
/// Output has one entry per input listing, in input order.
pub fn enrich(
    listings: &[Listing],
    market_stats: &[MarketStat],
    rates: Option<&ExchangeRates>,
) -> Vec<EnrichedListing> {
    let usd_rate = resolve_usd_rate(rates);

    // First occurrence wins when the same cohort appears more than once.
    let mut cohorts: HashMap<CohortKey, &MarketStat> = HashMap::with_capacity(market_stats.len());
    for stat in market_stats {
        cohorts.entry(stat.cohort_key()).or_insert(stat);
    }

    listings
        .iter()
        .map(|listing| enrich_listing(listing, cohorts.get(&listing.cohort_key()).copied(), usd_rate))
        .collect()
}

fn enrich_listing(listing: &Listing, stat: Option<&MarketStat>, usd_rate: f64) -> EnrichedListing {
    let (price_diff, mileage_diff) = match stat {
        Some(stat) => (
            listing.price - stat.average_price,
            listing.mileage - stat.average_mileage,
        ),
        None => (0.0, 0.0),
    };
    let price_usd = if usd_rate != 0.0 {
        round2(listing.price / usd_rate)
    } else {
        0.0
    };

    EnrichedListing {
        listing: listing.clone(),
        price_diff_from_average: price_diff,
        mileage_diff_from_average: mileage_diff,
        price_usd,
    }
}
