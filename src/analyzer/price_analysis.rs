use crate::analyzer::fairness::closest_to_average;
use crate::analyzer::grouping::{count_by, group_by};
use crate::model::{EnrichedListing, ListingId, ModelKey};
use crate::utils::round2;

pub const TOP_PRICED_LIMIT: usize = 3;
pub const FAIR_LIMIT: usize = 5;

/// Most frequent (brand, model). `key` is `None` when there were no listings.
#[derive(Debug, Clone, PartialEq)]
pub struct MostCommonModel {
    pub key: Option<ModelKey>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelMaxPrice {
    pub key: ModelKey,
    pub max_price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorCount {
    pub color: String,
    pub count: usize,
}

/// A listing id together with the value that singled it out.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingValue {
    pub id: ListingId,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelExtremes {
    pub key: ModelKey,
    pub lowest_price: ListingValue,
    pub lowest_mileage: ListingValue,
}

/// A listing ranked by how close it sits to its cohort average.
#[derive(Debug, Clone, PartialEq)]
pub struct FairListing {
    pub id: ListingId,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub diff: f64,
}

/// Results of all seven queries over one enriched set.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketReport {
    pub most_common: MostCommonModel,
    pub top_priced: Vec<ModelMaxPrice>,
    /// `None` when there was no data to compare.
    pub usd_spread: Option<f64>,
    pub colors: Vec<ColorCount>,
    pub extremes: Vec<ModelExtremes>,
    pub fairest_price: Vec<FairListing>,
    pub fairest_mileage: Vec<FairListing>,
}

/// Read-only queries over an enriched listing set.
pub trait Analyzer {
    fn most_common_model(&self, listings: &[EnrichedListing]) -> MostCommonModel;
    fn top_priced_models(&self, listings: &[EnrichedListing], limit: usize) -> Vec<ModelMaxPrice>;
    fn usd_price_spread(&self, listings: &[EnrichedListing]) -> Option<f64>;
    fn count_by_color(&self, listings: &[EnrichedListing]) -> Vec<ColorCount>;
    fn model_extremes(&self, listings: &[EnrichedListing]) -> Vec<ModelExtremes>;
    fn fairest_priced(&self, listings: &[EnrichedListing], limit: usize) -> Vec<FairListing>;
    fn fairest_mileage(&self, listings: &[EnrichedListing], limit: usize) -> Vec<FairListing>;
}

pub struct AnalyzerImpl;

impl AnalyzerImpl {
    pub fn new() -> Self {
        Self
    }

    /// Runs every query in report order.
    pub fn analyze(&self, listings: &[EnrichedListing]) -> MarketReport {
        MarketReport {
            most_common: self.most_common_model(listings),
            top_priced: self.top_priced_models(listings, TOP_PRICED_LIMIT),
            usd_spread: self.usd_price_spread(listings),
            colors: self.count_by_color(listings),
            extremes: self.model_extremes(listings),
            fairest_price: self.fairest_priced(listings, FAIR_LIMIT),
            fairest_mileage: self.fairest_mileage(listings, FAIR_LIMIT),
        }
    }
}

fn model_key(listing: &EnrichedListing) -> ModelKey {
    listing.listing.model_key()
}

fn fair_listing(listing: &EnrichedListing, diff: f64) -> FairListing {
    FairListing {
        id: listing.listing.id.clone(),
        brand: listing.listing.brand.clone(),
        model: listing.listing.model.clone(),
        year: listing.listing.year,
        diff,
    }
}

impl Analyzer for AnalyzerImpl {
    fn most_common_model(&self, listings: &[EnrichedListing]) -> MostCommonModel {
        let mut best = MostCommonModel { key: None, count: 0 };
        for (key, count) in count_by(listings, model_key) {
            // Strictly greater: the earliest key to reach the maximum is kept.
            if count > best.count {
                best = MostCommonModel { key: Some(key), count };
            }
        }
        best
    }

    fn top_priced_models(&self, listings: &[EnrichedListing], limit: usize) -> Vec<ModelMaxPrice> {
        let mut groups: Vec<ModelMaxPrice> = group_by(listings, model_key)
            .into_iter()
            .map(|(key, members)| ModelMaxPrice {
                key,
                max_price: members
                    .iter()
                    .map(|l| l.listing.price)
                    .fold(f64::NEG_INFINITY, f64::max),
            })
            .collect();

        groups.sort_by(|a, b| b.max_price.total_cmp(&a.max_price));
        groups.truncate(limit);
        groups
    }

    fn usd_price_spread(&self, listings: &[EnrichedListing]) -> Option<f64> {
        if listings.is_empty() {
            return None;
        }
        let (min, max) = listings.iter().map(|l| l.price_usd).fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), p| (min.min(p), max.max(p)),
        );
        Some(round2(max - min))
    }

    fn count_by_color(&self, listings: &[EnrichedListing]) -> Vec<ColorCount> {
        count_by(listings, |l| l.listing.color_or_unknown().to_string())
            .into_iter()
            .map(|(color, count)| ColorCount { color, count })
            .collect()
    }

    fn model_extremes(&self, listings: &[EnrichedListing]) -> Vec<ModelExtremes> {
        group_by(listings, model_key)
            .into_iter()
            .filter_map(|(key, members)| {
                let cheapest = members
                    .iter()
                    .copied()
                    .reduce(|prev, curr| if curr.listing.price < prev.listing.price { curr } else { prev })?;
                let least_driven = members
                    .iter()
                    .copied()
                    .reduce(|prev, curr| if curr.listing.mileage < prev.listing.mileage { curr } else { prev })?;

                Some(ModelExtremes {
                    key,
                    lowest_price: ListingValue {
                        id: cheapest.listing.id.clone(),
                        value: cheapest.listing.price,
                    },
                    lowest_mileage: ListingValue {
                        id: least_driven.listing.id.clone(),
                        value: least_driven.listing.mileage,
                    },
                })
            })
            .collect()
    }

    fn fairest_priced(&self, listings: &[EnrichedListing], limit: usize) -> Vec<FairListing> {
        closest_to_average(listings, limit, |l| l.price_diff_from_average)
            .into_iter()
            .map(|l| fair_listing(l, l.price_diff_from_average))
            .collect()
    }

    fn fairest_mileage(&self, listings: &[EnrichedListing], limit: usize) -> Vec<FairListing> {
        closest_to_average(listings, limit, |l| l.mileage_diff_from_average)
            .into_iter()
            .map(|l| fair_listing(l, l.mileage_diff_from_average))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Car {
        id: i64,
        brand: &'static str,
        model: &'static str,
        price: f64,
        mileage: f64,
        color: &'static str,
    }

    fn car(id: i64, brand: &'static str, model: &'static str, price: f64, mileage: f64) -> Car {
        Car { id, brand, model, price, mileage, color: "white" }
    }

    fn enriched(car: Car, price_diff: f64, mileage_diff: f64, price_usd: f64) -> EnrichedListing {
        EnrichedListing {
            listing: serde_json::from_value(json!({
                "id": car.id, "brand": car.brand, "model": car.model, "year": 2020,
                "price": car.price, "mileage": car.mileage, "color": car.color
            }))
            .unwrap(),
            price_diff_from_average: price_diff,
            mileage_diff_from_average: mileage_diff,
            price_usd,
        }
    }

    fn plain(cars: Vec<Car>) -> Vec<EnrichedListing> {
        cars.into_iter().map(|c| enriched(c, 0.0, 0.0, 0.0)).collect()
    }

    fn ids(ranked: &[FairListing]) -> Vec<String> {
        ranked.iter().map(|f| f.id.to_string()).collect()
    }

    #[test]
    fn most_common_model_counts_brand_and_model() {
        let listings = plain(vec![
            car(1, "A", "X", 1.0, 1.0),
            car(2, "A", "X", 1.0, 1.0),
            car(3, "B", "Y", 1.0, 1.0),
        ]);
        let result = AnalyzerImpl::new().most_common_model(&listings);
        assert_eq!(result.key.map(|k| k.to_string()), Some("A X".to_string()));
        assert_eq!(result.count, 2);
    }

    #[test]
    fn most_common_model_ties_go_to_first_seen() {
        let listings = plain(vec![
            car(1, "B", "Y", 1.0, 1.0),
            car(2, "A", "X", 1.0, 1.0),
            car(3, "A", "X", 1.0, 1.0),
            car(4, "B", "Y", 1.0, 1.0),
        ]);
        let result = AnalyzerImpl::new().most_common_model(&listings);
        assert_eq!(result.key, Some(ModelKey::new("B", "Y")));
    }

    #[test]
    fn most_common_model_on_empty_input_is_sentinel() {
        let result = AnalyzerImpl::new().most_common_model(&[]);
        assert_eq!(result, MostCommonModel { key: None, count: 0 });
    }

    #[test]
    fn top_priced_uses_group_maximum_and_limit() {
        let listings = plain(vec![
            car(1, "A", "X", 100.0, 1.0),
            car(2, "A", "X", 500.0, 1.0),
            car(3, "B", "Y", 300.0, 1.0),
            car(4, "C", "Z", 400.0, 1.0),
            car(5, "D", "W", 50.0, 1.0),
        ]);
        let top = AnalyzerImpl::new().top_priced_models(&listings, TOP_PRICED_LIMIT);
        let prices: Vec<f64> = top.iter().map(|t| t.max_price).collect();
        assert_eq!(prices, vec![500.0, 400.0, 300.0]);
        assert_eq!(top[0].key, ModelKey::new("A", "X"));
    }

    #[test]
    fn top_priced_returns_fewer_when_fewer_groups() {
        let listings = plain(vec![car(1, "A", "X", 100.0, 1.0), car(2, "B", "Y", 200.0, 1.0)]);
        let top = AnalyzerImpl::new().top_priced_models(&listings, TOP_PRICED_LIMIT);
        assert_eq!(top.len(), 2);
        assert!(top[0].max_price > top[1].max_price);
    }

    #[test]
    fn top_priced_does_not_merge_colliding_names() {
        let listings = plain(vec![car(1, "A B", "C", 100.0, 1.0), car(2, "A", "B C", 200.0, 1.0)]);
        assert_eq!(AnalyzerImpl::new().top_priced_models(&listings, 3).len(), 2);
    }

    #[test]
    fn usd_spread_is_max_minus_min() {
        let listings = vec![
            enriched(car(1, "A", "X", 1.0, 1.0), 0.0, 0.0, 10.25),
            enriched(car(2, "A", "X", 1.0, 1.0), 0.0, 0.0, 3.1),
            enriched(car(3, "A", "X", 1.0, 1.0), 0.0, 0.0, 7.0),
        ];
        assert_eq!(AnalyzerImpl::new().usd_price_spread(&listings), Some(7.15));
    }

    #[test]
    fn usd_spread_on_empty_input_is_none() {
        assert_eq!(AnalyzerImpl::new().usd_price_spread(&[]), None);
    }

    #[test]
    fn counts_colors_in_first_seen_order() {
        let mut cars = vec![
            car(1, "A", "X", 1.0, 1.0),
            car(2, "A", "X", 1.0, 1.0),
            car(3, "A", "X", 1.0, 1.0),
        ];
        cars[0].color = "red";
        cars[1].color = "black";
        cars[2].color = "red";
        let colors = AnalyzerImpl::new().count_by_color(&plain(cars));
        assert_eq!(
            colors,
            vec![
                ColorCount { color: "red".into(), count: 2 },
                ColorCount { color: "black".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn listings_without_color_count_as_unknown() {
        let mut listings = plain(vec![car(1, "A", "X", 1.0, 1.0)]);
        listings.push(EnrichedListing {
            listing: serde_json::from_value(json!({
                "id": 2, "brand": "A", "model": "X", "year": 2020, "price": 1, "mileage": 1
            }))
            .unwrap(),
            price_diff_from_average: 0.0,
            mileage_diff_from_average: 0.0,
            price_usd: 0.0,
        });

        let colors = AnalyzerImpl::new().count_by_color(&listings);
        assert_eq!(colors[1], ColorCount { color: "unknown".into(), count: 1 });
        assert!(listings[1].listing.color.is_none());
    }

    #[test]
    fn extremes_are_independent_and_first_wins_ties() {
        let listings = plain(vec![
            car(1, "A", "X", 200.0, 10.0),
            car(2, "A", "X", 100.0, 90.0),
            car(3, "A", "X", 100.0, 10.0),
            car(4, "B", "Y", 50.0, 5.0),
        ]);
        let extremes = AnalyzerImpl::new().model_extremes(&listings);

        assert_eq!(extremes.len(), 2);
        assert_eq!(extremes[0].key, ModelKey::new("A", "X"));
        assert_eq!(extremes[0].lowest_price, ListingValue { id: ListingId::Number(2), value: 100.0 });
        assert_eq!(extremes[0].lowest_mileage, ListingValue { id: ListingId::Number(1), value: 10.0 });
        assert_eq!(extremes[1].lowest_price.id, ListingId::Number(4));
    }

    #[test]
    fn fairest_price_sorts_by_absolute_diff() {
        let listings = vec![
            enriched(car(1, "A", "X", 1.0, 1.0), -50.0, 0.0, 0.0),
            enriched(car(2, "A", "X", 1.0, 1.0), 10.0, 0.0, 0.0),
            enriched(car(3, "A", "X", 1.0, 1.0), -20.0, 0.0, 0.0),
        ];
        let ranked = AnalyzerImpl::new().fairest_priced(&listings, FAIR_LIMIT);
        assert_eq!(ids(&ranked), vec!["2", "3", "1"]);
        assert_eq!(ranked[1].diff, -20.0);
    }

    #[test]
    fn fairest_ranking_is_stable_and_truncated() {
        let listings: Vec<EnrichedListing> = (1..=7)
            .map(|id| {
                let diff = if id % 2 == 0 { 5.0 } else { -5.0 };
                enriched(car(id, "A", "X", 1.0, 1.0), 0.0, diff, 0.0)
            })
            .collect();
        let ranked = AnalyzerImpl::new().fairest_mileage(&listings, FAIR_LIMIT);
        assert_eq!(ids(&ranked), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn fairest_mileage_uses_mileage_diff() {
        let listings = vec![
            enriched(car(1, "A", "X", 1.0, 1.0), 0.0, 300.0, 0.0),
            enriched(car(2, "B", "Y", 1.0, 1.0), 999.0, -100.0, 0.0),
        ];
        let ranked = AnalyzerImpl::new().fairest_mileage(&listings, FAIR_LIMIT);
        assert_eq!(ids(&ranked), vec!["2", "1"]);
        assert_eq!(ranked[0].diff, -100.0);
        assert_eq!(ranked[0].brand, "B");
    }

    #[test]
    fn every_query_tolerates_empty_input() {
        let report = AnalyzerImpl::new().analyze(&[]);
        assert_eq!(report.most_common.count, 0);
        assert!(report.top_priced.is_empty());
        assert!(report.usd_spread.is_none());
        assert!(report.colors.is_empty());
        assert!(report.extremes.is_empty());
        assert!(report.fairest_price.is_empty());
        assert!(report.fairest_mileage.is_empty());
    }
}
