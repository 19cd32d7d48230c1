use crate::model::EnrichedListing;

/// Returns up to `limit` listings with the smallest `|metric|`. The sort is
/// stable, so equal distances keep their input order.
pub fn closest_to_average<F>(listings: &[EnrichedListing], limit: usize, metric: F) -> Vec<&EnrichedListing>
where
    F: Fn(&EnrichedListing) -> f64,
{
    let mut ranked: Vec<&EnrichedListing> = listings.iter().collect();
    ranked.sort_by(|a, b| metric(a).abs().total_cmp(&metric(b).abs()));
    ranked.truncate(limit);
    ranked
}
