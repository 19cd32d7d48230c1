// Text rendering of analysis results
use crate::analyzer::MarketReport;
use crate::analyzer::price_analysis::{ColorCount, FairListing, ModelExtremes, ModelMaxPrice, MostCommonModel};
use crate::reporter::ReportSink;
use crate::utils::{format_grouped, format_money2};

pub fn render_most_common(result: &MostCommonModel) -> Vec<String> {
    let name = result
        .key
        .as_ref()
        .map(|k| k.to_string())
        .unwrap_or_else(|| "None".to_string());
    vec![format!(
        "Q1: Most common car brand & model: {} ({} cars)",
        name, result.count
    )]
}

pub fn render_top_priced(top: &[ModelMaxPrice]) -> Vec<String> {
    let mut lines = vec!["Q2: Top 3 most expensive cars by brand & model:".to_string()];
    for (idx, entry) in top.iter().enumerate() {
        lines.push(format!(
            "  {}. {} - Price: IRR {}",
            idx + 1,
            entry.key,
            format_grouped(entry.max_price)
        ));
    }
    lines
}

pub fn render_usd_spread(spread: Option<f64>) -> Vec<String> {
    match spread {
        Some(diff) => vec![format!(
            "Q3: USD price difference between most expensive and cheapest car: ${}",
            format_money2(diff)
        )],
        None => vec!["Q3: No car data available.".to_string()],
    }
}

pub fn render_colors(colors: &[ColorCount]) -> Vec<String> {
    let mut lines = vec!["Q4: Number of cars per color:".to_string()];
    lines.extend(colors.iter().map(|c| format!("  {}: {}", c.color, c.count)));
    lines
}

pub fn render_extremes(extremes: &[ModelExtremes]) -> Vec<String> {
    let mut lines = vec!["Q5: Lowest price and mileage car per brand & model:".to_string()];
    for group in extremes {
        lines.push(format!("  {}:", group.key));
        lines.push(format!(
            "    Lowest Price: IRR {} (ID: {})",
            format_grouped(group.lowest_price.value),
            group.lowest_price.id
        ));
        lines.push(format!(
            "    Lowest Mileage: {} km (ID: {})",
            format_grouped(group.lowest_mileage.value),
            group.lowest_mileage.id
        ));
    }
    lines
}

pub fn render_fairest_price(ranked: &[FairListing]) -> Vec<String> {
    let mut lines = vec!["Q6: Top 5 most fair-priced cars:".to_string()];
    lines.extend(ranked.iter().map(|car| {
        format!(
            "  ID: {} - {} {} ({}) - Price Diff: IRR {}",
            car.id,
            car.brand,
            car.model,
            car.year,
            format_grouped(car.diff)
        )
    }));
    lines
}

pub fn render_fairest_mileage(ranked: &[FairListing]) -> Vec<String> {
    let mut lines = vec!["Q7: Top 5 cars with most fair mileage:".to_string()];
    lines.extend(ranked.iter().map(|car| {
        format!(
            "  ID: {} - {} {} ({}) - Mileage Diff: {} km",
            car.id,
            car.brand,
            car.model,
            car.year,
            format_grouped(car.diff)
        )
    }));
    lines
}

/// Emits every section in Q1..Q7 order.
pub fn render_report(report: &MarketReport, sink: &mut dyn ReportSink) {
    let sections = [
        render_most_common(&report.most_common),
        render_top_priced(&report.top_priced),
        render_usd_spread(report.usd_spread),
        render_colors(&report.colors),
        render_extremes(&report.extremes),
        render_fairest_price(&report.fairest_price),
        render_fairest_mileage(&report.fairest_mileage),
    ];
    for line in sections.iter().flatten() {
        sink.emit(line);
    }
}
