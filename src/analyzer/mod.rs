// Analyzer module: grouping helpers, closeness-to-average rankings and the report queries.

pub mod grouping;
pub mod fairness;
pub mod price_analysis;

pub use price_analysis::{AnalyzerImpl, MarketReport};
