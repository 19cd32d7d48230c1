use crate::analyzer::AnalyzerImpl;
use crate::enricher::enrich;
use crate::fetcher::{DataSource, MarketDataFetcher};
use crate::reporter::{render_report, ReportSink};
use crate::storage::JsonFileStorage;
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Start-of-run timestamp, captured once and read when the run finishes.
#[derive(Debug, Clone, Copy)]
pub struct RunTimer {
    pub started_at: DateTime<Utc>,
    start: Instant,
}

impl RunTimer {
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// No listings were available; nothing was enriched, saved or analyzed.
    Aborted,
    Completed { persisted: bool, elapsed: Duration },
}

/// Fetch, enrich, persist and analyze, in that order.
pub struct Pipeline<S> {
    fetcher: MarketDataFetcher<S>,
    storage: JsonFileStorage,
    analyzer: AnalyzerImpl,
}

impl<S: DataSource> Pipeline<S> {
    pub fn new(fetcher: MarketDataFetcher<S>, storage: JsonFileStorage) -> Self {
        Self {
            fetcher,
            storage,
            analyzer: AnalyzerImpl::new(),
        }
    }

    pub async fn run(&self, timer: RunTimer, sink: &mut dyn ReportSink) -> RunOutcome {
        info!("Fetching data...");
        let data = self.fetcher.fetch_all().await;

        if data.listings.is_empty() {
            error!("No cars data to process. Exiting.");
            return RunOutcome::Aborted;
        }

        info!("Processing data...");
        let enriched = enrich(&data.listings, &data.market_stats, data.exchange_rates.as_ref());

        let persisted = match self.storage.save(&enriched).await {
            Ok(()) => {
                info!("Data saved to {}", self.storage.path().display());
                true
            }
            Err(e) => {
                error!("Error saving file {}: {}", self.storage.path().display(), e);
                false
            }
        };

        sink.emit("");
        sink.emit("--- Data Analysis ---");
        let report = self.analyzer.analyze(&enriched);
        render_report(&report, sink);

        let elapsed = timer.elapsed();
        sink.emit("");
        sink.emit(&format!("Execution completed in {:.2} seconds.", elapsed.as_secs_f64()));

        RunOutcome::Completed { persisted, elapsed }
    }
}
