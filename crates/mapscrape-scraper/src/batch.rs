use std::fmt;

use crate::driver::PageDriver;
use crate::error::ScraperError;
use crate::export::RecordSink;
use crate::session::{QueryOutcome, QueryReport, SearchSession};

/// Tally of a batch run, printed when the run ends.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub attempted: usize,
    pub exported: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Queries whose results loaded but yielded no records.
    pub empty: usize,
    pub records: usize,
}

impl BatchSummary {
    fn record(&mut self, report: &QueryReport) {
        self.attempted += 1;
        match report.outcome {
            QueryOutcome::Exported { .. } => {
                self.exported += 1;
                self.records += report.results.len();
            }
            QueryOutcome::NoData => self.empty += 1,
            QueryOutcome::Skipped(_) => self.skipped += 1,
            QueryOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} queries: {} exported ({} records), {} skipped, {} empty, {} failed",
            self.attempted, self.exported, self.records, self.skipped, self.empty, self.failed
        )
    }
}

/// Opens the search surface once, then runs every query in order.
///
/// # Errors
///
/// Only failing to load the search surface is fatal. Query failures are
/// counted in the summary and the batch moves on.
pub async fn run_batch<D: PageDriver, S: RecordSink>(
    session: &SearchSession<'_, D>,
    maps_url: &str,
    queries: &[String],
    target: usize,
    sink: &mut S,
) -> Result<BatchSummary, ScraperError> {
    session.open_search_surface(maps_url).await?;

    let mut summary = BatchSummary::default();
    let total = queries.len();

    for (index, query) in queries.iter().enumerate() {
        tracing::info!(index = index + 1, total, query = %query, "starting query");
        let report = session.run_query(query, target, sink).await;
        summary.record(&report);
    }

    tracing::info!(
        attempted = summary.attempted,
        exported = summary.exported,
        records = summary.records,
        "batch finished"
    );
    Ok(summary)
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod tests;
