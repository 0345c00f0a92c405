//! One query at a time against the live search surface.
//!
//! [`SearchSession::run_query`] drives a query through an explicit state
//! machine:
//!
//! ```text
//! Submitting -> AwaitingResults -> Collecting -> Extracting -> Finalizing
//!                      |
//!                      +-> Skipped (no results / timed out)
//! ```
//!
//! Any error leaving a phase moves the query to `Failed` and ends it. No
//! outcome is fatal to the session; the next query starts from a clean
//! `ResultSet`.

use std::fmt;
use std::path::PathBuf;

use mapscrape_core::{ListingRecord, ResultSet};

use crate::collector::ListingCollector;
use crate::coordinates::COORDINATE_MARKER;
use crate::driver::{DriverError, PageDriver};
use crate::error::ScraperError;
use crate::export::RecordSink;
use crate::extractor::FieldExtractor;
use crate::selectors;
use crate::settings::SessionSettings;
use crate::wait::{settle, wait_for_any};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPhase {
    Submitting,
    AwaitingResults,
    Collecting,
    Extracting,
    Finalizing,
}

impl fmt::Display for QueryPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryPhase::Submitting => "submitting",
            QueryPhase::AwaitingResults => "awaiting results",
            QueryPhase::Collecting => "collecting",
            QueryPhase::Extracting => "extracting",
            QueryPhase::Finalizing => "finalizing",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The page showed its "No results found" banner.
    NoResults,
    /// Neither listings nor the banner appeared within the results timeout.
    ResultsTimedOut,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoResults => f.write_str("no results"),
            SkipReason::ResultsTimedOut => f.write_str("results timed out"),
        }
    }
}

#[derive(Debug)]
pub enum QueryOutcome {
    Exported { path: PathBuf },
    /// Results loaded but no listing could be extracted; nothing written.
    NoData,
    Skipped(SkipReason),
    Failed {
        phase: QueryPhase,
        error: ScraperError,
    },
}

/// What a query produced and how it ended.
#[derive(Debug)]
pub struct QueryReport {
    pub results: ResultSet,
    pub outcome: QueryOutcome,
}

enum QueryState<E> {
    Submitting,
    AwaitingResults,
    Collecting,
    Extracting(Vec<E>),
    Finalizing,
    Skipped(SkipReason),
    Failed {
        phase: QueryPhase,
        error: ScraperError,
    },
}

pub struct SearchSession<'a, D: PageDriver> {
    driver: &'a D,
    settings: &'a SessionSettings,
}

impl<'a, D: PageDriver> SearchSession<'a, D> {
    pub fn new(driver: &'a D, settings: &'a SessionSettings) -> Self {
        Self { driver, settings }
    }

    /// Loads the map page and lets it settle.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Navigation`] if the page does not load within
    /// the navigation timeout.
    pub async fn open_search_surface(&self, maps_url: &str) -> Result<(), ScraperError> {
        self.driver
            .navigate(maps_url, self.settings.navigation_timeout)
            .await
            .map_err(|source| ScraperError::Navigation {
                url: maps_url.to_owned(),
                source,
            })?;

        let driver = self.driver;
        settle(
            driver,
            self.settings.wait_mode,
            self.settings.settle_after_navigation,
            self.settings.poll_interval,
            move || async move {
                let boxes = driver.find_all(selectors::SEARCH_BOX).await?;
                Ok::<bool, DriverError>(!boxes.is_empty())
            },
        )
        .await?;

        tracing::info!(url = maps_url, "search surface ready");
        Ok(())
    }

    /// Runs `query` to completion, exporting through `sink` if anything was
    /// scraped. Never fails; the outcome is reported instead.
    pub async fn run_query<S: RecordSink>(
        &self,
        query: &str,
        target: usize,
        sink: &mut S,
    ) -> QueryReport {
        let mut results = ResultSet::new(query);
        let mut state = QueryState::Submitting;

        let outcome = loop {
            state = match state {
                QueryState::Submitting => match self.submit(query).await {
                    Ok(()) => QueryState::AwaitingResults,
                    Err(error) => QueryState::Failed {
                        phase: QueryPhase::Submitting,
                        error,
                    },
                },
                QueryState::AwaitingResults => match self.await_results().await {
                    Ok(None) => QueryState::Collecting,
                    Ok(Some(reason)) => QueryState::Skipped(reason),
                    Err(error) => QueryState::Failed {
                        phase: QueryPhase::AwaitingResults,
                        error: error.into(),
                    },
                },
                QueryState::Collecting => match self.collect(target).await {
                    Ok(listings) => QueryState::Extracting(listings),
                    Err(error) => QueryState::Failed {
                        phase: QueryPhase::Collecting,
                        error: error.into(),
                    },
                },
                QueryState::Extracting(listings) => {
                    match self.extract_all(query, &listings, &mut results).await {
                        Ok(()) => QueryState::Finalizing,
                        Err(error) => QueryState::Failed {
                            phase: QueryPhase::Extracting,
                            error: error.into(),
                        },
                    }
                }
                QueryState::Finalizing => break Self::finalize(query, &results, sink),
                QueryState::Skipped(reason) => {
                    tracing::warn!(query, reason = %reason, "skipping query");
                    break QueryOutcome::Skipped(reason);
                }
                QueryState::Failed { phase, error } => {
                    tracing::warn!(query, phase = %phase, error = %error, "query failed");
                    break QueryOutcome::Failed { phase, error };
                }
            };
        };

        QueryReport { results, outcome }
    }

    async fn submit(&self, query: &str) -> Result<(), ScraperError> {
        let search_box = self
            .driver
            .find_all(selectors::SEARCH_BOX)
            .await?
            .into_iter()
            .next()
            .ok_or(ScraperError::MissingElement("search box"))?;

        self.driver.fill(&search_box, query).await?;
        self.driver.pause(self.settings.settle_after_typing).await;
        self.driver.press_enter(&search_box).await?;
        tracing::debug!(query, "query submitted");
        Ok(())
    }

    /// `None` when listings appeared, otherwise why the query is skipped.
    ///
    /// Listings left over from the previous query can match before the new
    /// results render, so the no-results banner is checked either way.
    async fn await_results(&self) -> Result<Option<SkipReason>, DriverError> {
        let found = wait_for_any(
            self.driver,
            &[selectors::LISTING_ANCHOR, selectors::NO_RESULTS],
            self.settings.results_timeout,
            self.settings.poll_interval,
        )
        .await?;

        if found.is_none() {
            return Ok(Some(SkipReason::ResultsTimedOut));
        }
        if self.driver.find_all(selectors::NO_RESULTS).await?.is_empty() {
            Ok(None)
        } else {
            Ok(Some(SkipReason::NoResults))
        }
    }

    async fn collect(&self, target: usize) -> Result<Vec<D::Element>, DriverError> {
        // Hovering the list gives it scroll focus.
        let anchors = self.driver.find_all(selectors::LISTING_ANCHOR).await?;
        if let Some(first) = anchors.first() {
            self.driver.hover(first).await?;
        }
        ListingCollector::new(self.driver, self.settings)
            .collect(target)
            .await
    }

    /// Per-listing failures are logged and skipped. Only a failure to read
    /// the starting URL escapes.
    ///
    /// The URL each listing must move away from is re-read after every
    /// attempt, so a failed listing whose detail view still loaded does not
    /// let the next listing settle on that stale page.
    async fn extract_all(
        &self,
        query: &str,
        listings: &[D::Element],
        results: &mut ResultSet,
    ) -> Result<(), DriverError> {
        let mut previous_url = self.driver.current_url().await?;
        let total = listings.len();

        for (index, listing) in listings.iter().enumerate() {
            match self.extract_one(listing, &previous_url).await {
                Ok(record) => results.push(record),
                Err(error) => {
                    tracing::warn!(query, index, total, error = %error, "skipping listing");
                }
            }
            match self.driver.current_url().await {
                Ok(url) => previous_url = url,
                Err(error) => {
                    tracing::warn!(query, index, error = %error, "could not read page url");
                }
            }
        }

        tracing::info!(query, records = results.len(), total, "extraction finished");
        Ok(())
    }

    async fn extract_one(
        &self,
        listing: &D::Element,
        previous_url: &str,
    ) -> Result<ListingRecord, ScraperError> {
        self.driver.click(listing).await?;

        let driver = self.driver;
        let previous = previous_url.to_owned();
        settle(
            driver,
            self.settings.wait_mode,
            self.settings.detail_pause,
            self.settings.poll_interval,
            move || {
                let previous = previous.clone();
                async move {
                    let url = driver.current_url().await?;
                    Ok::<bool, DriverError>(url != previous && url.contains(COORDINATE_MARKER))
                }
            },
        )
        .await?;

        FieldExtractor::new(self.driver).extract(listing).await
    }

    fn finalize<S: RecordSink>(query: &str, results: &ResultSet, sink: &mut S) -> QueryOutcome {
        if results.is_empty() {
            tracing::warn!(query, "no data scraped, nothing exported");
            return QueryOutcome::NoData;
        }

        match sink.export(&results.export_stem(), results.records()) {
            Ok(path) => QueryOutcome::Exported { path },
            Err(error) => {
                let error = ScraperError::from(error);
                tracing::warn!(query, phase = %QueryPhase::Finalizing, error = %error, "query failed");
                QueryOutcome::Failed {
                    phase: QueryPhase::Finalizing,
                    error,
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
