//! Bounded waits built on [`PageDriver::pause`].
//!
//! Budgets are accounted both by the pauses taken and by wall-clock time,
//! whichever runs out first, so a wait never outlives its budget by more
//! than one readiness check.

use std::future::Future;
use std::time::{Duration, Instant};

use mapscrape_core::WaitMode;

use crate::driver::{DriverError, PageDriver};

/// Waits until any of `xpaths` matches an element.
///
/// Patterns are checked in order on every poll, so when several are present
/// at once the earliest in the slice wins. Returns the index of the matching
/// pattern, or `None` if nothing matched within `timeout`.
///
/// # Errors
///
/// Propagates browser errors from the lookups.
pub async fn wait_for_any<D: PageDriver>(
    driver: &D,
    xpaths: &[&str],
    timeout: Duration,
    poll_interval: Duration,
) -> Result<Option<usize>, DriverError> {
    let started = Instant::now();
    let mut waited = Duration::ZERO;

    loop {
        for (index, xpath) in xpaths.iter().enumerate() {
            if !driver.find_all(xpath).await?.is_empty() {
                return Ok(Some(index));
            }
        }

        if waited >= timeout || started.elapsed() >= timeout {
            return Ok(None);
        }

        let step = poll_interval.min(timeout.saturating_sub(waited));
        driver.pause(step).await;
        waited += step;
    }
}

/// Lets the page settle after an action.
///
/// [`WaitMode::Fixed`] pauses the whole `budget`. [`WaitMode::Poll`] checks
/// `ready` every `poll_interval` and returns as soon as it holds, giving up
/// silently once the budget is spent. Either way the caller proceeds
/// afterwards; this never fails because the page was slow.
///
/// Returns `true` if the page was observed ready (always `false` in fixed
/// mode, where nothing is observed).
///
/// # Errors
///
/// Propagates browser errors raised by `ready`.
pub async fn settle<D, F, Fut>(
    driver: &D,
    mode: WaitMode,
    budget: Duration,
    poll_interval: Duration,
    mut ready: F,
) -> Result<bool, DriverError>
where
    D: PageDriver,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, DriverError>>,
{
    match mode {
        WaitMode::Fixed => {
            driver.pause(budget).await;
            Ok(false)
        }
        WaitMode::Poll => {
            let started = Instant::now();
            let mut waited = Duration::ZERO;
            loop {
                if ready().await? {
                    return Ok(true);
                }
                if waited >= budget || started.elapsed() >= budget {
                    return Ok(false);
                }
                let step = poll_interval.min(budget.saturating_sub(waited));
                driver.pause(step).await;
                waited += step;
            }
        }
    }
}
