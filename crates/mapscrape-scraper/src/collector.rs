use crate::driver::{DriverError, PageDriver};
use crate::selectors;
use crate::settings::SessionSettings;
use crate::wait::settle;

/// Grows the lazily loaded results panel by scrolling until enough listings
/// are visible or scrolling stops producing new ones.
pub struct ListingCollector<'a, D: PageDriver> {
    driver: &'a D,
    settings: &'a SessionSettings,
}

impl<'a, D: PageDriver> ListingCollector<'a, D> {
    pub fn new(driver: &'a D, settings: &'a SessionSettings) -> Self {
        Self { driver, settings }
    }

    /// Returns at most `target` listing cards in document order.
    ///
    /// Exactly `target` are returned whenever the page can supply that many.
    /// Otherwise collection ends after `stall_limit` consecutive scrolls that
    /// do not change the count, and everything visible is returned.
    ///
    /// # Errors
    ///
    /// Propagates browser errors from scrolling or lookups.
    pub async fn collect(&self, target: usize) -> Result<Vec<D::Element>, DriverError> {
        let mut previous = 0usize;
        let mut stalls = 0u32;

        loop {
            self.driver
                .scroll(selectors::RESULTS_PANEL, self.settings.scroll_delta)
                .await?;
            let driver = self.driver;
            settle(
                driver,
                self.settings.wait_mode,
                self.settings.scroll_pause,
                self.settings.poll_interval,
                move || async move {
                    let visible = driver.find_all(selectors::LISTING_ANCHOR).await?;
                    Ok::<bool, DriverError>(visible.len() > previous)
                },
            )
            .await?;

            let mut anchors = self.driver.find_all(selectors::LISTING_ANCHOR).await?;
            let count = anchors.len();

            if count >= target {
                anchors.truncate(target);
                return self.cards_of(&anchors).await;
            }

            if count == previous {
                stalls += 1;
                tracing::debug!(count, stalls, "no new listings after scroll");
                if stalls >= self.settings.stall_limit {
                    tracing::info!(count, "listing count stopped growing");
                    return self.cards_of(&anchors).await;
                }
            } else {
                stalls = 0;
                previous = count;
                tracing::info!(count, "currently scraped");
            }
        }
    }

    /// The card wrapping each anchor, one handle per anchor, in order.
    async fn cards_of(&self, anchors: &[D::Element]) -> Result<Vec<D::Element>, DriverError> {
        let mut cards = Vec::with_capacity(anchors.len());
        for anchor in anchors {
            match self
                .driver
                .find_all_within(anchor, selectors::CARD_OF_ANCHOR)
                .await?
                .into_iter()
                .next()
            {
                Some(card) => cards.push(card),
                None => tracing::debug!("listing anchor has no parent card"),
            }
        }
        Ok(cards)
    }
}

#[cfg(test)]
#[path = "collector_test.rs"]
mod tests;
