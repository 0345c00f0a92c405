//! Field extraction from an opened listing.
//!
//! The caller clicks a listing card and waits for its detail view; the
//! extractor then reads each field through the patterns in
//! [`crate::selectors`]. A field whose patterns match nothing is absent, not
//! an error. Only the rating label and the coordinates can fail a listing.

use mapscrape_core::ListingRecord;

use crate::coordinates::parse_coordinates;
use crate::driver::{DriverError, PageDriver};
use crate::error::ScraperError;
use crate::reviews::{parse_reviews_label, Reviews, ReviewsError};
use crate::selectors::{self, Pattern, Scope};

pub struct FieldExtractor<'a, D: PageDriver> {
    driver: &'a D,
}

impl<'a, D: PageDriver> FieldExtractor<'a, D> {
    pub fn new(driver: &'a D) -> Self {
        Self { driver }
    }

    /// Builds a record for `listing`, whose detail view must already be open.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] if the browser fails, the rating label is
    /// present but unreadable, or the current URL carries no coordinates.
    pub async fn extract(&self, listing: &D::Element) -> Result<ListingRecord, ScraperError> {
        let name = self
            .first_text(listing, selectors::NAME)
            .await?
            .unwrap_or_default();
        let address = self.first_text(listing, selectors::ADDRESS).await?;
        let website = self.first_text(listing, selectors::WEBSITE).await?;
        let phone_number = self.first_text(listing, selectors::PHONE_NUMBER).await?;
        let reviews = self.reviews(listing).await?;

        let source_url = self.driver.current_url().await?;
        let (latitude, longitude) = parse_coordinates(&source_url)?;

        Ok(ListingRecord {
            name,
            address,
            website,
            phone_number,
            reviews_count: reviews.map(|r| r.count),
            reviews_average: reviews.map(|r| r.average),
            latitude,
            longitude,
            source_url,
        })
    }

    /// Trimmed text of the first element matched by the first pattern that
    /// yields non-empty text.
    async fn first_text(
        &self,
        listing: &D::Element,
        patterns: &[Pattern],
    ) -> Result<Option<String>, DriverError> {
        for pattern in patterns {
            let Some(element) = self.first_match(listing, pattern).await? else {
                continue;
            };
            let text = self.driver.text(&element).await?;
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_owned()));
            }
        }
        Ok(None)
    }

    async fn first_match(
        &self,
        listing: &D::Element,
        pattern: &Pattern,
    ) -> Result<Option<D::Element>, DriverError> {
        let matches = match pattern.scope {
            Scope::Listing => self.driver.find_all_within(listing, pattern.xpath).await?,
            Scope::Page => self.driver.find_all(pattern.xpath).await?,
        };
        Ok(matches.into_iter().next())
    }

    async fn reviews(&self, listing: &D::Element) -> Result<Option<Reviews>, ScraperError> {
        let mut indicator = None;
        for pattern in selectors::RATING {
            indicator = self.first_match(listing, pattern).await?;
            if indicator.is_some() {
                break;
            }
        }
        let Some(indicator) = indicator else {
            return Ok(None);
        };

        let label = self
            .driver
            .attribute(&indicator, selectors::RATING_LABEL_ATTR)
            .await?
            .ok_or(ReviewsError::MissingLabel)?;
        Ok(Some(parse_reviews_label(&label)?))
    }
}

#[cfg(test)]
#[path = "extractor_test.rs"]
mod tests;
