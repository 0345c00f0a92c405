//! Structural patterns for the Google Maps search surface.
//!
//! These are the only layout assumptions the scraper makes. When several
//! elements match a pattern the first one in document order is used.

/// The search input on the map page.
pub const SEARCH_BOX: &str = r#"//input[@id="searchboxinput"]"#;

/// Anchors pointing at a place detail page; one per visible listing.
pub const LISTING_ANCHOR: &str = r#"//a[contains(@href, "https://www.google.com/maps/place")]"#;

/// From a listing anchor to the card wrapping it, evaluated relative to the
/// anchor. Anchors are what gets counted; each kept anchor becomes a handle
/// on its card so that name and rating can be read relative to it. Two
/// anchors sharing a card yield that card twice.
pub const CARD_OF_ANCHOR: &str = "..";

/// Banner shown when a search has no matches.
pub const NO_RESULTS: &str = r#"//div[contains(text(), "No results found")]"#;

/// The lazily loaded results list that scrolling grows.
pub const RESULTS_PANEL: &str = r#"//div[@role="feed"]"#;

/// Where a pattern is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Relative to the listing card the detail view was opened from.
    Listing,
    /// Against the whole page (the open detail view).
    Page,
}

/// One way of locating a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub scope: Scope,
    pub xpath: &'static str,
}

const fn listing(xpath: &'static str) -> Pattern {
    Pattern {
        scope: Scope::Listing,
        xpath,
    }
}

const fn page(xpath: &'static str) -> Pattern {
    Pattern {
        scope: Scope::Page,
        xpath,
    }
}

/// Alternatives are tried in order; the first pattern with a match wins.
pub const NAME: &[Pattern] = &[
    listing(r#".//div[contains(@class, "fontHeadlineSmall")]"#),
    page(r#"//h1[contains(@class, "DUwDvf")]"#),
];

pub const ADDRESS: &[Pattern] = &[page(
    r#"//button[@data-item-id="address"]//div[contains(@class, "fontBodyMedium")]"#,
)];

pub const WEBSITE: &[Pattern] = &[page(
    r#"//a[@data-item-id="authority"]//div[contains(@class, "fontBodyMedium")]"#,
)];

pub const PHONE_NUMBER: &[Pattern] = &[page(
    r#"//button[contains(@data-item-id, "phone:tel:")]//div[contains(@class, "fontBodyMedium")]"#,
)];

/// Star-rating image; its `aria-label` reads like `"4.5 stars 1,234 Reviews"`.
pub const RATING: &[Pattern] = &[listing(r#".//span[@role="img"]"#)];

/// Attribute on [`RATING`] carrying the rating description.
pub const RATING_LABEL_ATTR: &str = "aria-label";
