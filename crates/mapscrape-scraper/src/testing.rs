//! In-memory map page implementing [`PageDriver`] for unit tests.
//!
//! Each query maps to a [`FakeResults`] describing how its results panel
//! behaves: how many listings exist, how many are visible before the first
//! scroll, and how quickly scrolling reveals more. Pauses are recorded but
//! never slept.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use mapscrape_core::ListingRecord;

use crate::driver::{DriverError, PageDriver};
use crate::export::{ExportError, RecordSink};
use crate::selectors;

#[derive(Debug, Clone)]
pub(crate) struct FakeListing {
    pub card_name: Option<String>,
    pub detail_name: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    /// `Some(None)` models a rating element that carries no label.
    pub rating_label: Option<Option<String>>,
    pub url: String,
    pub fails_on_click: bool,
}

impl FakeListing {
    /// A listing with every field present.
    pub fn complete(index: usize) -> Self {
        let name = format!("Cafe {index}");
        Self {
            card_name: Some(name.clone()),
            detail_name: Some(name),
            address: Some(format!("{index} Main St, New York, NY")),
            website: Some(format!("cafe{index}.example.com")),
            phone: Some(format!("(212) 555-01{index:02}")),
            rating_label: Some(Some(format!("4,{index} stars 1,2{index}0 reviews"))),
            url: format!(
                "https://www.google.com/maps/place/Cafe+{index}/@40.71{index},-74.00{index},17z/data=!4m6"
            ),
            fails_on_click: false,
        }
    }

    /// A listing with nothing but a coordinate-bearing URL.
    pub fn bare(index: usize) -> Self {
        Self {
            card_name: None,
            detail_name: None,
            address: None,
            website: None,
            phone: None,
            rating_label: None,
            url: format!("https://www.google.com/maps/place/x{index}/@1.5,2.5,15z"),
            fails_on_click: false,
        }
    }

    pub fn failing(index: usize) -> Self {
        Self {
            fails_on_click: true,
            ..Self::complete(index)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Behaviour {
    Listings,
    NoResults,
    NeverLoads,
}

#[derive(Debug, Clone)]
pub(crate) struct FakeResults {
    pub behaviour: Behaviour,
    pub listings: Vec<FakeListing>,
    pub initially_visible: usize,
    pub per_growth: usize,
    /// Scrolls needed for each growth step.
    pub scrolls_per_growth: usize,
    pub anchors_per_card: usize,
    /// The "No results found" banner is shown next to the listings.
    pub banner: bool,
}

impl FakeResults {
    pub fn listings(listings: Vec<FakeListing>) -> Self {
        Self {
            behaviour: Behaviour::Listings,
            initially_visible: listings.len().min(3),
            listings,
            per_growth: 2,
            scrolls_per_growth: 1,
            anchors_per_card: 1,
            banner: false,
        }
    }

    pub fn no_results() -> Self {
        Self {
            behaviour: Behaviour::NoResults,
            listings: Vec::new(),
            initially_visible: 0,
            per_growth: 0,
            scrolls_per_growth: 1,
            anchors_per_card: 1,
            banner: true,
        }
    }

    pub fn never_loads() -> Self {
        Self {
            behaviour: Behaviour::NeverLoads,
            banner: false,
            ..Self::no_results()
        }
    }

    pub fn initially_visible(mut self, count: usize) -> Self {
        self.initially_visible = count;
        self
    }

    pub fn grow_by(mut self, per_growth: usize, every_scrolls: usize) -> Self {
        self.per_growth = per_growth;
        self.scrolls_per_growth = every_scrolls.max(1);
        self
    }

    pub fn anchors_per_card(mut self, count: usize) -> Self {
        self.anchors_per_card = count.max(1);
        self
    }

    pub fn with_banner(mut self) -> Self {
        self.banner = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    CardName,
    DetailName,
    Address,
    Website,
    Phone,
    Rating,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FakeElement {
    SearchBox,
    Anchor(usize),
    Card(usize),
    NoResultsBanner,
    Field(usize, Field),
}

#[derive(Debug, Default)]
struct State {
    pages: HashMap<String, FakeResults>,
    navigation_fails: bool,
    /// Clicks open the detail view only once the next pause elapses.
    lagging_detail: bool,
    pending_open: Option<usize>,
    url: String,
    search_text: String,
    active: Option<FakeResults>,
    visible: usize,
    scrolls: usize,
    open: Option<usize>,
    paused: Duration,
    submitted: Vec<String>,
    hovered: Vec<FakeElement>,
    clicked: Vec<usize>,
}

#[derive(Debug, Default)]
pub(crate) struct FakeMaps {
    state: Mutex<State>,
}

impl FakeMaps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(self, query: &str, results: FakeResults) -> Self {
        self.lock().pages.insert(query.to_owned(), results);
        self
    }

    pub fn failing_navigation(self) -> Self {
        self.lock().navigation_fails = true;
        self
    }

    pub fn lagging_detail(self) -> Self {
        self.lock().lagging_detail = true;
        self
    }

    /// Puts the fake straight into the results view of `query`, as if it
    /// had been submitted.
    pub fn showing(self, query: &str) -> Self {
        self.submit(query);
        self
    }

    /// Opens the detail view of listing `index` of the active results.
    pub fn open_detail(&self, index: usize) {
        Self::open_in(&mut self.lock(), index);
    }

    pub fn scrolls(&self) -> usize {
        self.lock().scrolls
    }

    pub fn paused(&self) -> Duration {
        self.lock().paused
    }

    pub fn submitted(&self) -> Vec<String> {
        self.lock().submitted.clone()
    }

    pub fn hovered(&self) -> Vec<FakeElement> {
        self.lock().hovered.clone()
    }

    pub fn clicked(&self) -> Vec<usize> {
        self.lock().clicked.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("fake state poisoned")
    }

    fn submit(&self, query: &str) {
        let mut state = self.lock();
        let results = state
            .pages
            .get(query)
            .cloned()
            .unwrap_or_else(FakeResults::no_results);
        state.visible = results.initially_visible.min(results.listings.len());
        state.active = Some(results);
        state.open = None;
        state.pending_open = None;
        state.scrolls = 0;
        state.url = format!(
            "https://www.google.com/maps/search/{}/@40.7,-74.0,12z",
            query.replace(' ', "+")
        );
        state.submitted.push(query.to_owned());
    }

    fn open_in(state: &mut State, index: usize) {
        let url = Self::listing(state, index)
            .map(|l| l.url.clone())
            .unwrap_or_default();
        state.open = Some(index);
        state.url = url;
    }

    fn listing(state: &State, index: usize) -> Option<&FakeListing> {
        state.active.as_ref()?.listings.get(index)
    }

    fn field_value(state: &State, index: usize, field: Field) -> Option<String> {
        let listing = Self::listing(state, index)?;
        match field {
            Field::CardName => listing.card_name.clone(),
            Field::DetailName => listing.detail_name.clone(),
            Field::Address => listing.address.clone(),
            Field::Website => listing.website.clone(),
            Field::Phone => listing.phone.clone(),
            Field::Rating => listing.rating_label.clone().map(|_| String::new()),
        }
    }

    fn detail_field(xpath: &str) -> Option<Field> {
        if xpath == selectors::NAME[1].xpath {
            Some(Field::DetailName)
        } else if xpath == selectors::ADDRESS[0].xpath {
            Some(Field::Address)
        } else if xpath == selectors::WEBSITE[0].xpath {
            Some(Field::Website)
        } else if xpath == selectors::PHONE_NUMBER[0].xpath {
            Some(Field::Phone)
        } else {
            None
        }
    }
}

impl PageDriver for FakeMaps {
    type Element = FakeElement;

    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), DriverError> {
        let mut state = self.lock();
        if state.navigation_fails {
            return Err(DriverError::Timeout {
                what: format!("navigation to {url}"),
                elapsed_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            });
        }
        url.clone_into(&mut state.url);
        Ok(())
    }

    async fn find_all(&self, xpath: &str) -> Result<Vec<FakeElement>, DriverError> {
        let state = self.lock();

        if xpath == selectors::SEARCH_BOX {
            return Ok(vec![FakeElement::SearchBox]);
        }
        if xpath == selectors::LISTING_ANCHOR {
            if let Some(results) = state.active.as_ref() {
                if results.behaviour == Behaviour::Listings {
                    let anchors = state.visible * results.anchors_per_card;
                    return Ok((0..anchors).map(FakeElement::Anchor).collect());
                }
            }
            return Ok(Vec::new());
        }
        if xpath == selectors::NO_RESULTS {
            if state.active.as_ref().is_some_and(|r| r.banner) {
                return Ok(vec![FakeElement::NoResultsBanner]);
            }
            return Ok(Vec::new());
        }
        if let (Some(field), Some(open)) = (Self::detail_field(xpath), state.open) {
            if Self::field_value(&state, open, field).is_some() {
                return Ok(vec![FakeElement::Field(open, field)]);
            }
        }
        Ok(Vec::new())
    }

    async fn find_all_within(
        &self,
        scope: &FakeElement,
        xpath: &str,
    ) -> Result<Vec<FakeElement>, DriverError> {
        let state = self.lock();
        if let FakeElement::Anchor(anchor) = *scope {
            if xpath != selectors::CARD_OF_ANCHOR {
                return Ok(Vec::new());
            }
            let per_card = state.active.as_ref().map_or(1, |r| r.anchors_per_card);
            return Ok(vec![FakeElement::Card(anchor / per_card)]);
        }
        let FakeElement::Card(index) = *scope else {
            return Ok(Vec::new());
        };
        let field = if xpath == selectors::NAME[0].xpath {
            Field::CardName
        } else if xpath == selectors::RATING[0].xpath {
            Field::Rating
        } else {
            return Ok(Vec::new());
        };
        if Self::field_value(&state, index, field).is_some() {
            Ok(vec![FakeElement::Field(index, field)])
        } else {
            Ok(Vec::new())
        }
    }

    async fn text(&self, element: &FakeElement) -> Result<String, DriverError> {
        let state = self.lock();
        Ok(match element {
            FakeElement::SearchBox => state.search_text.clone(),
            FakeElement::Field(index, field) => {
                Self::field_value(&state, *index, *field).unwrap_or_default()
            }
            FakeElement::NoResultsBanner => "No results found".to_owned(),
            FakeElement::Anchor(_) | FakeElement::Card(_) => String::new(),
        })
    }

    async fn attribute(
        &self,
        element: &FakeElement,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        let state = self.lock();
        match element {
            FakeElement::Field(index, Field::Rating) if name == selectors::RATING_LABEL_ATTR => {
                Ok(Self::listing(&state, *index)
                    .and_then(|l| l.rating_label.clone())
                    .flatten())
            }
            _ => Ok(None),
        }
    }

    async fn click(&self, element: &FakeElement) -> Result<(), DriverError> {
        let FakeElement::Card(index) = *element else {
            return Ok(());
        };
        let mut state = self.lock();
        state.clicked.push(index);
        let fails = Self::listing(&state, index).is_some_and(|l| l.fails_on_click);
        if fails {
            return Err(DriverError::Command(format!(
                "element click intercepted on listing {index}"
            )));
        }
        if state.lagging_detail {
            state.pending_open = Some(index);
        } else {
            Self::open_in(&mut state, index);
        }
        Ok(())
    }

    async fn hover(&self, element: &FakeElement) -> Result<(), DriverError> {
        self.lock().hovered.push(element.clone());
        Ok(())
    }

    async fn fill(&self, element: &FakeElement, text: &str) -> Result<(), DriverError> {
        if *element == FakeElement::SearchBox {
            text.clone_into(&mut self.lock().search_text);
        }
        Ok(())
    }

    async fn press_enter(&self, element: &FakeElement) -> Result<(), DriverError> {
        if *element == FakeElement::SearchBox {
            let query = self.lock().search_text.clone();
            self.submit(&query);
        }
        Ok(())
    }

    async fn scroll(&self, _panel_xpath: &str, _delta_y: i64) -> Result<(), DriverError> {
        let mut state = self.lock();
        state.scrolls += 1;
        let scrolls = state.scrolls;
        let Some(results) = state.active.clone() else {
            return Ok(());
        };
        if results.behaviour == Behaviour::Listings && scrolls % results.scrolls_per_growth == 0
        {
            state.visible = (state.visible + results.per_growth).min(results.listings.len());
        }
        Ok(())
    }

    async fn current_url(&self) -> Result<String, DriverError> {
        Ok(self.lock().url.clone())
    }

    async fn pause(&self, duration: Duration) {
        let mut state = self.lock();
        state.paused += duration;
        if let Some(index) = state.pending_open.take() {
            Self::open_in(&mut state, index);
        }
    }

    async fn close(self) -> Result<(), DriverError> {
        Ok(())
    }
}

/// Captures exports instead of writing files.
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    pub exports: Vec<(String, Vec<ListingRecord>)>,
    pub fail: bool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn stems(&self) -> Vec<&str> {
        self.exports.iter().map(|(stem, _)| stem.as_str()).collect()
    }
}

impl RecordSink for RecordingSink {
    fn export(&mut self, stem: &str, records: &[ListingRecord]) -> Result<PathBuf, ExportError> {
        let path = PathBuf::from(format!("{stem}.csv"));
        if self.fail {
            return Err(ExportError::Io {
                path,
                source: std::io::Error::other("disk full"),
            });
        }
        self.exports.push((stem.to_owned(), records.to_vec()));
        Ok(path)
    }
}
