use serde::{Deserialize, Serialize};

/// Prefix of every per-query export file stem.
pub const EXPORT_STEM_PREFIX: &str = "google_maps_data_";

/// One business listing extracted from a map search detail view.
///
/// Optional fields are `None` when the page carried no matching element.
/// Flat exports render `None` as an empty cell so every row has the same
/// columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// Display name; empty when no headline element was found.
    pub name: String,
    pub address: Option<String>,
    pub website: Option<String>,
    pub phone_number: Option<String>,
    /// Number of reviews, parsed from the rating label (e.g. `"1,234"` → `1234`).
    pub reviews_count: Option<u64>,
    /// Average star rating, parsed from the rating label (e.g. `"4,5"` → `4.5`).
    pub reviews_average: Option<f64>,
    pub latitude: f64,
    pub longitude: f64,
    /// Detail-view URL at the moment of extraction.
    #[serde(rename = "url")]
    pub source_url: String,
}

impl ListingRecord {
    /// Column names of the flat export, in row order.
    pub const HEADERS: [&'static str; 9] = [
        "name",
        "address",
        "website",
        "phone_number",
        "reviews_count",
        "reviews_average",
        "latitude",
        "longitude",
        "url",
    ];

    /// Renders the record as one flat row aligned with [`Self::HEADERS`].
    #[must_use]
    pub fn to_row(&self) -> [String; 9] {
        [
            self.name.clone(),
            self.address.clone().unwrap_or_default(),
            self.website.clone().unwrap_or_default(),
            self.phone_number.clone().unwrap_or_default(),
            self.reviews_count.map_or_else(String::new, |c| c.to_string()),
            self.reviews_average
                .map_or_else(String::new, |a| a.to_string()),
            self.latitude.to_string(),
            self.longitude.to_string(),
            self.source_url.clone(),
        ]
    }
}

/// Ordered records extracted for a single query.
///
/// Created fresh for every query and handed to the exporter once. Records
/// can be appended but not modified after the fact.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    query: String,
    records: Vec<ListingRecord>,
}

impl ResultSet {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: ListingRecord) {
        self.records.push(record);
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn records(&self) -> &[ListingRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// File stem the exporter should write this result set under.
    #[must_use]
    pub fn export_stem(&self) -> String {
        export_stem(&self.query)
    }
}

/// Builds `google_maps_data_<query>` with every whitespace character and
/// path separator replaced by `_`.
///
/// `"coffee shop"` → `"google_maps_data_coffee_shop"`.
#[must_use]
pub fn export_stem(query: &str) -> String {
    let sanitized: String = query
        .chars()
        .map(|c| {
            if c.is_whitespace() || c == '/' || c == '\\' {
                '_'
            } else {
                c
            }
        })
        .collect();
    format!("{EXPORT_STEM_PREFIX}{sanitized}")
}

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;
