//! Rating label parsing.
//!
//! The star-rating element on a listing card describes itself with an
//! `aria-label` such as `"4.5 stars 1,234 Reviews"` (or `"4,5 stars 120
//! reviews"` in locales with a decimal comma). The label is read
//! positionally: token 0 is the average, token 2 the review count.

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ReviewsError {
    #[error("rating element has no label")]
    MissingLabel,

    #[error("rating label \"{label}\" has fewer than three tokens")]
    TooFewTokens { label: String },

    #[error("rating average \"{token}\" is not a number: {source}")]
    InvalidAverage {
        token: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("review count \"{token}\" is not a whole number: {source}")]
    InvalidCount {
        token: String,
        #[source]
        source: ParseIntError,
    },
}

/// Parsed rating summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reviews {
    pub average: f64,
    pub count: u64,
}

/// Parses a rating label into average and count.
///
/// The average has a decimal comma normalised to a point. The count has
/// thousands separators (`,` `.` and non-breaking spaces) stripped.
///
/// # Errors
///
/// Returns [`ReviewsError`] when the label has fewer than three tokens or
/// either number fails to parse.
pub fn parse_reviews_label(label: &str) -> Result<Reviews, ReviewsError> {
    let tokens: Vec<&str> = label.split_whitespace().collect();
    let (Some(average_token), Some(count_token)) = (tokens.first(), tokens.get(2)) else {
        return Err(ReviewsError::TooFewTokens {
            label: label.to_owned(),
        });
    };

    let average_raw = average_token.replace(',', ".");
    let average = average_raw
        .trim()
        .parse::<f64>()
        .map_err(|source| ReviewsError::InvalidAverage {
            token: (*average_token).to_owned(),
            source,
        })?;

    let count_raw: String = count_token
        .chars()
        .filter(|c| !matches!(c, ',' | '.' | '\u{a0}' | '\u{202f}'))
        .collect();
    let count = count_raw
        .parse::<u64>()
        .map_err(|source| ReviewsError::InvalidCount {
            token: (*count_token).to_owned(),
            source,
        })?;

    Ok(Reviews { average, count })
}
