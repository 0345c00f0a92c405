//! Latitude/longitude from a place detail URL.
//!
//! Detail URLs carry the map viewport after a `/@` marker:
//!
//! ```text
//! https://www.google.com/maps/place/Joe's+Pizza/@40.7306,-73.9895,17z/data=!3m1...
//! ```
//!
//! The segment up to the next `/` holds `lat,lng` optionally followed by a
//! zoom component (`17z`, `15.5z`, `903m`). When the marker appears more
//! than once the last occurrence is the viewport.

use std::num::ParseFloatError;

use thiserror::Error;

/// Introduces the viewport segment in a detail URL.
pub const COORDINATE_MARKER: &str = "/@";

#[derive(Debug, Error, PartialEq)]
pub enum CoordinateError {
    #[error("no \"/@\" coordinate segment in {url}")]
    MissingMarker { url: String },

    #[error("expected \"lat,lng\" in coordinate segment \"{segment}\"")]
    MalformedSegment { segment: String },

    #[error("coordinate component \"{component}\" is not a number: {source}")]
    InvalidNumber {
        component: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("coordinates ({latitude}, {longitude}) are outside the valid range")]
    OutOfRange { latitude: f64, longitude: f64 },
}

/// Returns `(latitude, longitude)` parsed from `url`.
///
/// # Errors
///
/// - [`CoordinateError::MissingMarker`] if `url` has no `/@` segment, which
///   is the case before a listing detail has been opened.
/// - [`CoordinateError::MalformedSegment`] if the segment does not hold
///   exactly two numeric components.
/// - [`CoordinateError::InvalidNumber`] if latitude or longitude do not parse.
/// - [`CoordinateError::OutOfRange`] if |lat| > 90 or |lng| > 180.
pub fn parse_coordinates(url: &str) -> Result<(f64, f64), CoordinateError> {
    let (_, remainder) =
        url.rsplit_once(COORDINATE_MARKER)
            .ok_or_else(|| CoordinateError::MissingMarker {
                url: url.to_owned(),
            })?;
    let segment = remainder.split('/').next().unwrap_or(remainder);

    let mut components = segment.split(',');
    let (Some(lat_raw), Some(lng_raw)) = (components.next(), components.next()) else {
        return Err(CoordinateError::MalformedSegment {
            segment: segment.to_owned(),
        });
    };

    // A zoom suffix like "17z" may follow; a third plain number may not.
    if components.any(|extra| extra.trim().parse::<f64>().is_ok()) {
        return Err(CoordinateError::MalformedSegment {
            segment: segment.to_owned(),
        });
    }

    let latitude = parse_component(lat_raw)?;
    let longitude = parse_component(lng_raw)?;

    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(CoordinateError::OutOfRange {
            latitude,
            longitude,
        });
    }

    Ok((latitude, longitude))
}

fn parse_component(raw: &str) -> Result<f64, CoordinateError> {
    let trimmed = raw.trim();
    let value = trimmed
        .parse::<f64>()
        .map_err(|source| CoordinateError::InvalidNumber {
            component: trimmed.to_owned(),
            source,
        })?;
    // "NaN" and "inf" parse as f64 but are not coordinates.
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CoordinateError::MalformedSegment {
            segment: trimmed.to_owned(),
        })
    }
}
