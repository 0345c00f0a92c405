use thiserror::Error;

use crate::coordinates::CoordinateError;
use crate::driver::DriverError;
use crate::export::ExportError;
use crate::reviews::ReviewsError;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("browser error: {0}")]
    Driver(#[from] DriverError),

    #[error("could not read coordinates: {0}")]
    Coordinates(#[from] CoordinateError),

    #[error("could not read reviews: {0}")]
    Reviews(#[from] ReviewsError),

    #[error("export failed: {0}")]
    Export(#[from] ExportError),

    #[error("{0} is not on the page")]
    MissingElement(&'static str),

    #[error("could not load {url}: {source}")]
    Navigation {
        url: String,
        #[source]
        source: DriverError,
    },
}
