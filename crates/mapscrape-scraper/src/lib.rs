pub mod batch;
pub mod collector;
pub mod coordinates;
pub mod driver;
pub mod error;
pub mod export;
pub mod extractor;
pub mod reviews;
pub mod selectors;
pub mod session;
pub mod settings;
pub mod wait;
pub mod webdriver;

#[cfg(test)]
pub(crate) mod testing;

pub use batch::{run_batch, BatchSummary};
pub use collector::ListingCollector;
pub use coordinates::{parse_coordinates, CoordinateError};
pub use driver::{DriverError, PageDriver};
pub use error::ScraperError;
pub use export::{ExportError, FileExporter, RecordSink};
pub use extractor::FieldExtractor;
pub use reviews::{parse_reviews_label, Reviews, ReviewsError};
pub use session::{QueryOutcome, QueryPhase, QueryReport, SearchSession, SkipReason};
pub use settings::SessionSettings;
pub use webdriver::WebDriverSession;
