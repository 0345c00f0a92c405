pub mod app_config;
pub mod config;
pub mod listing;

pub use app_config::{AppConfig, ExportFormat, WaitMode};
pub use config::{build_app_config, load_app_config, load_app_config_from_env};
pub use listing::{export_stem, ListingRecord, ResultSet, EXPORT_STEM_PREFIX};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
