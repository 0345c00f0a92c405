use std::path::PathBuf;

/// How the scraper waits for the page to settle after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitMode {
    /// Sleep the full budget, then proceed.
    Fixed,
    /// Poll a readiness condition until it holds or the budget runs out.
    Poll,
}

impl std::str::FromStr for WaitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(WaitMode::Fixed),
            "poll" => Ok(WaitMode::Poll),
            other => Err(format!("unknown wait mode \"{other}\" (expected fixed or poll)")),
        }
    }
}

impl std::fmt::Display for WaitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WaitMode::Fixed => write!(f, "fixed"),
            WaitMode::Poll => write!(f, "poll"),
        }
    }
}

/// Output format for per-query exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// File extension written for this format, without the leading dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format \"{other}\" (expected csv or json)")),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub webdriver_url: String,
    pub headless: bool,
    pub maps_url: String,
    pub output_dir: PathBuf,
    pub input_file: PathBuf,
    pub export_format: ExportFormat,
    pub log_level: String,
    pub navigation_timeout_secs: u64,
    pub results_timeout_secs: u64,
    pub settle_after_navigation_ms: u64,
    pub settle_after_typing_ms: u64,
    pub scroll_pause_ms: u64,
    pub detail_pause_ms: u64,
    pub scroll_delta: i64,
    pub stall_limit: u32,
    pub wait_mode: WaitMode,
}
